use thiserror::Error;

/// Errors that can occur while reading a cartridge header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// I/O error while reading the ROM
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a full header could be read
    #[error("Truncated header: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}
