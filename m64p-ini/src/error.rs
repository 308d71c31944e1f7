use thiserror::Error;

/// Errors that can occur while reading or writing a catalog.
#[derive(Debug, Error)]
pub enum IniError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric field holds a value that is not an integer
    #[error("Line {line}: invalid value for {key}: {value:?}")]
    InvalidField {
        line: usize,
        key: String,
        value: String,
    },

    /// The same MD5 section appears twice in one catalog
    #[error("Duplicate MD5 key: {0}")]
    DuplicateKey(String),

    /// A value to be written contains a line break
    #[error("[{md5}] {key}: value contains a line break: {value:?}")]
    MultilineValue {
        md5: String,
        key: String,
        value: String,
    },

    /// A key/value line appeared before any section header
    #[error("Line {line}: {message}")]
    Protocol { line: usize, message: String },
}

impl IniError {
    pub fn protocol(line: usize, msg: impl Into<String>) -> Self {
        Self::Protocol {
            line,
            message: msg.into(),
        }
    }
}
