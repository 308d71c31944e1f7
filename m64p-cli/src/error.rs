use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Header(#[from] m64p_rom::HeaderError),

    #[error("{0}")]
    Dat(#[from] m64p_dat::DatError),

    #[error("{0}")]
    Ini(#[from] m64p_ini::IniError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
