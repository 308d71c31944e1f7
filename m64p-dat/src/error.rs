/// Errors that can occur while reading a game database.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML document: {0}")]
    MalformedDocument(String),

    #[error("Malformed entry '{record}': {reason}")]
    MalformedRecord { record: String, reason: String },

    #[error("Invalid {field} in '{record}': {value:?}")]
    InvalidField {
        record: String,
        field: String,
        value: String,
    },
}

impl DatError {
    pub fn malformed_document(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    pub fn malformed_record(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_field(
        record: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            record: record.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<quick_xml::Error> for DatError {
    fn from(e: quick_xml::Error) -> Self {
        match e {
            quick_xml::Error::Io(io) => Self::Io(std::io::Error::new(io.kind(), io.to_string())),
            other => Self::MalformedDocument(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for DatError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}
