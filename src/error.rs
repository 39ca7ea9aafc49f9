//! Error taxonomy shared by adapters, the executor and the host.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{operation} is not implemented by source {source_id}")]
    NotImplemented {
        source_id: String,
        operation: &'static str,
    },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Request to {url} failed with status {status}")]
    Transport { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unknown {kind}: {id}")]
    UnknownIdentifier { kind: &'static str, id: String },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid value {value:?} for parameter {key}")]
    InvalidParameter { key: String, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    NoConfigDir,
}

/// Coarse classification callers branch on instead of matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotImplemented,
    Extraction,
    Transport,
    UnknownIdentifier,
    Other,
}

impl Error {
    pub fn not_implemented(source_id: impl Into<String>, operation: &'static str) -> Self {
        Error::NotImplemented {
            source_id: source_id.into(),
            operation,
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Error::Extraction(message.into())
    }

    pub fn unknown_section(id: impl Into<String>) -> Self {
        Error::UnknownIdentifier {
            kind: "section",
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotImplemented { .. } => ErrorKind::NotImplemented,
            Error::Extraction(_) => ErrorKind::Extraction,
            Error::Transport { .. } | Error::Network(_) => ErrorKind::Transport,
            Error::UnknownIdentifier { .. } => ErrorKind::UnknownIdentifier,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
