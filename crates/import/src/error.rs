use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning an external payload into stock entries.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported data type: {0}")]
    UnsupportedFormat(String),

    #[error("cannot infer import format from '{}'", .0.display())]
    UnknownExtension(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML payload: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("malformed CSV payload: {0}")]
    Csv(#[from] csv::Error),

    #[error("entry {position}: {reason}")]
    InvalidEntry { position: usize, reason: String },
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::UnknownExtension(_) => "unknown_extension",
            Self::Io { .. } => "io_error",
            Self::Json(_) | Self::Xml(_) | Self::Csv(_) => "malformed_payload",
            Self::InvalidEntry { .. } => "invalid_entry",
        }
    }
}
