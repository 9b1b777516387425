use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input directory not found or unreadable: {}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid {encoding}", path.display())]
    Decoding {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("unsupported text encoding: {0}")]
    UnknownEncoding(String),
    #[error("morphological analyzer failed: {message}")]
    Analyzer {
        message: String,
        #[source]
        source: Option<io::Error>,
    },
    #[error("vectorization failed: {0}")]
    Vectorization(String),
    #[error("failed to write report {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed report {}: {message}", path.display())]
    MalformedReport { path: PathBuf, message: String },
}

impl PipelineError {
    pub fn analyzer(message: impl Into<String>) -> Self {
        PipelineError::Analyzer {
            message: message.into(),
            source: None,
        }
    }

    pub fn analyzer_io(message: impl Into<String>, source: io::Error) -> Self {
        PipelineError::Analyzer {
            message: message.into(),
            source: Some(source),
        }
    }
}
