use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("cannot load configuration from {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("cannot persist default configuration to {path:?}: {reason}")]
    ConfigPersist { path: PathBuf, reason: String },

    #[error("cannot create directory {path:?}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write artifact {path:?}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type TemplateResult<T> = Result<T, TemplateError>;
