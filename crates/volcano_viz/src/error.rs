use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

/// Coarse failure category, one per process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    ParseFailure,
    Config,
    WriteFailure,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InputNotFound => 2,
            ErrorKind::ParseFailure => 3,
            ErrorKind::Config => 4,
            ErrorKind::WriteFailure => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum VizError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("No usable volcano records in input")]
    NoData,

    #[error("Failed to write {path}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

impl VizError {
    pub fn write_failure<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        VizError::WriteFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VizError::InputNotFound { .. } => ErrorKind::InputNotFound,
            VizError::MissingColumn { .. } | VizError::NoData | VizError::Csv(_) => {
                ErrorKind::ParseFailure
            }
            VizError::Config(_) => ErrorKind::Config,
            VizError::WriteFailure { .. } => ErrorKind::WriteFailure,
            VizError::Io(e) if e.kind() == io::ErrorKind::NotFound => ErrorKind::InputNotFound,
            VizError::Io(_) => ErrorKind::ParseFailure,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Exit code for an error bubbled up through `anyhow`, 1 when no `VizError` is in the chain.
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<VizError>())
        .map_or(1, VizError::exit_code)
}
