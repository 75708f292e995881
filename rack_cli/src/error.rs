use rack_core::CalcError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CalcError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Stable code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Core(e) => e.error_code(),
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::FileParsing { .. } => "FILE_PARSING_ERROR",
            CliError::Io(_) => "IO_ERROR",
            CliError::Argument(_) => "ARGUMENT_ERROR",
            CliError::Other(_) => "ERROR",
        }
    }

    pub(crate) fn parsing(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        CliError::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}
