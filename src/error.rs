use std::path::PathBuf;

/// Errors that can occur in sjpsi.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SJ.out.tab parse error: {0}")]
    Parse(String),

    #[error("region format error: {0}")]
    Format(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: PathBuf::from("<unknown>"),
        }
    }
}
