//! Errors surfaced by the library: terminal I/O, unknown assets, and config
//! loading.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Terminal or file I/O failed.
    Io(io::Error),
    /// The presentation layer has no sprite or track for this asset path.
    UnknownAsset { path: String },
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse { path: PathBuf, message: String },
    InvalidConfig { field: &'static str, reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::UnknownAsset { path } => write!(f, "unknown asset: {path}"),
            Self::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::ConfigParse { path, message } => {
                write!(f, "failed to parse config {}: {message}", path.display())
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
