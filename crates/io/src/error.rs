use std::fmt;
use std::path::PathBuf;

use pricelist_engine::RankError;

#[derive(Debug)]
pub enum LoadError {
    /// The source directory is missing or cannot be listed.
    SourceDir { path: PathBuf, message: String },
    /// A price-list file could not be opened or read.
    ReadFile { file: String, message: String },
    /// A price-list file is not valid UTF-8.
    Encoding { file: String, valid_up_to: usize },
    /// Malformed CSV (bad quoting, row width differs from header, ...).
    Csv { file: String, message: String },
}

impl LoadError {
    /// True for failures confined to a single file.
    pub fn is_per_file(&self) -> bool {
        !matches!(self, Self::SourceDir { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceDir { path, message } => {
                write!(f, "cannot read source directory {}: {message}", path.display())
            }
            Self::ReadFile { file, message } => write!(f, "cannot read {file}: {message}"),
            Self::Encoding { file, valid_up_to } => {
                write!(f, "{file}: not valid UTF-8 (first invalid byte at offset {valid_up_to})")
            }
            Self::Csv { file, message } => write!(f, "{file}: malformed CSV: {message}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub enum ExportError {
    /// A record could not be ranked; nothing was written.
    Rank(RankError),
    /// Report file could not be created or written.
    Io { path: PathBuf, message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rank(err) => write!(f, "cannot rank catalog: {err}"),
            Self::Io { path, message } => write!(f, "cannot write {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rank(err) => Some(err),
            Self::Io { .. } => None,
        }
    }
}

impl From<RankError> for ExportError {
    fn from(err: RankError) -> Self {
        Self::Rank(err)
    }
}
