use std::path::PathBuf;

use thiserror::Error;

use crate::config::LiftVersion;

#[derive(Error, Debug)]
pub enum LiftError {
    #[error("Required value(s) missing on <{element}>: {}", .names.join(", "))]
    RequiredValueMissing { element: String, names: Vec<String> },
    #[error("Action not supported in LIFT v{version}: {action}")]
    UnsupportedAction { action: String, version: LiftVersion },
    #[error("Unsupported LIFT version: {0}")]
    UnsupportedVersion(String),
    #[error("Malformed XML{}: {message}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    MalformedXml { path: Option<PathBuf>, message: String },
    #[error("Invalid file extension, expected .lift: {}", .0.display())]
    InvalidExtension(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid search pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("A gloss already exists for lang {lang}")]
    DuplicateLang { lang: String },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, LiftError>;

impl LiftError {
    pub fn missing(element: &str, names: &[&str]) -> Self {
        Self::RequiredValueMissing {
            element: element.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
    /// Attaches a file path to a malformed document error.
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::MalformedXml { path: None, message } => Self::MalformedXml {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }
}

// Helper conversions
impl From<config::ConfigError> for LiftError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
