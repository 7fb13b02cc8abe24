//! Error types for inspection.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::Registry;

pub type Result<T, E = InspectError> = std::result::Result<T, E>;

/// Failures that abort the current file set.
#[derive(Debug, Error)]
pub enum InspectError {
    /// A source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser could not build a clean tree.
    #[error("{}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The file parsed but declares no package.
    #[error("{}: missing package clause", .path.display())]
    MissingPackage { path: PathBuf },

    /// A directory could not be traversed.
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to initialize {language} parser: {message}")]
    Language {
        language: &'static str,
        message: String,
    },
}

impl InspectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// A directory walk that stopped early.
///
/// Carries every package accumulated before the failure so callers can
/// decide whether the partial result is usable.
#[derive(Debug, Error)]
#[error("{source} ({} package(s) collected before the failure)", .partial.len())]
pub struct PartialCollection {
    pub partial: Registry,
    #[source]
    pub source: InspectError,
}

impl PartialCollection {
    pub fn into_parts(self) -> (Registry, InspectError) {
        (self.partial, self.source)
    }
}
