//! Locating the input table.
//!
//! An explicitly supplied path (the "upload") always wins. Without one, the
//! resolver tries the `INS_ABS_PATH` override and then the fixed fallback
//! file name. What to do when nothing resolves is up to the caller: the
//! resolver only reports [`DataLoadError::EmptyInput`].

use crate::error::{DataLoadError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an input file to use when none is given
pub const PATH_ENV_VAR: &str = "INS_ABS_PATH";

/// File looked up relative to the working directory as a last resort
pub const DEFAULT_INPUT_FILE: &str = "insurance.csv";

#[derive(Debug, Clone)]
pub struct SourceResolver {
    explicit: Option<PathBuf>,
    env_override: Option<PathBuf>,
    fallback: PathBuf,
}

impl SourceResolver {
    /// A resolver with no explicit input, no override and the default fallback
    pub fn new() -> Self {
        Self {
            explicit: None,
            env_override: None,
            fallback: PathBuf::from(DEFAULT_INPUT_FILE),
        }
    }

    /// A resolver reading the override from [`PATH_ENV_VAR`].
    ///
    /// Blank values are ignored.
    pub fn from_env() -> Self {
        let env_override = std::env::var(PATH_ENV_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            env_override,
            ..Self::new()
        }
    }

    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn with_env_override(mut self, path: Option<PathBuf>) -> Self {
        self.env_override = path;
        self
    }

    pub fn with_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback = path.into();
        self
    }

    /// Candidate paths in lookup order
    pub fn candidates(&self) -> Vec<&Path> {
        if let Some(explicit) = &self.explicit {
            return vec![explicit.as_path()];
        }
        let mut candidates = Vec::with_capacity(2);
        if let Some(env_override) = &self.env_override {
            candidates.push(env_override.as_path());
        }
        candidates.push(self.fallback.as_path());
        candidates
    }

    /// The first candidate that is an existing file.
    ///
    /// An explicit path is never substituted: if it does not exist the
    /// result is [`DataLoadError::EmptyInput`] naming it.
    pub fn resolve(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        for candidate in &candidates {
            if candidate.is_file() {
                tracing::debug!("Resolved input table to {}", candidate.display());
                return Ok(candidate.to_path_buf());
            }
            tracing::debug!("Input candidate {} not found", candidate.display());
        }
        Err(DataLoadError::EmptyInput {
            tried: candidates.iter().map(|p| p.display().to_string()).collect(),
        })
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new()
    }
}
