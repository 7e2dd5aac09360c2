//! Program loading utilities
//!
//! `ProgramLoader` reads a serialized program from a file or a string and runs the standard
//! transforms on it. It backs the CLI and the integration tests.
//!
//! ```rust,ignore
//! use multitick_transform::multitick::loader::ProgramLoader;
//!
//! let program = ProgramLoader::from_path("tree.json")?.rewrite()?;
//! let problems = ProgramLoader::from_path("tree.yaml")?.diagnose()?;
//! ```

use crate::multitick::ast::Program;
use crate::multitick::rewriting::{diagnose_program, Diagnostic};
use crate::multitick::transforms::stages::ParseProgram;
use crate::multitick::transforms::standard::to_rewritten;
use crate::multitick::transforms::{Runnable, Transform, TransformError};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use crate::multitick::transforms::stages::SourceFormat;

/// Error that can occur when loading programs
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error when reading file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Parsing or rewriting failed
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

/// Serialized program plus the format it is written in.
pub struct ProgramLoader {
    source: String,
    format: SourceFormat,
}

impl ProgramLoader {
    /// Load from a file path, inferring the format from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "loaded program source");
        Ok(ProgramLoader {
            source,
            format: SourceFormat::from_path(path),
        })
    }

    /// Load from a string in the given format.
    pub fn from_string<S: Into<String>>(source: S, format: SourceFormat) -> Self {
        ProgramLoader {
            source: source.into(),
            format,
        }
    }

    /// Override the detected format.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run a custom transform on the source.
    pub fn with<O>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// The program as written, without rewriting.
    pub fn program(&self) -> Result<Program, LoaderError> {
        Ok(ParseProgram::new(self.format).run(self.source.clone())?)
    }

    /// The program with every over-delimited literal rewritten.
    pub fn rewrite(&self) -> Result<Program, LoaderError> {
        self.with(to_rewritten(self.format))
    }

    /// Every malformed over-delimited literal in the program.
    pub fn diagnose(&self) -> Result<Vec<Diagnostic>, LoaderError> {
        Ok(diagnose_program(&self.program()?))
    }
}
