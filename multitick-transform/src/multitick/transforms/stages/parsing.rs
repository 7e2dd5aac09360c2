//! Program parsing and serialization stages
//!
//! Hosts exchange trees with the CLI as JSON or YAML. Both formats use the `serde` shape of
//! [`Program`].

use crate::multitick::ast::Program;
use crate::multitick::transforms::{Runnable, TransformError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Guess the format from a file extension. Anything that is not YAML is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => SourceFormat::Yaml,
            _ => SourceFormat::Json,
        }
    }
}

/// Parsing stage: `String` → `Program`
pub struct ParseProgram {
    format: SourceFormat,
}

impl ParseProgram {
    pub fn new(format: SourceFormat) -> Self {
        ParseProgram { format }
    }
}

impl Runnable<String, Program> for ParseProgram {
    fn run(&self, input: String) -> Result<Program, TransformError> {
        match self.format {
            SourceFormat::Json => serde_json::from_str(&input)
                .map_err(|e| TransformError::stage("ParseProgram", e)),
            SourceFormat::Yaml => serde_yaml::from_str(&input)
                .map_err(|e| TransformError::stage("ParseProgram", e)),
        }
    }
}

/// Serialization stage: `Program` → `String`
pub struct SerializeProgram {
    format: SourceFormat,
    pretty: bool,
}

impl SerializeProgram {
    pub fn new(format: SourceFormat, pretty: bool) -> Self {
        SerializeProgram { format, pretty }
    }
}

impl Runnable<Program, String> for SerializeProgram {
    fn run(&self, input: Program) -> Result<String, TransformError> {
        let result = match (self.format, self.pretty) {
            (SourceFormat::Json, true) => {
                serde_json::to_string_pretty(&input).map_err(|e| e.to_string())
            }
            (SourceFormat::Json, false) => {
                serde_json::to_string(&input).map_err(|e| e.to_string())
            }
            // YAML has no compact form
            (SourceFormat::Yaml, _) => serde_yaml::to_string(&input).map_err(|e| e.to_string()),
        };
        result.map_err(|message| TransformError::StageFailed {
            stage: "SerializeProgram".to_string(),
            message,
        })
    }
}
