//! Standard transform definitions
//!
//! Pre-built transforms for the common paths, defined as `once_cell::sync::Lazy` statics.

use crate::multitick::ast::Program;
use crate::multitick::transforms::stages::{ParseProgram, RewriteProgram, SourceFormat};
use crate::multitick::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the program rewrite transform
pub type RewriteTransform = Transform<Program, Program>;

/// Type alias for transforms that start from serialized text
pub type SourceTransform = Transform<String, Program>;

/// Rewrite transform: Program → Program
///
/// Replaces every over-delimited literal in the program.
pub static REWRITE: Lazy<RewriteTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(RewriteProgram::new()));

/// JSON text → rewritten Program
pub static JSON_TO_REWRITTEN: Lazy<SourceTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ParseProgram::new(SourceFormat::Json))
        .then_transform(&REWRITE)
});

/// YAML text → rewritten Program
pub static YAML_TO_REWRITTEN: Lazy<SourceTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ParseProgram::new(SourceFormat::Yaml))
        .then_transform(&REWRITE)
});

/// The standard source-to-rewritten transform for a format.
pub fn to_rewritten(format: SourceFormat) -> &'static SourceTransform {
    match format {
        SourceFormat::Json => &*JSON_TO_REWRITTEN,
        SourceFormat::Yaml => &*YAML_TO_REWRITTEN,
    }
}
