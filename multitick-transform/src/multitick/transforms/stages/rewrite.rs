//! Whole-program rewrite stage

use crate::multitick::ast::Program;
use crate::multitick::rewriting::rewrite_program;
use crate::multitick::transforms::{Runnable, TransformError};

/// Whole-program rewrite stage
///
/// Runs the top-down rewrite pass. Fails on the first malformed literal, reporting its
/// path inside the program.
///
/// # Input
/// - `Program` - as handed over by the host
///
/// # Output
/// - `Program` - with every over-delimited literal replaced
pub struct RewriteProgram;

impl RewriteProgram {
    pub fn new() -> Self {
        RewriteProgram
    }
}

impl Default for RewriteProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Program, Program> for RewriteProgram {
    fn run(&self, input: Program) -> Result<Program, TransformError> {
        rewrite_program(input).map_err(|e| TransformError::stage("RewriteProgram", e))
    }
}
