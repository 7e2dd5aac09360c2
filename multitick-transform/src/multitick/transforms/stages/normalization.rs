//! Margin normalization stage

use crate::multitick::ast::TemplateLiteral;
use crate::multitick::normalizing::normalize;
use crate::multitick::transforms::{Runnable, TransformError};

/// Margin normalization stage
///
/// Dedents and trims a literal already known to be over-delimited.
///
/// # Input
/// - `TemplateLiteral` - the payload recovered by chain resolution
///
/// # Output
/// - `TemplateLiteral` - the dedented literal with the same placeholders
pub struct NormalizeMargins;

impl NormalizeMargins {
    pub fn new() -> Self {
        NormalizeMargins
    }
}

impl Default for NormalizeMargins {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<TemplateLiteral, TemplateLiteral> for NormalizeMargins {
    fn run(&self, input: TemplateLiteral) -> Result<TemplateLiteral, TransformError> {
        normalize(&input).map_err(|e| TransformError::stage("NormalizeMargins", e))
    }
}
