//! Error types for node construction

use thiserror::Error;

/// A literal whose segment and placeholder counts do not interleave.
///
/// Every literal alternates text and placeholders starting and ending with text, so the
/// segment count must be exactly one more than the placeholder count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("literal has {segments} text segments for {placeholders} placeholders")]
pub struct LiteralShapeError {
    pub segments: usize,
    pub placeholders: usize,
}
