//! Template literals and their text segments

use super::error::LiteralShapeError;
use super::expression::Expression;
use serde::{Deserialize, Serialize};

/// One run of literal text between delimiters and/or placeholders.
///
/// `raw` holds the exact source characters. `cooked` holds the escape-processed value and is
/// absent when escape processing failed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub raw: String,
    #[serde(default)]
    pub cooked: Option<String>,
}

impl TextSegment {
    /// Segment whose cooked value equals its raw text (no escapes involved).
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            cooked: Some(raw.clone()),
            raw,
        }
    }

    pub fn with_cooked(raw: impl Into<String>, cooked: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            cooked: Some(cooked.into()),
        }
    }

    /// Segment whose escape processing failed upstream.
    pub fn raw_only(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            cooked: None,
        }
    }
}

/// An interpolated literal: text segments interleaved with opaque placeholders.
///
/// The shape invariant (`segments == placeholders + 1`) is checked on construction and on
/// deserialization, so every `TemplateLiteral` in circulation has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LiteralParts", into = "LiteralParts")]
pub struct TemplateLiteral {
    segments: Vec<TextSegment>,
    placeholders: Vec<Expression>,
}

#[derive(Clone, Serialize, Deserialize)]
struct LiteralParts {
    segments: Vec<TextSegment>,
    #[serde(default)]
    placeholders: Vec<Expression>,
}

impl TemplateLiteral {
    pub fn new(
        segments: Vec<TextSegment>,
        placeholders: Vec<Expression>,
    ) -> Result<Self, LiteralShapeError> {
        if segments.len() != placeholders.len() + 1 {
            return Err(LiteralShapeError {
                segments: segments.len(),
                placeholders: placeholders.len(),
            });
        }
        Ok(Self {
            segments,
            placeholders,
        })
    }

    /// A literal made of a single text segment and no placeholders.
    pub fn from_text(raw: impl Into<String>) -> Self {
        Self {
            segments: vec![TextSegment::new(raw)],
            placeholders: Vec::new(),
        }
    }

    /// The literal a parser leaves behind when a delimiter closes right against itself.
    pub fn trivial() -> Self {
        Self::from_text("")
    }

    /// One empty text segment and no placeholders.
    pub fn is_trivial(&self) -> bool {
        self.placeholders.is_empty() && self.segments.len() == 1 && self.segments[0].raw.is_empty()
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    pub fn placeholders(&self) -> &[Expression] {
        &self.placeholders
    }

    pub fn placeholders_mut(&mut self) -> &mut [Expression] {
        &mut self.placeholders
    }

    /// Rebuild the literal segment by segment, keeping its placeholders.
    ///
    /// The shape invariant holds by construction since the segment count never changes.
    pub fn try_map_segments<E, F>(&self, mut f: F) -> Result<TemplateLiteral, E>
    where
        F: FnMut(usize, &TextSegment) -> Result<TextSegment, E>,
    {
        let segments = self
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| f(index, segment))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(TemplateLiteral {
            segments,
            placeholders: self.placeholders.clone(),
        })
    }
}

impl TryFrom<LiteralParts> for TemplateLiteral {
    type Error = LiteralShapeError;

    fn try_from(parts: LiteralParts) -> Result<Self, Self::Error> {
        TemplateLiteral::new(parts.segments, parts.placeholders)
    }
}

impl From<TemplateLiteral> for LiteralParts {
    fn from(literal: TemplateLiteral) -> Self {
        LiteralParts {
            segments: literal.segments,
            placeholders: literal.placeholders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_literal() {
        assert!(TemplateLiteral::trivial().is_trivial());
        assert!(!TemplateLiteral::from_text("\n").is_trivial());
    }

    #[test]
    fn test_empty_segments_around_placeholder_are_not_trivial() {
        let literal = TemplateLiteral::new(
            vec![TextSegment::new(""), TextSegment::new("")],
            vec![Expression::identifier("x")],
        )
        .unwrap();
        assert!(!literal.is_trivial());
    }

    #[test]
    fn test_shape_is_validated() {
        let err =
            TemplateLiteral::new(vec![TextSegment::new("a")], vec![Expression::identifier("x")])
                .unwrap_err();
        assert_eq!(
            err,
            LiteralShapeError {
                segments: 1,
                placeholders: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "literal has 1 text segments for 1 placeholders"
        );
    }

    #[test]
    fn test_shape_is_validated_on_deserialize() {
        let json = r#"{"segments": [], "placeholders": []}"#;
        let result: Result<TemplateLiteral, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_cooked_deserializes_as_absent() {
        let json = r#"{"segments": [{"raw": "\\u{"}]}"#;
        let literal: TemplateLiteral = serde_json::from_str(json).unwrap();
        assert_eq!(literal.segments()[0].cooked, None);
        assert_eq!(literal.segments()[0].raw, "\\u{");
    }
}
