//! Margin Normalizer
//!
//! Strips the indentation an author adds purely to line a literal up with the surrounding
//! code. The convention:
//!
//! ~~~text
//!     console.log(```
//!       yaml:
//!         is: nicely
//!     ```)
//! ~~~
//!
//! - The opening delimiter run must be followed directly by a line break.
//! - The margin is the leading space/tab run of the first non-empty line.
//! - That margin is removed from every line; a non-empty line that lacks it is an error,
//!   except the first line of a segment, which may continue a line after a placeholder.
//! - The line break after the opening run and the line break plus indentation before the
//!   closing run are dropped.
//!
//! Raw and cooked text are processed independently with the margin computed from the raw
//! text of the first segment. Placeholders are never looked at.

pub mod line_classification;

use crate::multitick::ast::{TemplateLiteral, TextSegment};
use line_classification::{classify_line, LineOutcome, LineRule, SegmentPosition};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static LEADING_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\t ]*\r?\n").expect("leading boundary pattern is valid"));

static TRAILING_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[\t ]*$").expect("trailing boundary pattern is valid"));

static MARGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\t ]*").expect("margin pattern is valid"));

/// The two ways an over-delimited literal can be authored wrongly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    MissingLeadingNewline,
    InconsistentMargin,
}

/// A literal that cannot be normalized. Fatal for that literal; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedLiteralError {
    /// Content starts on the same line as the opening delimiter run.
    #[error("over-delimited literals must start with a newline")]
    MissingLeadingNewline,
    /// A non-empty, non-continuation line does not start with the margin.
    #[error(
        "over-delimited literals should have consistent margins \
         (line {line} of text segment {segment})"
    )]
    InconsistentMargin { segment: usize, line: usize },
}

impl MalformedLiteralError {
    pub fn kind(&self) -> MalformedKind {
        match self {
            MalformedLiteralError::MissingLeadingNewline => MalformedKind::MissingLeadingNewline,
            MalformedLiteralError::InconsistentMargin { .. } => MalformedKind::InconsistentMargin,
        }
    }
}

/// Dedent and trim a resolved literal.
///
/// Either every segment is rewritten or the first problem found is returned; there is no
/// partial output.
pub fn normalize(literal: &TemplateLiteral) -> Result<TemplateLiteral, MalformedLiteralError> {
    let count = literal.segments().len();
    let first_raw = literal
        .segments()
        .first()
        .map(|segment| segment.raw.as_str())
        .unwrap_or_default();
    let margin = compute_margin(first_raw)?;
    tracing::trace!(margin = ?margin, segments = count, "normalizing literal");

    literal.try_map_segments::<MalformedLiteralError, _>(|index, segment| {
        let position = SegmentPosition::of(index, count);
        let raw = dedent_and_trim(&segment.raw, margin, position, index)?;
        let cooked = segment
            .cooked
            .as_deref()
            .map(|cooked| dedent_and_trim(cooked, margin, position, index))
            .transpose()?;
        Ok(TextSegment { raw, cooked })
    })
}

/// The margin of the first non-empty line of the first segment.
///
/// Fails if the segment does not open with a line break.
pub fn compute_margin(first_raw: &str) -> Result<&str, MalformedLiteralError> {
    let mut lines = first_raw.split('\n');
    if lines.next() != Some("") {
        tracing::debug!("literal does not open with a line break");
        return Err(MalformedLiteralError::MissingLeadingNewline);
    }
    let margin = lines
        .find(|line| !line.is_empty())
        .and_then(|line| MARGIN.find(line))
        .map_or("", |found| found.as_str());
    Ok(margin)
}

fn dedent_and_trim(
    text: &str,
    margin: &str,
    position: SegmentPosition,
    segment: usize,
) -> Result<String, MalformedLiteralError> {
    let mut text = text;
    if position.trims_trailing() {
        if let Some(found) = TRAILING_BOUNDARY.find(text) {
            text = &text[..found.start()];
        }
    }
    if position.trims_leading() {
        if let Some(found) = LEADING_BOUNDARY.find(text) {
            text = &text[found.end()..];
        }
    }

    let mut lines = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        match classify_line(line, margin, LineRule::for_index(index)) {
            LineOutcome::Dedented(rest) | LineOutcome::Kept(rest) => lines.push(rest),
            LineOutcome::Inconsistent => {
                tracing::debug!(segment, line = index, "line does not carry the margin");
                return Err(MalformedLiteralError::InconsistentMargin {
                    segment,
                    line: index,
                });
            }
        }
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multitick::ast::Expression;

    fn raw_text(literal: &TemplateLiteral) -> Vec<&str> {
        literal.segments().iter().map(|s| s.raw.as_str()).collect()
    }

    #[test]
    fn test_dedents_single_segment() {
        let literal = TemplateLiteral::from_text(
            "\n      yaml:\n        is:\n          supported: nicely\n    ",
        );
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["yaml:\n  is:\n    supported: nicely"]);
        assert_eq!(
            result.segments()[0].cooked.as_deref(),
            Some("yaml:\n  is:\n    supported: nicely")
        );
    }

    #[test]
    fn test_margin_of_tabs() {
        assert_eq!(compute_margin("\n\t\t\tyaml:\n\t\t\t\tis:").unwrap(), "\t\t\t");
    }

    #[test]
    fn test_margin_skips_blank_lines() {
        assert_eq!(compute_margin("\n\n\n    a\n  b").unwrap(), "    ");
    }

    #[test]
    fn test_margin_of_whitespace_only_line() {
        // a line of spaces is non-empty, so it sets the margin
        assert_eq!(compute_margin("\n  \n    a").unwrap(), "  ");
    }

    #[test]
    fn test_margin_without_content_is_empty() {
        assert_eq!(compute_margin("\n").unwrap(), "");
        assert_eq!(compute_margin("\n\n").unwrap(), "");
    }

    #[test]
    fn test_missing_leading_newline() {
        let literal = TemplateLiteral::from_text(" \n  backticks\n");
        assert_eq!(
            normalize(&literal),
            Err(MalformedLiteralError::MissingLeadingNewline)
        );
        let literal = TemplateLiteral::from_text("content\n");
        assert_eq!(
            normalize(&literal).unwrap_err().kind(),
            MalformedKind::MissingLeadingNewline
        );
    }

    #[test]
    fn test_crlf_opening_is_not_a_bare_newline() {
        let literal = TemplateLiteral::from_text("\r\n  a\r\n");
        assert_eq!(
            normalize(&literal),
            Err(MalformedLiteralError::MissingLeadingNewline)
        );
    }

    #[test]
    fn test_inconsistent_margin() {
        let literal = TemplateLiteral::from_text(
            "\n    strings:\n      with:\n  inconsistent:\n    margins: not supported\n  ",
        );
        assert_eq!(
            normalize(&literal),
            Err(MalformedLiteralError::InconsistentMargin {
                segment: 0,
                line: 2
            })
        );
    }

    #[test]
    fn test_error_messages() {
        assert!(MalformedLiteralError::MissingLeadingNewline
            .to_string()
            .contains("must start with a newline"));
        assert!(MalformedLiteralError::InconsistentMargin {
            segment: 1,
            line: 3
        }
        .to_string()
        .contains("should have consistent margins"));
    }

    #[test]
    fn test_placeholder_continuations_are_exempt() {
        let literal = TemplateLiteral::new(
            vec![
                TextSegment::new("\n      where id = "),
                TextSegment::new(" and name = "),
                TextSegment::new("\n      limit 1\n    "),
            ],
            vec![Expression::identifier("id"), Expression::identifier("name")],
        )
        .unwrap();
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["where id = ", " and name = ", "\nlimit 1"]);
        assert_eq!(result.placeholders(), literal.placeholders());
    }

    #[test]
    fn test_line_after_placeholder_is_checked() {
        let literal = TemplateLiteral::new(
            vec![
                TextSegment::new("\n      a = "),
                TextSegment::new("\n  b\n    "),
            ],
            vec![Expression::identifier("x")],
        )
        .unwrap();
        assert_eq!(
            normalize(&literal),
            Err(MalformedLiteralError::InconsistentMargin {
                segment: 1,
                line: 1
            })
        );
    }

    #[test]
    fn test_extra_leading_blank_line_is_kept() {
        let literal = TemplateLiteral::from_text("\n\n      yaml:\n        with: x\n    ");
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["\nyaml:\n  with: x"]);
    }

    #[test]
    fn test_flush_closing_is_untouched_by_trailing_trim() {
        let literal = TemplateLiteral::from_text("\n      text\n      not followed by newline");
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["text\nnot followed by newline"]);
    }

    #[test]
    fn test_only_one_trailing_run_is_trimmed() {
        let literal = TemplateLiteral::from_text("\n  a\n\n  ");
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["a\n"]);
    }

    #[test]
    fn test_crlf_closing_is_trimmed() {
        let literal = TemplateLiteral::from_text("\n  a\r\n  ");
        let result = normalize(&literal).unwrap();
        assert_eq!(raw_text(&result), ["a"]);
    }

    #[test]
    fn test_cooked_follows_raw_margin() {
        let literal = TemplateLiteral::new(
            vec![TextSegment::with_cooked(
                "\n  backticks: '\\`'\n",
                "\n  backticks: '`'\n",
            )],
            vec![],
        )
        .unwrap();
        let result = normalize(&literal).unwrap();
        assert_eq!(result.segments()[0].raw, "backticks: '\\`'");
        assert_eq!(result.segments()[0].cooked.as_deref(), Some("backticks: '`'"));
    }

    #[test]
    fn test_absent_cooked_stays_absent() {
        let literal =
            TemplateLiteral::new(vec![TextSegment::raw_only("\n  bad \\u{zz}\n")], vec![])
                .unwrap();
        let result = normalize(&literal).unwrap();
        assert_eq!(result.segments()[0].raw, "bad \\u{zz}");
        assert_eq!(result.segments()[0].cooked, None);
    }

    #[test]
    fn test_blank_literal_normalizes_to_empty() {
        let result = normalize(&TemplateLiteral::from_text("\n    ")).unwrap();
        assert_eq!(raw_text(&result), [""]);
    }
}
