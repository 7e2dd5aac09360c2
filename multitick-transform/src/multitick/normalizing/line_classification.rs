//! Line Classification
//!
//! The per-line rules of margin normalization as two small tables: where a segment sits in
//! its literal decides which boundary runs are trimmed, and where a line sits in its
//! segment decides whether it must carry the margin.

/// Position of a text segment within its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    /// The literal has no placeholders: first and last at once.
    Only,
    First,
    Middle,
    Last,
}

impl SegmentPosition {
    pub fn of(index: usize, count: usize) -> Self {
        let last = count.saturating_sub(1);
        match (index == 0, index == last) {
            (true, true) => SegmentPosition::Only,
            (true, false) => SegmentPosition::First,
            (false, true) => SegmentPosition::Last,
            (false, false) => SegmentPosition::Middle,
        }
    }

    /// The blank line right after the opening delimiter is dropped.
    pub fn trims_leading(self) -> bool {
        matches!(self, SegmentPosition::Only | SegmentPosition::First)
    }

    /// The newline and indentation right before the closing delimiter are dropped.
    pub fn trims_trailing(self) -> bool {
        matches!(self, SegmentPosition::Only | SegmentPosition::Last)
    }
}

/// How a line inside a segment is held to the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRule {
    /// Index 0: after a placeholder this continues a line already started, so it may carry
    /// no indentation at all.
    Continuation,
    /// Any later line: must start with the margin unless it is empty.
    Checked,
}

impl LineRule {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            LineRule::Continuation
        } else {
            LineRule::Checked
        }
    }
}

/// Result of holding one line against the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// The margin was removed.
    Dedented(&'a str),
    /// The line passes through untouched (empty, or a continuation without the margin).
    Kept(&'a str),
    /// A non-empty checked line that does not start with the margin.
    Inconsistent,
}

pub fn classify_line<'a>(line: &'a str, margin: &str, rule: LineRule) -> LineOutcome<'a> {
    if let Some(rest) = line.strip_prefix(margin) {
        return LineOutcome::Dedented(rest);
    }
    match rule {
        LineRule::Checked if !line.is_empty() => LineOutcome::Inconsistent,
        _ => LineOutcome::Kept(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_positions() {
        assert_eq!(SegmentPosition::of(0, 1), SegmentPosition::Only);
        assert_eq!(SegmentPosition::of(0, 3), SegmentPosition::First);
        assert_eq!(SegmentPosition::of(1, 3), SegmentPosition::Middle);
        assert_eq!(SegmentPosition::of(2, 3), SegmentPosition::Last);
    }

    #[test]
    fn test_trim_table() {
        let table = [
            (SegmentPosition::Only, true, true),
            (SegmentPosition::First, true, false),
            (SegmentPosition::Middle, false, false),
            (SegmentPosition::Last, false, true),
        ];
        for (position, leading, trailing) in table {
            assert_eq!(position.trims_leading(), leading, "{:?}", position);
            assert_eq!(position.trims_trailing(), trailing, "{:?}", position);
        }
    }

    #[test]
    fn test_line_table() {
        let margin = "    ";
        let cases = [
            ("    a", LineRule::Checked, LineOutcome::Dedented("a")),
            ("      a", LineRule::Checked, LineOutcome::Dedented("  a")),
            ("", LineRule::Checked, LineOutcome::Kept("")),
            ("  a", LineRule::Checked, LineOutcome::Inconsistent),
            ("\ta", LineRule::Checked, LineOutcome::Inconsistent),
            (" and more", LineRule::Continuation, LineOutcome::Kept(" and more")),
            ("    a", LineRule::Continuation, LineOutcome::Dedented("a")),
            ("", LineRule::Continuation, LineOutcome::Kept("")),
        ];
        for (line, rule, expected) in cases {
            assert_eq!(classify_line(line, margin, rule), expected, "{:?}", line);
        }
    }

    #[test]
    fn test_empty_margin_dedents_everything_as_is() {
        assert_eq!(
            classify_line("  a", "", LineRule::Checked),
            LineOutcome::Dedented("  a")
        );
    }

    #[test]
    fn test_rule_for_index() {
        assert_eq!(LineRule::for_index(0), LineRule::Continuation);
        assert_eq!(LineRule::for_index(1), LineRule::Checked);
        assert_eq!(LineRule::for_index(7), LineRule::Checked);
    }
}
