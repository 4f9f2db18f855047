//! Source positions and the ranges derived from them.

use std::fmt;

/// A scan position inside the source buffer.
///
/// Offsets count `char`s. `prev_line_start` is only tracked so a range ending
/// right after a newline can be reported on the line it actually ends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub offset: usize,
    pub line: usize,
    pub line_start: usize,
    pub prev_line_start: usize,
}

impl SourcePosition {
    /// The position before the first character.
    pub const START: SourcePosition = SourcePosition {
        offset: 0,
        line: 1,
        line_start: 0,
        prev_line_start: 0,
    };

    /// 1-based column of the character at this position.
    pub fn column(&self) -> usize {
        self.offset - self.line_start + 1
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}C{}", self.line, self.column())
    }
}

/// A span of source text with both absolute offsets and line/column bounds.
///
/// `start_offset..end_offset` is half-open. Columns are 1-based and the end
/// column is the column of the last character inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl Range {
    /// Build the range covering everything between two positions.
    ///
    /// When `end` sits on the first column of a line, the range ends on the
    /// last column of the previous line instead, so a token swallowing a
    /// trailing newline is not reported as reaching into the next line.
    pub fn between(start: SourcePosition, end: SourcePosition) -> Self {
        let mut end_line = end.line;
        let mut end_column = end.offset - end.line_start;

        if end_column == 0 && end.line > 1 {
            end_line -= 1;
            end_column = end.line_start - end.prev_line_start;
        }

        Self {
            start_offset: start.offset,
            end_offset: end.offset,
            start_line: start.line,
            end_line,
            start_column: start.column(),
            end_column,
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{}C{}-L{}C{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(
        offset: usize,
        line: usize,
        line_start: usize,
        prev_line_start: usize,
    ) -> SourcePosition {
        SourcePosition {
            offset,
            line,
            line_start,
            prev_line_start,
        }
    }

    #[test]
    fn test_start_position_display() {
        assert_eq!(SourcePosition::START.to_string(), "L1C1");
        assert_eq!(SourcePosition::default(), SourcePosition::START);
    }

    #[test]
    fn test_range_on_single_line() {
        // "hello" on line 1
        let range = Range::between(SourcePosition::START, pos(5, 1, 0, 0));
        assert_eq!(range.start_column, 1);
        assert_eq!(range.end_column, 5);
        assert_eq!(range.end_line, 1);
        assert_eq!(range.len(), 5);
        assert_eq!(range.to_string(), "L1C1-L1C5");
    }

    #[test]
    fn test_range_ending_on_line_boundary_is_pulled_back() {
        // "ab\n" consumed fully: cursor is at column 1 of line 2
        let range = Range::between(SourcePosition::START, pos(3, 2, 3, 0));
        assert_eq!(range.end_line, 1);
        assert_eq!(range.end_column, 3);
        assert_eq!(range.end_offset, 3);
    }

    #[test]
    fn test_range_ending_after_crlf_counts_both_characters() {
        // "ab\r\n": the newline pair occupies columns 3 and 4
        let range = Range::between(SourcePosition::START, pos(4, 2, 4, 0));
        assert_eq!(range.end_line, 1);
        assert_eq!(range.end_column, 4);
    }

    #[test]
    fn test_range_on_second_line() {
        // "a\nbc": range over "bc"
        let range = Range::between(pos(2, 2, 2, 0), pos(4, 2, 2, 0));
        assert_eq!(range.to_string(), "L2C1-L2C2");
    }

    #[test]
    fn test_empty_range_at_start() {
        let range = Range::between(SourcePosition::START, SourcePosition::START);
        assert!(range.is_empty());
        assert_eq!(range.end_line, 1);
        assert_eq!(range.end_column, 0);
    }
}
