//! Text rendering options for matrices.

/// Delimiters used by [`Matrix::format_with`](super::Matrix::format_with).
///
/// Each row is written as `begin`, the cells joined by `separator`, then
/// `end`; rows are joined by `row_separator`. Intended for diagnostics, not
/// interchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixFormat {
    /// Written before each row
    pub begin: String,
    /// Written after each row
    pub end: String,
    /// Written between cells of a row
    pub separator: String,
    /// Written between rows
    pub row_separator: String,
}

impl Default for MatrixFormat {
    /// `[1, 2]` rows on separate lines.
    fn default() -> Self {
        Self::new("[", "]", ", ")
    }
}

impl MatrixFormat {
    /// Custom row delimiters with newline-separated rows.
    pub fn new(begin: &str, end: &str, separator: &str) -> Self {
        Self {
            begin: begin.to_string(),
            end: end.to_string(),
            separator: separator.to_string(),
            row_separator: "\n".to_string(),
        }
    }

    /// Comma-separated cells without brackets.
    pub fn csv() -> Self {
        Self::new("", "", ",")
    }

    /// Replace the separator between rows.
    pub fn with_row_separator(mut self, row_separator: &str) -> Self {
        self.row_separator = row_separator.to_string();
        self
    }
}
