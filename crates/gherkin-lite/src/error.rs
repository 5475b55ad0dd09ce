//! Error types surfaced by parsing, table access, and outline expansion.

use thiserror::Error;

use crate::token::TokenKind;

/// A single problem recorded while building the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The grammar required one token kind and found another.
    #[error("line {line}: expected {expected} but found {found}")]
    UnexpectedToken {
        /// Kind the grammar required.
        expected: TokenKind,
        /// Kind actually present.
        found: TokenKind,
        /// Literal of the offending token.
        literal: String,
        /// Line of the offending token.
        line: usize,
    },
    /// A construct was well-tokenised but structurally invalid.
    #[error("line {line}: {message}")]
    Structural {
        /// Human-readable description of the problem.
        message: String,
        /// Line the problem was detected on.
        line: usize,
    },
}

impl ParseError {
    /// Line the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. } | Self::Structural { line, .. } => *line,
        }
    }

    /// The message without its `line N:` prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => format!("expected {expected} but found {found}"),
            Self::Structural { message, .. } => message.clone(),
        }
    }
}

/// Every error recorded while parsing one document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} parse error(s), first: {}", errors.len(), first_message(errors))]
pub struct ParseFailure {
    /// Errors in the order they were recorded.
    pub errors: Vec<ParseError>,
}

fn first_message(errors: &[ParseError]) -> String {
    errors
        .first()
        .map_or_else(|| String::from("none"), ToString::to_string)
}

/// Errors raised by [`Table`](crate::model::Table) accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    /// The table has no rows, so no header either.
    #[error("table requires a header row")]
    MissingHeader,
    /// A row has more or fewer cells than the header.
    #[error("table row {row_number} has {actual} cells but expected {expected}")]
    MalformedTable {
        /// 1-based index of the row that failed, including the header.
        row_number: usize,
        /// Number of cells in the header.
        expected: usize,
        /// Number of cells in the offending row.
        actual: usize,
    },
    /// Positional access past the last row.
    #[error("table row index {index} is out of range for {len} row(s)")]
    RowOutOfRange {
        /// Requested 0-based row index.
        index: usize,
        /// Number of rows in the table.
        len: usize,
    },
}

/// Errors raised while expanding a Scenario Outline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExpandError {
    /// The Examples table is empty or ragged.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A step refers to a column the Examples table does not have.
    #[error("unknown placeholder '<{placeholder}>'; available columns: {available_columns}")]
    UnknownPlaceholder {
        /// Name inside the angle brackets.
        placeholder: String,
        /// Comma-separated header names.
        available_columns: String,
    },
    /// An Examples value would be inserted as prose but contains `{{` or
    /// `}}`, which would read back as a placeholder.
    #[error("value '{value}' in column '{column}' contains '{{{{' or '}}}}'")]
    ReservedDelimiter {
        /// Header of the offending column.
        column: String,
        /// The cell text.
        value: String,
    },
}

/// Errors raised while building a [`Filter`](crate::filter::Filter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// The tag expression could not be parsed.
    #[error("invalid tag expression at byte {offset}: {reason}")]
    TagExpression {
        /// Byte offset of the failure.
        offset: usize,
        /// What went wrong.
        reason: String,
    },
    /// The line range could not be parsed.
    #[error("invalid line range '{0}': expected N or N-M with N <= M")]
    LineRange(String),
}
