//! Token kinds emitted by the scanner and consumed by the parser.
//!
//! Keyword recognition lives here so the scanner and the parser agree on the
//! exact, case-sensitive spelling of every reserved word.

use std::fmt;

/// Discrete token kinds recognised by the [`Lexer`](crate::lexer::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Returned forever once the source is exhausted.
    Eof,
    /// A `#` comment, without the marker and trimmed.
    Comment,
    /// A `:` separator.
    Colon,
    /// A line terminator.
    Newline,
    /// An `@tag`, without the marker.
    Tag,
    /// A `<name>` reference to an Examples column, without the brackets.
    ExampleValue,
    /// A double-quoted string, without the quotes.
    String,
    /// A `"""` delimited multi-line string, trimmed.
    PyString,
    /// One `|` delimited table cell, trimmed.
    TableData,
    /// A run of ASCII digits.
    Number,
    /// Free text that is not a keyword.
    StepBody,
    /// The `Feature` keyword.
    Feature,
    /// The `Scenario` keyword.
    Scenario,
    /// The `Outline` keyword.
    Outline,
    /// The `Examples` keyword.
    Examples,
    /// The `Background` keyword.
    Background,
    /// The `Given` step keyword.
    Given,
    /// The `When` step keyword.
    When,
    /// The `Then` step keyword.
    Then,
    /// The `And` step keyword.
    And,
    /// The `But` step keyword.
    But,
}

impl TokenKind {
    /// Look up the keyword kind for an exact, case-sensitive word.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("Given"), Some(TokenKind::Given));
    /// assert_eq!(TokenKind::keyword("given"), None);
    /// ```
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "Feature" => Self::Feature,
            "Scenario" => Self::Scenario,
            "Outline" => Self::Outline,
            "Examples" => Self::Examples,
            "Background" => Self::Background,
            "Given" => Self::Given,
            "When" => Self::When,
            "Then" => Self::Then,
            "And" => Self::And,
            "But" => Self::But,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for `Given`, `When`, `Then`, `And`, and `But`.
    #[must_use]
    pub const fn is_step_keyword(self) -> bool {
        matches!(
            self,
            Self::Given | Self::When | Self::Then | Self::And | Self::But
        )
    }

    /// Returns `true` for tokens that become placeholders in step text.
    #[must_use]
    pub const fn is_data(self) -> bool {
        matches!(self, Self::Number | Self::String | Self::ExampleValue)
    }

    /// Returns `true` for tokens the parser skips between constructs.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Newline | Self::Comment)
    }

    /// Returns `true` for tokens that close a line of input.
    #[must_use]
    pub const fn ends_line(self) -> bool {
        matches!(self, Self::Newline | Self::Eof)
    }

    /// Name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Comment => "COMMENT",
            Self::Colon => "COLON",
            Self::Newline => "NEWLINE",
            Self::Tag => "TAG",
            Self::ExampleValue => "EXAMPLE_VALUE",
            Self::String => "STRING",
            Self::PyString => "PYSTRING",
            Self::TableData => "TABLEDATA",
            Self::Number => "NUMBER",
            Self::StepBody => "STEPBODY",
            Self::Feature => "FEATURE",
            Self::Scenario => "SCENARIO",
            Self::Outline => "OUTLINE",
            Self::Examples => "EXAMPLES",
            Self::Background => "BACKGROUND",
            Self::Given => "GIVEN",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::And => "AND",
            Self::But => "BUT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Source text carried by the token, after delimiter stripping.
    pub literal: String,
    /// 1-based line of the token's first character.
    pub line: usize,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
        }
    }

    /// Returns `true` when the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
