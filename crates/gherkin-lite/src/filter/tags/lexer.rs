//! Tokenises tag filters such as `@smoke&&~@slow`.
//!
//! Tags keep the character set the feature scanner accepts for `@tag`
//! tokens. Whitespace between tokens is ignored.

use crate::error::FilterError;

pub(super) fn tag_error(offset: usize, reason: impl Into<String>) -> FilterError {
    FilterError::TagExpression {
        offset,
        reason: reason.into(),
    }
}

#[derive(Clone, Debug)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) start: usize,
}

impl Token {
    pub(super) fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Tag(tag) => format!("@{tag}"),
            TokenKind::And => "'&&'".to_string(),
            TokenKind::Not => "'~'".to_string(),
            TokenKind::End => "<end>".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub(super) enum TokenKind {
    /// Tag name without `@`.
    Tag(String),
    And,
    Not,
    End,
}

pub(super) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(super) fn next_token(&mut self) -> Result<Token, FilterError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.bump_char() else {
            return Ok(Token {
                kind: TokenKind::End,
                start: self.input.len(),
            });
        };
        let kind = match ch {
            '@' => self.lex_tag(start)?,
            '~' => TokenKind::Not,
            '&' => {
                if self.bump_char() != Some('&') {
                    return Err(tag_error(start, "expected '&&'"));
                }
                TokenKind::And
            }
            other => return Err(tag_error(start, format!("unexpected character '{other}'"))),
        };
        Ok(Token { kind, start })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|s| s.chars().next())
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn lex_tag(&mut self, start: usize) -> Result<TokenKind, FilterError> {
        let name_start = self.pos;
        while let Some(ch) = self.peek_char() {
            if is_tag_char(ch) {
                self.bump_char();
            } else {
                break;
            }
        }
        let name = self
            .input
            .get(name_start..self.pos)
            .ok_or_else(|| tag_error(start, "invalid tag boundaries"))?;
        if name.is_empty() {
            return Err(tag_error(start + 1, "expected tag name after '@'"));
        }
        Ok(TokenKind::Tag(name.to_string()))
    }
}

fn is_tag_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')
}
