//! Step blocks and the folding of step bodies into placeholder text.

use super::{Parser, Recorded, Rule};
use crate::model::{NUMBER_PLACEHOLDER, STRING_PLACEHOLDER, Step, has_delimiter};
use crate::token::TokenKind;

impl Parser<'_> {
    /// One or more steps. `owner` names the enclosing block in diagnostics.
    pub(super) fn step_block(&mut self, owner: &str) -> Rule<Vec<Step>> {
        self.skip_trivia();
        if !self.peek.kind.is_step_keyword() {
            let message = format!(
                "{owner} has no steps: expected a step keyword but found {}",
                self.peek.kind
            );
            let line = self.peek.line;
            return Err(self.structural(message, line));
        }
        let mut steps = Vec::new();
        while self.peek.kind.is_step_keyword() {
            steps.push(self.step()?);
            self.skip_trivia();
        }
        Ok(steps)
    }

    fn step(&mut self) -> Rule<Step> {
        let keyword = self.advance().clone();
        let mut text = String::new();
        let mut literal_data = Vec::new();

        while !self.peek.kind.ends_line() {
            let token = self.advance().clone();
            match token.kind {
                TokenKind::Number => {
                    self.push_data(&mut text, NUMBER_PLACEHOLDER);
                    literal_data.push(token.literal);
                }
                TokenKind::String | TokenKind::PyString => {
                    self.push_data(&mut text, STRING_PLACEHOLDER);
                    literal_data.push(token.literal);
                }
                TokenKind::ExampleValue => {
                    if has_delimiter(&token.literal) {
                        return Err(self.reserved_delimiter(token.line));
                    }
                    self.push_data(&mut text, &format!("{{{{<{}>}}}}", token.literal));
                }
                TokenKind::Comment => {}
                TokenKind::Tag => {
                    if !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                    text.push('@');
                    text.push_str(&token.literal);
                }
                _ => {
                    if forms_delimiter(&text, &token.literal) {
                        return Err(self.reserved_delimiter(token.line));
                    }
                    // The scanner splits prose at punctuation; rejoin it with a
                    // space only where two words meet.
                    join_word(&mut text, &token.literal);
                }
            }
        }
        let mut text = text.trim().to_string();
        if self.peek_is(TokenKind::Newline) {
            self.advance();
        }

        let inline_table = if self.peek_is(TokenKind::TableData) {
            Some(self.table()?)
        } else {
            None
        };

        if self.peek_is(TokenKind::PyString) {
            let block = self.advance().literal.clone();
            text.push('\n');
            text.push_str(STRING_PLACEHOLDER);
            literal_data.push(block);
        }

        Ok(Step {
            anchor_line: keyword.line,
            keyword,
            text,
            inline_table,
            literal_data,
        })
    }

    fn reserved_delimiter(&mut self, line: usize) -> Recorded {
        let message = String::from("step text may not contain '{{' or '}}'");
        self.structural(message, line)
    }

    /// Append ` placeholder`, plus a trailing space unless more data follows.
    fn push_data(&self, text: &mut String, placeholder: &str) {
        text.push(' ');
        text.push_str(placeholder);
        if !self.peek.kind.is_data() {
            text.push(' ');
        }
    }
}

/// Append `piece`, inserting one space only where two word characters would
/// otherwise touch.
pub(super) fn join_word(text: &mut String, piece: &str) {
    let touching = text.chars().next_back().is_some_and(is_word_char)
        && piece.chars().next().is_some_and(is_word_char);
    if touching {
        text.push(' ');
    }
    text.push_str(piece);
}

/// Whether appending `piece` to `text` would spell `{{` or `}}`.
///
/// Placeholders are always pushed with a space on either side, so only the
/// last character of `text` can pair with `piece`.
fn forms_delimiter(text: &str, piece: &str) -> bool {
    let mut joined: String = text.chars().next_back().into_iter().collect();
    joined.push_str(piece);
    has_delimiter(&joined)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
