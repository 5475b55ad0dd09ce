//! Recursive-descent document builder.
//!
//! The parser pulls tokens from an owned [`Lexer`] and keeps two of them in
//! view: `current`, the last token consumed, and `peek`, the next one. Every
//! grammar rule returns [`Rule`]. A violated expectation pushes one
//! [`ParseError`] onto the accumulator and unwinds with [`Recorded`]; nothing
//! resynchronises, so one malformed construct aborts the whole document.

use log::debug;

use crate::error::{ParseError, ParseFailure};
use crate::lexer::Lexer;
use crate::model::{Background, Feature, FeatureSet, Scenario, ScenarioKind, ScenarioOutline};
use crate::token::{Token, TokenKind};

mod steps;
mod tables;


/// Marker meaning the failure is already in the error accumulator.
#[derive(Debug)]
pub(crate) struct Recorded;

type Rule<T> = Result<T, Recorded>;

/// Builds a [`FeatureSet`] from feature text, collecting errors on the way.
///
/// # Examples
/// ```
/// use gherkin_lite::Parser;
///
/// let mut parser = Parser::new("Feature: F\nScenario: S\n\tGiven a step\n");
/// let features = parser.parse();
/// assert!(parser.errors().is_empty());
/// assert_eq!(features.map(|set| set.len()), Some(1));
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let peek = lexer.next_token();
        Self {
            lexer,
            current: Token::new(TokenKind::Eof, "", 1),
            peek,
            errors: Vec::new(),
        }
    }

    /// Parse one document.
    ///
    /// Returns `None` when any error was recorded; inspect
    /// [`errors`](Self::errors) for the details.
    pub fn parse(&mut self) -> Option<FeatureSet> {
        let parsed = self.document().ok();
        if self.errors.is_empty() { parsed } else { None }
    }

    /// Errors recorded so far, in order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parse one document and fold the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// [`ParseFailure`] carrying every recorded error when the document is
    /// malformed.
    pub fn into_result(mut self) -> Result<FeatureSet, ParseFailure> {
        match self.parse() {
            Some(features) => Ok(features),
            None => Err(ParseFailure {
                errors: self.errors,
            }),
        }
    }

    fn document(&mut self) -> Rule<FeatureSet> {
        self.skip_trivia();
        if !matches!(self.peek.kind, TokenKind::Feature | TokenKind::Tag) {
            return Err(self.unexpected(TokenKind::Feature));
        }
        let feature = self.feature()?;
        self.skip_trivia();
        if !self.peek_is(TokenKind::Eof) {
            let message = format!("unexpected {} after the end of the feature", self.peek.kind);
            let line = self.peek.line;
            return Err(self.structural(message, line));
        }
        Ok(FeatureSet::from(vec![feature]))
    }

    fn feature(&mut self) -> Rule<Feature> {
        let tags = self.tags();
        if !self.peek_is(TokenKind::Feature) {
            return Err(self.unexpected(TokenKind::Feature));
        }
        let anchor_line = self.advance().line;
        self.expect(TokenKind::Colon)?;
        let title = self.free_text_line();
        self.line_end()?;

        let description = self.description();
        let background = if self.peek_is(TokenKind::Background) {
            Some(self.background()?)
        } else {
            None
        };

        self.skip_trivia();
        let mut scenarios = Vec::new();
        while matches!(self.peek.kind, TokenKind::Tag | TokenKind::Scenario) {
            scenarios.push(self.scenario_like()?);
            self.skip_trivia();
        }

        Ok(Feature {
            title,
            anchor_line,
            tags,
            description,
            background,
            scenarios,
        })
    }

    /// Free-text lines up to the first Background, Scenario, or tag.
    fn description(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            match self.peek.kind {
                TokenKind::Background | TokenKind::Scenario | TokenKind::Tag | TokenKind::Eof => {
                    break;
                }
                TokenKind::Newline | TokenKind::Comment => {
                    self.advance();
                }
                _ => {
                    let line = self.free_text_line();
                    if !line.is_empty() {
                        lines.push(line);
                    }
                }
            }
        }
        lines
    }

    fn background(&mut self) -> Rule<Background> {
        self.advance();
        self.expect(TokenKind::Colon)?;
        self.free_text_line();
        self.line_end()?;
        let steps = self.step_block("background")?;
        Ok(Background { steps })
    }

    fn scenario_like(&mut self) -> Rule<ScenarioKind> {
        let tags = self.tags();
        if !self.peek_is(TokenKind::Scenario) {
            return Err(self.unexpected(TokenKind::Scenario));
        }
        let anchor_line = self.advance().line;
        let is_outline = self.peek_is(TokenKind::Outline);
        if is_outline {
            self.advance();
        }
        self.expect(TokenKind::Colon)?;
        let text = self.free_text_line();
        self.line_end()?;

        if !is_outline {
            let steps = self.step_block("scenario")?;
            return Ok(ScenarioKind::Scenario(Scenario {
                steps,
                tags,
                text,
                anchor_line,
            }));
        }

        let steps = self.step_block("scenario outline")?;
        self.skip_trivia();
        let examples = self.examples_block()?;
        Ok(ScenarioKind::Outline(ScenarioOutline {
            steps,
            tags,
            text,
            anchor_line,
            examples,
        }))
    }

    /// Tags, possibly spread over several lines, without their `@`.
    fn tags(&mut self) -> Vec<String> {
        let mut tags = Vec::new();
        loop {
            self.skip_trivia();
            if !self.peek_is(TokenKind::Tag) {
                break;
            }
            tags.push(self.advance().literal.clone());
        }
        tags
    }

    /// The rest of the line as display text, joined like step text.
    fn free_text_line(&mut self) -> String {
        let mut text = String::new();
        let mut spaced = false;
        while !self.peek.kind.ends_line() {
            let token = self.advance();
            let (piece, pad_before, pad_after) = match token.kind {
                TokenKind::Comment => continue,
                TokenKind::Colon => (String::from(":"), false, true),
                TokenKind::String => (format!("\"{}\"", token.literal), true, true),
                TokenKind::PyString => (format!("\"\"\"{}\"\"\"", token.literal), true, true),
                TokenKind::ExampleValue => (format!("<{}>", token.literal), true, true),
                TokenKind::Tag => (format!("@{}", token.literal), true, true),
                _ => (token.literal.clone(), false, false),
            };
            if !text.is_empty() && (spaced || pad_before) {
                text.push(' ');
                text.push_str(&piece);
            } else {
                steps::join_word(&mut text, &piece);
            }
            spaced = pad_after;
        }
        text.trim().to_string()
    }

    fn line_end(&mut self) -> Rule<()> {
        match self.peek.kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(TokenKind::Newline)),
        }
    }

    fn advance(&mut self) -> &Token {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        &self.current
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Rule<()> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn skip_trivia(&mut self) {
        while self.peek.kind.is_trivia() {
            self.advance();
        }
    }

    fn unexpected(&mut self, expected: TokenKind) -> Recorded {
        let error = ParseError::UnexpectedToken {
            expected,
            found: self.peek.kind,
            literal: self.peek.literal.clone(),
            line: self.peek.line,
        };
        self.record(error)
    }

    fn structural(&mut self, message: String, line: usize) -> Recorded {
        self.record(ParseError::Structural { message, line })
    }

    fn record(&mut self, error: ParseError) -> Recorded {
        debug!("recorded parse error: {error}");
        self.errors.push(error);
        Recorded
    }
}
