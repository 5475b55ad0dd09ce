//! Character-level scanner producing [`Token`]s from feature text.
//!
//! The scanner knows nothing about grammar nesting. The first character after
//! intra-line whitespace decides which rule runs, with a little local
//! lookahead to tell an empty string from a `"""` block and to split table
//! cells. It never fails: anything unrecognised becomes free text.
//!
//! Table cells share their delimiters. Scanning a cell stops *before* the
//! next `|`, so that pipe opens the following cell, and `| a | b |\n` yields
//! `TABLEDATA(a) TABLEDATA(b) NEWLINE`.

use crate::token::{Token, TokenKind};

const PYSTRING_DELIMITER: &str = "\"\"\"";

/// Streaming scanner over an in-memory feature source.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a scanner positioned at the start of `input`, on line 1.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            finished: false,
        }
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every call returns [`TokenKind::Eof`].
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("Given 5");
    /// assert_eq!(lexer.next_token().kind, TokenKind::Given);
    /// assert_eq!(lexer.next_token().literal, "5");
    /// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    /// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    /// ```
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let line = self.line;
        let Some(ch) = self.peek_char() else {
            return Token::new(TokenKind::Eof, "", line);
        };
        match ch {
            '#' => {
                self.bump_char();
                let body = self.take_while(|c| c != '\n');
                Token::new(TokenKind::Comment, body.trim(), line)
            }
            ':' => {
                self.bump_char();
                Token::new(TokenKind::Colon, ":", line)
            }
            '\n' => {
                self.bump_char();
                Token::new(TokenKind::Newline, "\n", line)
            }
            '@' => {
                self.bump_char();
                let tag = self.take_while(is_tag_char);
                Token::new(TokenKind::Tag, tag, line)
            }
            '<' if self.closes_on_this_line('>') => {
                self.bump_char();
                let name = self.take_while(|c| c != '>');
                self.bump_if('>');
                Token::new(TokenKind::ExampleValue, name, line)
            }
            '"' => self.lex_quoted(line),
            '|' => self.lex_table_cell(line),
            c if c.is_ascii_digit() => {
                let digits = self.take_while(|c| c.is_ascii_digit());
                Token::new(TokenKind::Number, digits, line)
            }
            _ => self.lex_word(line),
        }
    }

    /// Line the scanner is currently on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    fn lex_quoted(&mut self, line: usize) -> Token {
        self.bump_char();
        if self.peek_char() != Some('"') {
            let body = self.take_while(|c| c != '"');
            self.bump_if('"');
            return Token::new(TokenKind::String, body, line);
        }
        self.bump_char();
        if self.peek_char() != Some('"') {
            return Token::new(TokenKind::String, "", line);
        }
        self.bump_char();

        let rest = self.rest();
        let len = rest.find(PYSTRING_DELIMITER).unwrap_or(rest.len());
        let body = self.advance_over(len);
        for _ in 0..PYSTRING_DELIMITER.len() {
            self.bump_if('"');
        }
        Token::new(TokenKind::PyString, body.trim(), line)
    }

    fn lex_table_cell(&mut self, line: usize) -> Token {
        self.bump_char();
        self.skip_whitespace();
        match self.peek_char() {
            None => Token::new(TokenKind::Eof, "", line),
            Some('\n') => {
                self.bump_char();
                Token::new(TokenKind::Newline, "\n", line)
            }
            // Leave the adjacent pipe for the next call.
            Some('|') => Token::new(TokenKind::TableData, "", line),
            Some(_) => {
                let cell = self.take_while(|c| c != '|' && c != '\n');
                Token::new(TokenKind::TableData, cell.trim(), line)
            }
        }
    }

    fn lex_word(&mut self, line: usize) -> Token {
        let start = self.pos;
        // Always consume the lead character so punctuation makes progress.
        self.bump_char();
        self.take_while(char::is_alphabetic);
        let word = self.since(start);
        if let Some(kind) = TokenKind::keyword(word) {
            return Token::new(kind, word, line);
        }
        self.take_while(is_body_char);
        Token::new(TokenKind::StepBody, self.since(start).trim(), line)
    }

    /// Whether `close` appears before the end of the current line.
    fn closes_on_this_line(&self, close: char) -> bool {
        self.rest()
            .chars()
            .skip(1)
            .take_while(|&c| c != '\n')
            .any(|c| c == close)
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn since(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.advance_over(ch.len_utf8());
        Some(ch)
    }

    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump_char();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(rest.len(), |(index, _)| index);
        self.advance_over(len)
    }

    /// Move the cursor `len` bytes forward, counting every newline crossed.
    fn advance_over(&mut self, len: usize) -> &'a str {
        let start = self.pos;
        let end = start.saturating_add(len).min(self.input.len());
        let taken = self.input.get(start..end).unwrap_or_default();
        self.line += taken.matches('\n').count();
        self.pos = end;
        taken
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

fn is_tag_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')
}

/// Digits end a run of free text so they scan as `NUMBER`.
fn is_body_char(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, ' ' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(input)
            .filter(|token| !token.is(TokenKind::Newline))
            .map(|token| (token.kind, token.literal))
            .collect()
    }

    fn pairs(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        expected
            .iter()
            .map(|&(kind, literal)| (kind, literal.to_string()))
            .collect()
    }

    #[test]
    fn tokenises_feature_with_outline() {
        let input = r#"
	Feature: hello world

	Scenario: Test Scenario
		Given hello world
		When test test
		Then run test
		But not fail test

	@smokeTest
	Scenario Outline: Another Scenario
		Given hello world is "big"
		When test is 5 times test
		Then <data1> must be <data2>
		Examples:
		| data1  | data2  |
		| value1 | value2 |
	"#;
        use TokenKind as K;
        let expected = pairs(&[
            (K::Feature, "Feature"),
            (K::Colon, ":"),
            (K::StepBody, "hello world"),
            (K::Scenario, "Scenario"),
            (K::Colon, ":"),
            (K::StepBody, "Test Scenario"),
            (K::Given, "Given"),
            (K::StepBody, "hello world"),
            (K::When, "When"),
            (K::StepBody, "test test"),
            (K::Then, "Then"),
            (K::StepBody, "run test"),
            (K::But, "But"),
            (K::StepBody, "not fail test"),
            (K::Tag, "smokeTest"),
            (K::Scenario, "Scenario"),
            (K::Outline, "Outline"),
            (K::Colon, ":"),
            (K::StepBody, "Another Scenario"),
            (K::Given, "Given"),
            (K::StepBody, "hello world is"),
            (K::String, "big"),
            (K::When, "When"),
            (K::StepBody, "test is"),
            (K::Number, "5"),
            (K::StepBody, "times test"),
            (K::Then, "Then"),
            (K::ExampleValue, "data1"),
            (K::StepBody, "must be"),
            (K::ExampleValue, "data2"),
            (K::Examples, "Examples"),
            (K::Colon, ":"),
            (K::TableData, "data1"),
            (K::TableData, "data2"),
            (K::TableData, "value1"),
            (K::TableData, "value2"),
            (K::Eof, ""),
        ]);
        assert_eq!(kinds_and_literals(input), expected);
    }

    #[rstest]
    #[case("Feature")]
    #[case("Scenario")]
    #[case("Outline")]
    #[case("Examples")]
    #[case("Background")]
    #[case("Given")]
    #[case("When")]
    #[case("Then")]
    #[case("And")]
    #[case("But")]
    fn scans_each_keyword_alone(#[case] word: &str) {
        let tokens: Vec<Token> = Lexer::new(word).collect();
        assert_eq!(tokens.len(), 2, "keyword plus EOF: {tokens:?}");
        let first = tokens.first().map(|t| (t.kind, t.literal.as_str()));
        assert_eq!(first, Some((TokenKind::keyword(word).unwrap_or(TokenKind::Eof), word)));
    }

    #[rstest]
    #[case("feature")]
    #[case("Givens")]
    #[case("hello")]
    #[case("Featured")]
    fn scans_other_words_as_step_body(#[case] word: &str) {
        let mut lexer = Lexer::new(word);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::StepBody);
        assert_eq!(token.literal, word);
    }

    #[test]
    fn attributes_lines_to_the_line_they_start_on() {
        let tokens: Vec<Token> = Lexer::new("Feature: x\n\nScenario: y\n\tGiven z\n").collect();
        let line_of = |kind: TokenKind| {
            tokens
                .iter()
                .find(|token| token.is(kind))
                .map(|token| token.line)
        };
        assert_eq!(line_of(TokenKind::Feature), Some(1));
        assert_eq!(line_of(TokenKind::Newline), Some(1));
        assert_eq!(line_of(TokenKind::Scenario), Some(3));
        assert_eq!(line_of(TokenKind::Given), Some(4));
        let newline_lines: Vec<usize> = tokens
            .iter()
            .filter(|token| token.is(TokenKind::Newline))
            .map(|token| token.line)
            .collect();
        assert_eq!(newline_lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn keeps_returning_eof() {
        let mut lexer = Lexer::new("");
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn scans_pystring_with_opening_line_and_counts_embedded_newlines() {
        let input = "Given text\n  \"\"\"\n  first\n  second\n  \"\"\"\nThen done";
        let tokens: Vec<Token> = Lexer::new(input).collect();
        let pystring = tokens.iter().find(|token| token.is(TokenKind::PyString));
        assert_eq!(
            pystring.map(|t| (t.literal.as_str(), t.line)),
            Some(("first\n  second", 2))
        );
        let then = tokens.iter().find(|token| token.is(TokenKind::Then));
        assert_eq!(then.map(|t| t.line), Some(6));
    }

    #[test]
    fn distinguishes_empty_string_from_pystring() {
        let tokens = kinds_and_literals(r#"Given "" and "x""#);
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::Given, "Given"),
                (TokenKind::String, ""),
                (TokenKind::StepBody, "and"),
                (TokenKind::String, "x"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn unterminated_string_runs_to_end_of_input() {
        let tokens = kinds_and_literals("\"open ended");
        assert_eq!(
            tokens,
            pairs(&[(TokenKind::String, "open ended"), (TokenKind::Eof, "")])
        );
    }

    #[test]
    fn splits_table_cells_and_rows() {
        let tokens: Vec<(TokenKind, String)> = Lexer::new("| a |  | b c |\n| 1 | 2 | 3 |")
            .map(|token| (token.kind, token.literal))
            .collect();
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::TableData, "a"),
                (TokenKind::TableData, ""),
                (TokenKind::TableData, "b c"),
                (TokenKind::Newline, "\n"),
                (TokenKind::TableData, "1"),
                (TokenKind::TableData, "2"),
                (TokenKind::TableData, "3"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn adjacent_pipes_yield_empty_cell() {
        let tokens = kinds_and_literals("||x|\n");
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::TableData, ""),
                (TokenKind::TableData, "x"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn scans_comments_and_tags() {
        let tokens = kinds_and_literals("# a note  \n@wip @v1.2+beta_x-y");
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::Comment, "a note"),
                (TokenKind::Tag, "wip"),
                (TokenKind::Tag, "v1.2+beta_x-y"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn punctuation_always_makes_progress() {
        let tokens = kinds_and_literals("Hello, world!");
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::StepBody, "Hello"),
                (TokenKind::StepBody, ", world"),
                (TokenKind::StepBody, "!"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[rstest]
    #[case("value is 5", &[(TokenKind::StepBody, "value is"), (TokenKind::Number, "5")])]
    #[case(
        "step2 of 10",
        &[
            (TokenKind::StepBody, "step"),
            (TokenKind::Number, "2"),
            (TokenKind::StepBody, "of"),
            (TokenKind::Number, "10"),
        ]
    )]
    #[case("5 apples", &[(TokenKind::Number, "5"), (TokenKind::StepBody, "apples")])]
    fn digits_end_free_text(#[case] input: &str, #[case] expected: &[(TokenKind, &str)]) {
        let mut expected = pairs(expected);
        expected.push((TokenKind::Eof, String::new()));
        assert_eq!(kinds_and_literals(input), expected);
    }

    #[test]
    fn unclosed_angle_bracket_stays_on_its_line() {
        let tokens: Vec<Token> = Lexer::new("Given a < b\n\tThen c").collect();
        let scanned: Vec<(TokenKind, &str, usize)> = tokens
            .iter()
            .map(|token| (token.kind, token.literal.as_str(), token.line))
            .collect();
        assert_eq!(
            scanned,
            vec![
                (TokenKind::Given, "Given", 1),
                (TokenKind::StepBody, "a", 1),
                (TokenKind::StepBody, "< b", 1),
                (TokenKind::Newline, "\n", 1),
                (TokenKind::Then, "Then", 2),
                (TokenKind::StepBody, "c", 2),
                (TokenKind::Eof, "", 2),
            ]
        );
    }

    #[test]
    fn example_value_closes_on_the_same_line() {
        let tokens = kinds_and_literals("<a b> x");
        assert_eq!(
            tokens,
            pairs(&[
                (TokenKind::ExampleValue, "a b"),
                (TokenKind::StepBody, "x"),
                (TokenKind::Eof, ""),
            ])
        );
    }

    #[test]
    fn iterator_stops_after_first_eof() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next().is_some());
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
    }
}
