use super::ast::Expr;
use super::lexer::{Lexer, Token, TokenKind, tag_error};
use crate::error::FilterError;

pub(super) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Result<Self, FilterError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    pub(super) fn parse_expression(&mut self) -> Result<Expr, FilterError> {
        self.parse_and()
    }

    pub(super) fn expect_end(&self) -> Result<(), FilterError> {
        if matches!(self.current.kind, TokenKind::End) {
            Ok(())
        } else {
            Err(tag_error(
                self.current.start,
                format!("unexpected token {}", self.current.describe()),
            ))
        }
    }

    fn advance(&mut self) -> Result<(), FilterError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn parse_and(&mut self) -> Result<Expr, FilterError> {
        let mut node = self.parse_not()?;
        while matches!(self.current.kind, TokenKind::And) {
            self.advance()?;
            if matches!(self.current.kind, TokenKind::And | TokenKind::End) {
                return Err(tag_error(self.current.start, "expected tag after '&&'"));
            }
            let rhs = self.parse_not()?;
            node = Expr::And(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_not(&mut self) -> Result<Expr, FilterError> {
        match self.current.kind {
            TokenKind::Not => {
                self.advance()?;
                let operand = self.parse_not()?;
                Ok(Expr::Not(Box::new(operand)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, FilterError> {
        match self.current.clone() {
            Token {
                kind: TokenKind::Tag(tag),
                ..
            } => {
                self.advance()?;
                Ok(Expr::Tag(tag))
            }
            Token {
                kind: TokenKind::End,
                start,
            } => Err(tag_error(start, "expected tag")),
            token => Err(tag_error(
                token.start,
                format!("expected tag but found {}", token.describe()),
            )),
        }
    }
}
