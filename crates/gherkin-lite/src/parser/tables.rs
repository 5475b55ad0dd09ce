//! Tables: inline step tables and Examples blocks.

use super::{Parser, Rule};
use crate::model::{Table, TableCell};
use crate::token::TokenKind;

impl Parser<'_> {
    /// `Examples:` on its own line followed by a table.
    pub(super) fn examples_block(&mut self) -> Rule<Table> {
        self.expect(TokenKind::Examples)?;
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Newline)?;
        self.skip_trivia();
        if !self.peek_is(TokenKind::TableData) {
            return Err(self.unexpected(TokenKind::TableData));
        }
        self.table()
    }

    /// Contiguous `|`-led lines. Every row must match the first row's width.
    pub(super) fn table(&mut self) -> Rule<Table> {
        let mut rows: Vec<Vec<TableCell>> = Vec::new();
        while self.peek_is(TokenKind::TableData) {
            let row_line = self.peek.line;
            let mut row = Vec::new();
            while !self.peek.kind.ends_line() {
                if !self.peek_is(TokenKind::TableData) {
                    return Err(self.unexpected(TokenKind::TableData));
                }
                let cell = self.advance();
                row.push(TableCell::new(cell.literal.clone(), cell.line));
            }
            if self.peek_is(TokenKind::Newline) {
                self.advance();
            }

            let expected = rows.first().map_or(row.len(), Vec::len);
            if row.len() != expected {
                let message = format!(
                    "table row has {} cells but the header has {expected}",
                    row.len()
                );
                return Err(self.structural(message, row_line));
            }
            rows.push(row);
        }
        Ok(Table::from_rows(rows))
    }
}
