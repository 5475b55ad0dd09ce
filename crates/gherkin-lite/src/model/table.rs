//! Pipe-delimited tables attached to steps and Scenario Outlines.

use std::collections::HashMap;

use crate::error::TableError;

/// One trimmed table cell and the line it was written on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Cell text without surrounding pipes or whitespace.
    pub literal: String,
    /// 1-based source line of the cell.
    pub line: usize,
}

impl TableCell {
    /// Create a cell.
    #[must_use]
    pub fn new(literal: impl Into<String>, line: usize) -> Self {
        Self {
            literal: literal.into(),
            line,
        }
    }
}

/// Rows of cells. For an Examples table row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Wrap already-validated rows.
    pub(crate) fn from_rows(rows: Vec<Vec<TableCell>>) -> Self {
        Self { rows }
    }

    /// Build a table from plain strings; row `i` sits on line `first_line + i`.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::Table;
    ///
    /// let table = Table::from_literals(&[&["n"], &["1"], &["2"]], 4);
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.row(2).map(|row| row[0].line), Ok(6));
    /// ```
    #[must_use]
    pub fn from_literals(rows: &[&[&str]], first_line: usize) -> Self {
        let rows = rows
            .iter()
            .zip(first_line..)
            .map(|(cells, line)| cells.iter().map(|cell| TableCell::new(*cell, line)).collect())
            .collect();
        Self { rows }
    }

    /// All rows, header included.
    #[must_use]
    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[TableCell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Line of the first cell of the first row.
    #[must_use]
    pub fn first_line(&self) -> Option<usize> {
        self.rows.first().and_then(|row| row.first()).map(|cell| cell.line)
    }

    /// Fetch a row, checking it against the header's width.
    ///
    /// # Errors
    ///
    /// [`TableError::RowOutOfRange`] when `index` is past the last row and
    /// [`TableError::MalformedTable`] when the row's width differs from the
    /// header's.
    pub fn row(&self, index: usize) -> Result<&[TableCell], TableError> {
        let row = self.rows.get(index).ok_or(TableError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })?;
        let expected = self.header().map_or(0, <[TableCell]>::len);
        if row.len() != expected {
            return Err(TableError::MalformedTable {
                row_number: index + 1,
                expected,
                actual: row.len(),
            });
        }
        Ok(row)
    }

    /// Copy of the table with the header and only the data rows `keep`
    /// accepts.
    #[must_use]
    pub fn retain_data_rows(&self, keep: impl Fn(&[TableCell]) -> bool) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(index, row)| *index == 0 || keep(row.as_slice()))
            .map(|(_, row)| row.clone())
            .collect();
        Self { rows }
    }

    /// Header cell literals.
    ///
    /// # Errors
    ///
    /// [`TableError::MissingHeader`] when the table is empty.
    pub fn column_names(&self) -> Result<Vec<&str>, TableError> {
        let header = self.header().ok_or(TableError::MissingHeader)?;
        Ok(header.iter().map(|cell| cell.literal.as_str()).collect())
    }

    /// One `header -> value` map per data row.
    ///
    /// # Errors
    ///
    /// [`TableError::MissingHeader`] for an empty table and
    /// [`TableError::MalformedTable`] for a row whose width differs from the
    /// header's.
    pub fn as_hash(&self) -> Result<Vec<HashMap<String, String>>, TableError> {
        let names = self.column_names()?;
        (1..self.rows.len())
            .map(|index| -> Result<HashMap<String, String>, TableError> {
                let row = self.row(index)?;
                Ok(names
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| ((*name).to_string(), cell.literal.clone()))
                    .collect())
            })
            .collect()
    }
}
