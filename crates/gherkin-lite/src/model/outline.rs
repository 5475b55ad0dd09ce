//! Expansion of Scenario Outlines into concrete Scenarios.

use log::debug;

use super::placeholder::{RowValues, substitute_known, substitute_step};
use super::{Scenario, ScenarioOutline, Step, Table, TableCell};
use crate::error::ExpandError;

impl ScenarioOutline {
    /// Produce one Scenario per data row of the Examples table.
    ///
    /// Each expanded Scenario keeps the outline's title and tags and is
    /// anchored at the line of its Examples row. Calling this repeatedly
    /// yields equal results.
    ///
    /// # Errors
    ///
    /// [`ExpandError::Table`] when the Examples table is empty or ragged, and
    /// [`ExpandError::UnknownPlaceholder`] when a step refers to a column the
    /// table does not define.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::{ScenarioKind, parse_document};
    ///
    /// let source = "Feature: F\nScenario Outline: O\n\tThen value is <n>\n\
    ///               Examples:\n\t| n |\n\t| 1 |\n\t| x |\n";
    /// let features = parse_document(source).map_err(|failure| failure.to_string())?;
    /// let feature = features.iter().next().ok_or("no feature")?;
    /// let Some(ScenarioKind::Outline(outline)) = feature.scenarios.first() else {
    ///     return Err("no outline".into());
    /// };
    /// let expanded = outline.expand()?;
    /// assert_eq!(expanded[0].steps[0].text, "value is {{d}}");
    /// assert_eq!(expanded[0].steps[0].literal_data, ["1"]);
    /// assert_eq!(expanded[1].steps[0].text, "value is x");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn expand(&self) -> Result<Vec<Scenario>, ExpandError> {
        let columns = self.examples.column_names()?;
        let rows = self.examples.as_hash()?;
        let mut scenarios = Vec::with_capacity(rows.len());

        for (index, values) in rows.iter().enumerate() {
            let row = RowValues {
                columns: &columns,
                values,
            };
            let anchor_line = self
                .examples
                .row(index + 1)?
                .first()
                .map_or(self.anchor_line, |cell| cell.line);
            let steps = self
                .steps
                .iter()
                .map(|step| expand_step(step, &row))
                .collect::<Result<Vec<_>, _>>()?;
            scenarios.push(Scenario {
                steps,
                tags: self.tags.clone(),
                text: self.text.clone(),
                anchor_line,
            });
        }

        debug!(
            "expanded outline '{}' at line {} into {} scenario(s)",
            self.text,
            self.anchor_line,
            scenarios.len()
        );
        Ok(scenarios)
    }
}

fn expand_step(step: &Step, row: &RowValues<'_>) -> Result<Step, ExpandError> {
    let (text, literal_data) = substitute_step(&step.text, &step.literal_data, row)?;
    let inline_table = step
        .inline_table
        .as_ref()
        .map(|table| substitute_table(table, row));
    Ok(Step {
        keyword: step.keyword.clone(),
        text,
        inline_table,
        literal_data,
        anchor_line: step.anchor_line,
    })
}

fn substitute_table(table: &Table, row: &RowValues<'_>) -> Table {
    let rows = table
        .rows()
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| TableCell::new(substitute_known(&cell.literal, row.values), cell.line))
                .collect()
        })
        .collect();
    Table::from_rows(rows)
}
