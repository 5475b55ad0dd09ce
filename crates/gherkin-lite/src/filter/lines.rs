//! Inclusive line-range filter.

use std::ops::RangeInclusive;
use std::str::FromStr;

use super::Filter;
use crate::error::FilterError;
use crate::model::{Feature, ScenarioKind, ScenarioOutline, TableCell};

/// Selects whatever starts inside an inclusive range of source lines.
///
/// A scenario is selected when its own line is in range, when it is an
/// outline with an Examples data row in range, or when its feature's line is
/// in range. An outline selected only through its Examples rows keeps just
/// those rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    range: RangeInclusive<usize>,
}

impl LineFilter {
    /// Parse `"N"` or `"N-M"`.
    ///
    /// # Errors
    ///
    /// [`FilterError::LineRange`] for anything that is not one or two
    /// non-negative integers, or when `N > M`.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::LineFilter;
    ///
    /// let filter = LineFilter::parse("2-5")?;
    /// assert!(filter.contains(4));
    /// assert!(!filter.contains(6));
    /// assert!(LineFilter::parse("5-2").is_err());
    /// # Ok::<(), gherkin_lite::FilterError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::LineRange(input.to_string());
        let mut bounds = input.trim().split('-');
        let start = parse_bound(bounds.next()).ok_or_else(invalid)?;
        let end = match bounds.next() {
            Some(bound) => parse_bound(Some(bound)).ok_or_else(invalid)?,
            None => start,
        };
        if bounds.next().is_some() || start > end {
            return Err(invalid());
        }
        Ok(Self { range: start..=end })
    }

    /// Whether `line` falls inside the range.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.range.contains(&line)
    }
}

fn parse_bound(bound: Option<&str>) -> Option<usize> {
    bound.map(str::trim).and_then(|text| text.parse().ok())
}

impl FromStr for LineFilter {
    type Err = FilterError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl Filter for LineFilter {
    fn matches_feature(&self, feature: &Feature) -> bool {
        self.contains(feature.anchor_line)
    }

    fn matches_scenario(&self, feature: &Feature, scenario: &ScenarioKind) -> bool {
        if self.matches_feature(feature) || self.contains(scenario.anchor_line()) {
            return true;
        }
        match scenario {
            ScenarioKind::Scenario(_) => false,
            ScenarioKind::Outline(outline) => outline
                .examples
                .rows()
                .iter()
                .skip(1)
                .any(|row| self.contains_row(row)),
        }
    }

    fn select_scenario(&self, feature: &Feature, scenario: &ScenarioKind) -> Option<ScenarioKind> {
        if self.matches_feature(feature) || self.contains(scenario.anchor_line()) {
            return Some(scenario.clone());
        }
        let ScenarioKind::Outline(outline) = scenario else {
            return None;
        };
        let examples = outline.examples.retain_data_rows(|row| self.contains_row(row));
        // Only the header is left.
        if examples.len() < 2 {
            return None;
        }
        Some(ScenarioKind::Outline(ScenarioOutline {
            examples,
            ..outline.clone()
        }))
    }
}

impl LineFilter {
    /// A row sits on the line of its first cell.
    fn contains_row(&self, row: &[TableCell]) -> bool {
        row.first().is_some_and(|cell| self.contains(cell.line))
    }
}
