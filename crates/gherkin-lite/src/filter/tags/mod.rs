//! Tag-expression filter.

use std::collections::HashSet;

use super::Filter;
use crate::error::FilterError;
use crate::model::{Feature, ScenarioKind};

mod ast;
mod lexer;
mod parser;


use ast::Expr;
use parser::Parser;

/// Selects entities by a conjunction of required and forbidden tags.
///
/// Features are judged on their own tags; scenarios on the union of their
/// tags and their feature's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    root: Expr,
}

impl TagFilter {
    /// Parse an expression such as `@a&&@b&&~@c`.
    ///
    /// # Errors
    ///
    /// [`FilterError::TagExpression`] with the byte offset of the problem.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::TagFilter;
    ///
    /// let filter = TagFilter::parse("@smoke && ~@slow")?;
    /// assert!(filter.matches(["smoke"]));
    /// assert!(!filter.matches(["smoke", "slow"]));
    /// # Ok::<(), gherkin_lite::FilterError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let mut parser = Parser::new(input)?;
        let root = parser.parse_expression()?;
        parser.expect_end()?;
        Ok(Self { root })
    }

    /// Evaluate against a set of tag names given without `@`.
    #[must_use]
    pub fn matches<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&'a str> = tags.into_iter().collect();
        self.root.eval(&set)
    }
}

impl Filter for TagFilter {
    fn matches_feature(&self, feature: &Feature) -> bool {
        self.matches(feature.tags.iter().map(String::as_str))
    }

    fn matches_scenario(&self, feature: &Feature, scenario: &ScenarioKind) -> bool {
        self.matches(
            feature
                .tags
                .iter()
                .chain(scenario.tags())
                .map(String::as_str),
        )
    }
}
