//! Parser for a compact dialect of Gherkin feature files.
//!
//! Source text flows one way through three stages:
//!
//! 1. the [`Lexer`] turns characters into [`Token`]s,
//! 2. the [`Parser`] builds a [`FeatureSet`] and accumulates [`ParseError`]s
//!    instead of stopping at the first problem,
//! 3. [`ScenarioOutline::expand`] turns each outline into concrete
//!    [`Scenario`]s, one per Examples row.
//!
//! Step text keeps literals out of line: numbers become `{{d}}`, strings
//! `{{s}}`, and references to Examples columns `{{<name>}}`. The extracted
//! literals are kept in [`Step::literal_data`] in the same order.
//!
//! [`TagFilter`] and [`LineFilter`] select scenarios from a parsed tree.
//!
//! ```
//! use gherkin_lite::parse_document;
//!
//! let features = parse_document("Feature: F\nScenario: S\n\tThen value is 5\n")?;
//! let step = &features.features()[0].scenarios[0].steps()[0];
//! assert_eq!(step.text, "value is {{d}}");
//! assert_eq!(step.literal_data, ["5"]);
//! # Ok::<(), gherkin_lite::ParseFailure>(())
//! ```

pub mod error;
pub mod filter;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod token;

pub use error::{ExpandError, FilterError, ParseError, ParseFailure, TableError};
pub use filter::{Filter, LineFilter, TagFilter};
pub use lexer::Lexer;
pub use model::{
    Background, Feature, FeatureSet, Scenario, ScenarioKind, ScenarioOutline, Step, StepKeyword,
    Table, TableCell,
};
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parse one feature document.
///
/// # Errors
///
/// [`ParseFailure`] with every recorded error when `input` is malformed.
pub fn parse_document(input: &str) -> Result<FeatureSet, ParseFailure> {
    Parser::new(input).into_result()
}
