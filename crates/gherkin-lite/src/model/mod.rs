//! Document tree produced by the parser.
//!
//! Every node owns its children. Nothing here borrows from the source text,
//! so a [`FeatureSet`] outlives the input it was parsed from.

use std::fmt;
use std::str::FromStr;

use crate::token::{Token, TokenKind};

mod outline;
mod placeholder;
mod table;

pub(crate) use placeholder::has_delimiter;
pub use placeholder::{NUMBER_PLACEHOLDER, STRING_PLACEHOLDER};
pub use table::{Table, TableCell};

/// Ordered collection of features, typically one per parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Append every feature of `other`, preserving order.
    pub fn merge(&mut self, other: Self) {
        self.features.extend(other.features);
    }

    /// Features in order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Iterate over the features in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` when the set holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl From<Vec<Feature>> for FeatureSet {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureSet {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// A named group of scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    /// Title text after `Feature:`.
    pub title: String,
    /// Line of the `Feature` keyword.
    pub anchor_line: usize,
    /// Tags written above the feature, without `@`.
    pub tags: Vec<String>,
    /// Free-text lines between the title and the first block.
    pub description: Vec<String>,
    /// Steps shared by every scenario.
    pub background: Option<Background>,
    /// Scenarios and outlines in source order.
    pub scenarios: Vec<ScenarioKind>,
}

/// Steps run before each scenario of a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    /// Background steps in order.
    pub steps: Vec<Step>,
}

/// Either a concrete scenario or an outline awaiting expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioKind {
    /// A plain `Scenario:`.
    Scenario(Scenario),
    /// A `Scenario Outline:` with its Examples table.
    Outline(ScenarioOutline),
}

impl ScenarioKind {
    /// Tags without `@`.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Scenario(scenario) => &scenario.tags,
            Self::Outline(outline) => &outline.tags,
        }
    }

    /// Title text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Scenario(scenario) => &scenario.text,
            Self::Outline(outline) => &outline.text,
        }
    }

    /// Line of the `Scenario` keyword.
    #[must_use]
    pub fn anchor_line(&self) -> usize {
        match self {
            Self::Scenario(scenario) => scenario.anchor_line,
            Self::Outline(outline) => outline.anchor_line,
        }
    }

    /// Steps in order; template steps for an outline.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Scenario(scenario) => &scenario.steps,
            Self::Outline(outline) => &outline.steps,
        }
    }
}

/// A concrete scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Steps in order.
    pub steps: Vec<Step>,
    /// Tags without `@`.
    pub tags: Vec<String>,
    /// Title text.
    pub text: String,
    /// Line of the `Scenario` keyword, or of the Examples row it came from.
    pub anchor_line: usize,
}

/// A scenario template plus the table that parameterises it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutline {
    /// Template steps, possibly holding `{{<name>}}` references.
    pub steps: Vec<Step>,
    /// Tags without `@`.
    pub tags: Vec<String>,
    /// Title text.
    pub text: String,
    /// Line of the `Scenario` keyword.
    pub anchor_line: usize,
    /// Header row followed by data rows.
    pub examples: Table,
}

/// One Given/When/Then/And/But line.
///
/// Reading `text` left to right, each `{{d}}` or `{{s}}` placeholder pairs
/// with the next entry of `literal_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The keyword token that opened the step.
    pub keyword: Token,
    /// Step text with literals replaced by placeholders.
    pub text: String,
    /// Table written directly below the step.
    pub inline_table: Option<Table>,
    /// Literals extracted from the text, in order.
    pub literal_data: Vec<String>,
    /// Line of the keyword.
    pub anchor_line: usize,
}

impl Step {
    /// Keyword category of the step, if the keyword token is a step keyword.
    #[must_use]
    pub fn keyword_kind(&self) -> Option<StepKeyword> {
        StepKeyword::try_from(self.keyword.kind).ok()
    }
}

/// Keyword that introduces a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Precondition.
    Given,
    /// Action.
    When,
    /// Outcome.
    Then,
    /// Continues the previous keyword.
    And,
    /// Contrasts with the previous keyword.
    But,
}

impl StepKeyword {
    /// Keyword as written in feature files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<TokenKind> for StepKeyword {
    type Error = TokenKind;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Given => Ok(Self::Given),
            TokenKind::When => Ok(Self::When),
            TokenKind::Then => Ok(Self::Then),
            TokenKind::And => Ok(Self::And),
            TokenKind::But => Ok(Self::But),
            other => Err(other),
        }
    }
}

impl FromStr for StepKeyword {
    type Err = String;

    /// Parse the exact, case-sensitive keyword spelling.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TokenKind::keyword(value.trim())
            .and_then(|kind| Self::try_from(kind).ok())
            .ok_or_else(|| format!("invalid step keyword: {value}"))
    }
}
