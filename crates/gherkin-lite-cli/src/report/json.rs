//! JSON report.
//!
//! The report is a borrowed view over the parsed tree, so serialisation
//! copies nothing but the expanded outlines, which are computed up front.

use std::io::Write;

use eyre::{Context, Result};
use gherkin_lite::{Feature, Scenario, ScenarioKind, Step, Table};
use serde::Serialize;

use super::Expansions;
use crate::run::{FileFailure, Summary};

#[derive(Serialize)]
struct JsonReport<'a> {
    features: Vec<JsonFeature<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonFeature<'a> {
    title: &'a str,
    line: usize,
    tags: &'a [String],
    description: &'a [String],
    background: Option<Vec<JsonStep<'a>>>,
    scenarios: Vec<JsonScenario<'a>>,
}

#[derive(Serialize)]
struct JsonScenario<'a> {
    kind: &'static str,
    title: &'a str,
    line: usize,
    tags: &'a [String],
    steps: Vec<JsonStep<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    examples: Option<Vec<Vec<&'a str>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<Vec<JsonExpanded<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expansion_error: Option<String>,
}

#[derive(Serialize)]
struct JsonExpanded<'a> {
    title: &'a str,
    line: usize,
    steps: Vec<JsonStep<'a>>,
}

#[derive(Serialize)]
struct JsonStep<'a> {
    keyword: &'a str,
    text: &'a str,
    line: usize,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    data: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<Vec<Vec<&'a str>>>,
}

#[derive(Serialize)]
struct JsonError<'a> {
    path: &'a str,
    line: usize,
    message: String,
}

fn table_cells(table: &Table) -> Vec<Vec<&str>> {
    table
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.literal.as_str()).collect())
        .collect()
}

fn steps_view(steps: &[Step]) -> Vec<JsonStep<'_>> {
    steps.iter().map(JsonStep::from).collect()
}

impl<'a> From<&'a Step> for JsonStep<'a> {
    fn from(step: &'a Step) -> Self {
        Self {
            keyword: &step.keyword.literal,
            text: &step.text,
            line: step.anchor_line,
            data: &step.literal_data,
            table: step.inline_table.as_ref().map(table_cells),
        }
    }
}

impl<'a> From<&'a Scenario> for JsonExpanded<'a> {
    fn from(scenario: &'a Scenario) -> Self {
        Self {
            title: &scenario.text,
            line: scenario.anchor_line,
            steps: steps_view(&scenario.steps),
        }
    }
}

impl<'a> JsonScenario<'a> {
    fn new(scenario: &'a ScenarioKind, expansions: &'a Expansions, index: (usize, usize)) -> Self {
        let (kind, examples) = match scenario {
            ScenarioKind::Scenario(_) => ("scenario", None),
            ScenarioKind::Outline(outline) => ("outline", Some(table_cells(&outline.examples))),
        };
        let (expanded, expansion_error) = match expansions.get(index.0, index.1) {
            Some(Ok(scenarios)) => (Some(scenarios.iter().map(JsonExpanded::from).collect()), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };
        Self {
            kind,
            title: scenario.text(),
            line: scenario.anchor_line(),
            tags: scenario.tags(),
            steps: steps_view(scenario.steps()),
            examples,
            expanded,
            expansion_error,
        }
    }
}

impl<'a> JsonFeature<'a> {
    fn new(feature: &'a Feature, feature_index: usize, expansions: &'a Expansions) -> Self {
        Self {
            title: &feature.title,
            line: feature.anchor_line,
            tags: &feature.tags,
            description: &feature.description,
            background: feature
                .background
                .as_ref()
                .map(|background| steps_view(&background.steps)),
            scenarios: feature
                .scenarios
                .iter()
                .enumerate()
                .map(|(index, scenario)| {
                    JsonScenario::new(scenario, expansions, (feature_index, index))
                })
                .collect(),
        }
    }
}

fn errors_view(failures: &[FileFailure]) -> Vec<JsonError<'_>> {
    failures
        .iter()
        .flat_map(|failure| {
            failure.errors.iter().map(|error| JsonError {
                path: failure.path.as_str(),
                line: error.line(),
                message: error.message(),
            })
        })
        .collect()
}

/// Serialise the summary as one pretty-printed JSON document.
pub(crate) fn write(writer: &mut dyn Write, summary: &Summary) -> Result<()> {
    let expansions = Expansions::compute(&summary.features);
    let report = JsonReport {
        features: summary
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| JsonFeature::new(feature, index, &expansions))
            .collect(),
        errors: errors_view(&summary.failures),
    };
    serde_json::to_writer_pretty(&mut *writer, &report).wrap_err("failed to serialise report")?;
    writeln!(writer).wrap_err("failed to terminate report")
}
