//! Rendering a run summary to stdout.

use std::io::Write;

use eyre::Result;
use gherkin_lite::{ExpandError, FeatureSet, Scenario, ScenarioKind};
use tracing::warn;

use crate::config::ReportFormat;
use crate::run::Summary;

pub mod json;
pub mod text;

type Expansion = Result<Vec<Scenario>, ExpandError>;

/// Outline expansions, indexed like the features and scenarios they belong
/// to. Plain scenarios have no entry.
pub(crate) struct Expansions(Vec<Vec<Option<Expansion>>>);

impl Expansions {
    pub(crate) fn compute(features: &FeatureSet) -> Self {
        let per_feature = features
            .iter()
            .map(|feature| {
                feature
                    .scenarios
                    .iter()
                    .map(|scenario| match scenario {
                        ScenarioKind::Scenario(_) => None,
                        ScenarioKind::Outline(outline) => {
                            let expansion = outline.expand();
                            if let Err(err) = &expansion {
                                warn!(
                                    outline = %outline.text,
                                    line = outline.anchor_line,
                                    error = %err,
                                    "failed to expand scenario outline"
                                );
                            }
                            Some(expansion)
                        }
                    })
                    .collect()
            })
            .collect();
        Self(per_feature)
    }

    pub(crate) fn get(&self, feature: usize, scenario: usize) -> Option<&Expansion> {
        self.0
            .get(feature)
            .and_then(|scenarios| scenarios.get(scenario))
            .and_then(Option::as_ref)
    }
}

/// Write `summary` in the requested format.
///
/// # Errors
///
/// Returns an error when the writer fails or JSON serialisation fails.
pub fn write_report(writer: &mut dyn Write, format: ReportFormat, summary: &Summary) -> Result<()> {
    match format {
        ReportFormat::Text => text::write(writer, summary),
        ReportFormat::Json => json::write(writer, summary),
    }
}
