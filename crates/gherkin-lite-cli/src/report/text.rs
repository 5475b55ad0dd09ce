//! Indented, human-readable report.

use std::io::Write;

use eyre::{Context, Result};
use gherkin_lite::{Feature, ScenarioKind, Step, Table};

use super::Expansions;
use crate::run::Summary;

const INDENT: &str = "  ";

fn write_line(writer: &mut dyn Write, depth: usize, text: &str) -> Result<()> {
    writeln!(writer, "{}{text}", INDENT.repeat(depth))
        .wrap_err_with(|| format!("failed to write report line '{text}'"))
}

fn format_tags(tags: &[String]) -> String {
    let tags: Vec<String> = tags.iter().map(|tag| format!("@{tag}")).collect();
    format!("Tags: [{}]", tags.join(", "))
}

fn write_table(writer: &mut dyn Write, depth: usize, table: &Table) -> Result<()> {
    for row in table.rows() {
        let cells: Vec<&str> = row.iter().map(|cell| cell.literal.as_str()).collect();
        write_line(writer, depth, &format!("| {} |", cells.join(" | ")))?;
    }
    Ok(())
}

fn write_steps(writer: &mut dyn Write, depth: usize, steps: &[Step]) -> Result<()> {
    for step in steps {
        let mut line = format!("Step: {} - {}", step.keyword.literal, step.text);
        if !step.literal_data.is_empty() {
            line.push_str(&format!(" {:?}", step.literal_data));
        }
        write_line(writer, depth, &line)?;
        if let Some(table) = &step.inline_table {
            write_table(writer, depth + 1, table)?;
        }
    }
    Ok(())
}

fn write_scenario(
    writer: &mut dyn Write,
    scenario: &ScenarioKind,
    expansions: &Expansions,
    (feature_index, scenario_index): (usize, usize),
) -> Result<()> {
    let label = match scenario {
        ScenarioKind::Scenario(_) => "Scenario",
        ScenarioKind::Outline(_) => "Scenario Outline",
    };
    write_line(
        writer,
        1,
        &format!("{label}: {} (line {})", scenario.text(), scenario.anchor_line()),
    )?;
    if !scenario.tags().is_empty() {
        write_line(writer, 2, &format_tags(scenario.tags()))?;
    }
    write_steps(writer, 2, scenario.steps())?;

    let ScenarioKind::Outline(outline) = scenario else {
        return Ok(());
    };
    write_line(writer, 2, "Examples:")?;
    write_table(writer, 3, &outline.examples)?;
    match expansions.get(feature_index, scenario_index) {
        Some(Ok(expanded)) => {
            write_line(writer, 2, "Expanded:")?;
            for concrete in expanded {
                write_line(writer, 3, &format!("{}:{}", concrete.text, concrete.anchor_line))?;
                write_steps(writer, 4, &concrete.steps)?;
            }
        }
        Some(Err(err)) => write_line(writer, 2, &format!("Expansion failed: {err}"))?,
        None => {}
    }
    Ok(())
}

fn write_feature(
    writer: &mut dyn Write,
    feature: &Feature,
    feature_index: usize,
    expansions: &Expansions,
) -> Result<()> {
    write_line(
        writer,
        0,
        &format!("Feature: {} (line {})", feature.title, feature.anchor_line),
    )?;
    if !feature.tags.is_empty() {
        write_line(writer, 1, &format_tags(&feature.tags))?;
    }
    if !feature.description.is_empty() {
        write_line(writer, 1, "Description:")?;
        for line in &feature.description {
            write_line(writer, 2, line)?;
        }
    }
    if let Some(background) = &feature.background {
        write_line(writer, 1, "Background:")?;
        write_steps(writer, 2, &background.steps)?;
    }
    for (scenario_index, scenario) in feature.scenarios.iter().enumerate() {
        write_scenario(writer, scenario, expansions, (feature_index, scenario_index))?;
    }
    Ok(())
}

/// Write the text report: every feature, then any parse errors.
pub(crate) fn write(writer: &mut dyn Write, summary: &Summary) -> Result<()> {
    let expansions = Expansions::compute(&summary.features);
    for (index, feature) in summary.features.iter().enumerate() {
        if index > 0 {
            writeln!(writer).wrap_err("failed to separate features")?;
        }
        write_feature(writer, feature, index, &expansions)?;
    }

    if summary.failures.is_empty() {
        return Ok(());
    }
    if !summary.features.is_empty() {
        writeln!(writer).wrap_err("failed to separate features and errors")?;
    }
    writeln!(writer, "Parser Errors:").wrap_err("failed to write error heading")?;
    for failure in &summary.failures {
        for error in &failure.errors {
            writeln!(writer, "{}:{} {}", failure.path, error.line(), error.message())
                .wrap_err_with(|| format!("failed to write parse error for {}", failure.path))?;
        }
    }
    Ok(())
}
