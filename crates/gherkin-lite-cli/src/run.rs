//! One invocation: discover, parse, filter, report.

use std::fs;
use std::io::Write;
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{Context, Result};
use gherkin_lite::{FeatureSet, LineFilter, ParseError, TagFilter, parse_document};
use tracing::{debug, info, warn};

use crate::config::CliConfig;
use crate::discovery::collect_feature_files;
use crate::error::CliError;
use crate::report::write_report;

/// Parse errors recorded for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// File that failed to parse.
    pub path: Utf8PathBuf,
    /// Every error recorded for it, in order.
    pub errors: Vec<ParseError>,
}

/// Merged result of parsing a batch of files.
#[derive(Debug, Default)]
pub struct Summary {
    /// Features from every file that parsed cleanly.
    pub features: FeatureSet,
    /// Files that did not.
    pub failures: Vec<FileFailure>,
}

impl Summary {
    /// Fold one file's source into the summary.
    pub fn add_source(&mut self, path: &Utf8Path, source: &str) {
        match parse_document(source) {
            Ok(features) => {
                debug!(path = %path, features = features.len(), "parsed feature file");
                self.features.merge(features);
            }
            Err(failure) => {
                warn!(path = %path, errors = failure.errors.len(), "failed to parse feature file");
                self.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    errors: failure.errors,
                });
            }
        }
    }

    /// Returns `true` when at least one file failed to parse.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Tag and line filters requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    tags: Option<TagFilter>,
    lines: Option<LineFilter>,
}

impl Filters {
    /// Parse the optional `--tags` and `--lines` values.
    ///
    /// # Errors
    ///
    /// [`CliError::Filter`] when either value is malformed.
    pub fn parse(tags: Option<&str>, lines: Option<&str>) -> Result<Self, CliError> {
        Ok(Self {
            tags: tags.map(TagFilter::parse).transpose()?,
            lines: lines.map(LineFilter::parse).transpose()?,
        })
    }

    /// Apply every configured filter in turn.
    #[must_use]
    pub fn apply(&self, features: FeatureSet) -> FeatureSet {
        let features = match &self.tags {
            Some(filter) => features.filtered(filter),
            None => features,
        };
        match &self.lines {
            Some(filter) => features.filtered(filter),
            None => features,
        }
    }
}

/// What to run.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Feature files or directories to search.
    pub paths: Vec<Utf8PathBuf>,
    /// Tag expression such as `@smoke&&~@slow`.
    pub tags: Option<String>,
    /// Line or line range such as `12` or `10-20`.
    pub lines: Option<String>,
}

/// Read and parse every file.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn parse_files(paths: &[Utf8PathBuf]) -> Result<Summary> {
    let mut summary = Summary::default();
    for path in paths {
        let source =
            fs::read_to_string(path).wrap_err_with(|| format!("failed to read {path}"))?;
        summary.add_source(path, &source);
    }
    Ok(summary)
}

/// Run one request and write the report to `out`.
///
/// Parse failures do not make this fail; they are part of the returned
/// summary and of the report.
///
/// # Errors
///
/// Returns a [`CliError`] for malformed filters or missing paths, and an
/// I/O error when reading files or writing the report fails.
pub fn execute(request: &Request, config: &CliConfig, out: &mut dyn Write) -> Result<Summary> {
    let started = Instant::now();
    let filters = Filters::parse(request.tags.as_deref(), request.lines.as_deref())?;
    let files = collect_feature_files(&request.paths)?;

    let mut summary = parse_files(&files)?;
    summary.features = filters.apply(std::mem::take(&mut summary.features));
    write_report(out, config.format, &summary)?;

    info!(
        files = files.len(),
        features = summary.features.len(),
        failures = summary.failures.len(),
        elapsed = ?started.elapsed(),
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SOURCE: &str = "Feature: F\n\
                          @smoke\n\
                          Scenario: fast\n\
                          \tGiven x\n\
                          @slow\n\
                          Scenario: slow\n\
                          \tGiven y\n";

    fn summary_of(sources: &[(&str, &str)]) -> Summary {
        let mut summary = Summary::default();
        for (path, source) in sources {
            summary.add_source(Utf8Path::new(path), source);
        }
        summary
    }

    #[test]
    fn merges_successes_and_records_failures() {
        let summary = summary_of(&[
            ("a.feature", "Feature: A\n"),
            ("bad.feature", "Feature A\n"),
            ("b.feature", "Feature: B\n"),
        ]);
        let titles: Vec<&str> = summary.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert!(summary.has_failures());
        let failed: Vec<&str> = summary.failures.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(failed, ["bad.feature"]);
    }

    #[rstest]
    #[case(None, None, &["fast", "slow"])]
    #[case(Some("@smoke"), None, &["fast"])]
    #[case(Some("~@smoke"), None, &["slow"])]
    #[case(None, Some("6"), &["slow"])]
    #[case(Some("@smoke"), Some("6"), &[])]
    fn applies_filters_in_turn(
        #[case] tags: Option<&str>,
        #[case] lines: Option<&str>,
        #[case] expected: &[&str],
    ) {
        let summary = summary_of(&[("f.feature", SOURCE)]);
        let filters =
            Filters::parse(tags, lines).unwrap_or_else(|err| panic!("filters should parse: {err}"));
        let filtered = filters.apply(summary.features);
        let titles: Vec<&str> = filtered
            .iter()
            .flat_map(|feature| feature.scenarios.iter().map(|s| s.text()))
            .collect();
        assert_eq!(titles, expected);
    }

    #[rstest]
    #[case(Some("smoke"), None)]
    #[case(None, Some("3-1"))]
    fn rejects_malformed_filters(#[case] tags: Option<&str>, #[case] lines: Option<&str>) {
        assert!(matches!(Filters::parse(tags, lines), Err(CliError::Filter(_))));
    }
}
