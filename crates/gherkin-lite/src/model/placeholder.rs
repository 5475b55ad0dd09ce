//! Placeholder substitution for Scenario Outline steps.
//!
//! Step text carries three placeholder shapes: `{{d}}` and `{{s}}` mark
//! literal data extracted by the parser, while `{{<name>}}` marks a reference
//! to an Examples column. Literal data and inline table cells keep the raw
//! `<name>` form.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ExpandError;

/// Text placeholder for a numeric literal.
pub const NUMBER_PLACEHOLDER: &str = "{{d}}";
/// Text placeholder for a string literal.
pub const STRING_PLACEHOLDER: &str = "{{s}}";

/// Matches any step-text placeholder. Group 1 is `d`/`s`, group 2 an Examples
/// column name.
static STEP_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(?:([ds])|<([^>]*)>)\}\}")
        .unwrap_or_else(|_| unreachable!("step placeholder regex is valid"))
});

/// Matches a raw `<name>` reference inside data or table cells.
static RAW_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^>\s][^>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Values of one Examples row keyed by column name, plus the header order
/// for diagnostics.
pub(crate) struct RowValues<'a> {
    pub(crate) columns: &'a [&'a str],
    pub(crate) values: &'a HashMap<String, String>,
}

impl RowValues<'_> {
    fn lookup(&self, name: &str) -> Result<&str, ExpandError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ExpandError::UnknownPlaceholder {
                placeholder: name.to_string(),
                available_columns: self.columns.join(", "),
            })
    }
}

/// Returns `true` when `text` holds a placeholder opener or closer.
pub(crate) fn has_delimiter(text: &str) -> bool {
    text.contains("{{") || text.contains("}}")
}

/// Returns `true` for a non-empty run of ASCII digits.
pub(crate) fn is_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Resolve every `{{<name>}}` in `text` and realign `literal_data`.
///
/// Numeric values become `{{d}}` with the digits spliced into the data at the
/// position of the placeholder; other values are inserted as prose. Raw
/// `<name>` references in the existing data are substituted on the way.
pub(crate) fn substitute_step(
    text: &str,
    literal_data: &[String],
    row: &RowValues<'_>,
) -> Result<(String, Vec<String>), ExpandError> {
    let mut rewritten = String::with_capacity(text.len());
    let mut data = Vec::with_capacity(literal_data.len());
    let mut original = literal_data.iter();
    let mut tail = 0;

    for caps in STEP_PLACEHOLDER_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        rewritten.push_str(text.get(tail..whole.start()).unwrap_or_default());
        tail = whole.end();

        if let Some(name) = caps.get(2) {
            let value = row.lookup(name.as_str())?;
            if is_number(value) {
                rewritten.push_str(NUMBER_PLACEHOLDER);
                data.push(value.to_string());
            } else if has_delimiter(value) {
                return Err(ExpandError::ReservedDelimiter {
                    column: name.as_str().to_string(),
                    value: value.to_string(),
                });
            } else {
                rewritten.push_str(value);
            }
        } else {
            rewritten.push_str(whole.as_str());
            if let Some(datum) = original.next() {
                data.push(substitute_known(datum, row.values));
            }
        }
    }
    rewritten.push_str(text.get(tail..).unwrap_or_default());
    data.extend(original.map(|datum| substitute_known(datum, row.values)));
    Ok((rewritten, data))
}

/// Replace each `<name>` whose name is a known column; leave others verbatim.
pub(crate) fn substitute_known(text: &str, values: &HashMap<String, String>) -> String {
    RAW_PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| values.get(name.as_str()))
                .map_or_else(|| whole.to_string(), Clone::clone)
        })
        .into_owned()
}

/// Number of `{{d}}`/`{{s}}` placeholders in step text.
#[cfg(test)]
fn count_data_placeholders(text: &str) -> usize {
    STEP_PLACEHOLDER_RE
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[rstest]
    #[case(
        &[("with", "4"), ("data", "5")],
        "There is step {{d}} an {{s}}",
        &["4", "5"],
    )]
    #[case(
        &[("with", "and"), ("data", "string")],
        "There is step and an {{s}}",
        &["string"],
    )]
    fn substitutes_reference_and_realigns_data(
        #[case] pairs: &[(&str, &str)],
        #[case] expected_text: &str,
        #[case] expected_data: &[&str],
    ) {
        let values = values(pairs);
        let row = RowValues {
            columns: &["with", "data"],
            values: &values,
        };
        let result = substitute_step(
            "There is step {{<with>}} an {{s}}",
            &strings(&["<data>"]),
            &row,
        );
        assert_eq!(
            result,
            Ok((expected_text.to_string(), strings(expected_data)))
        );
    }

    #[test]
    fn splices_numbers_between_existing_data() {
        let values = values(&[("n", "42")]);
        let row = RowValues {
            columns: &["n"],
            values: &values,
        };
        let result = substitute_step(
            "{{s}} then {{<n>}} then {{d}} and {{<n>}}",
            &strings(&["a", "7"]),
            &row,
        );
        let Ok((text, data)) = result else {
            panic!("substitution should succeed");
        };
        assert_eq!(text, "{{s}} then {{d}} then {{d}} and {{d}}");
        assert_eq!(data, strings(&["a", "42", "7", "42"]));
        assert_eq!(count_data_placeholders(&text), data.len());
    }

    #[test]
    fn unknown_reference_lists_columns() {
        let values = values(&[("a", "1"), ("b", "2")]);
        let row = RowValues {
            columns: &["a", "b"],
            values: &values,
        };
        let result = substitute_step("value {{<missing>}}", &[], &row);
        assert_eq!(
            result,
            Err(ExpandError::UnknownPlaceholder {
                placeholder: "missing".into(),
                available_columns: "a, b".into(),
            })
        );
    }

    #[rstest]
    #[case("{{s}}")]
    #[case("a }} b")]
    #[case("{{<other>}}")]
    fn rejects_values_that_read_as_placeholders(#[case] value: &str) {
        let values = values(&[("with", value)]);
        let row = RowValues {
            columns: &["with"],
            values: &values,
        };
        let result = substitute_step("step {{<with>}} here", &[], &row);
        assert_eq!(
            result,
            Err(ExpandError::ReservedDelimiter {
                column: "with".into(),
                value: value.into(),
            })
        );
    }

    #[test]
    fn single_braces_in_values_are_prose() {
        let values = values(&[("with", "{x}")]);
        let row = RowValues {
            columns: &["with"],
            values: &values,
        };
        let result = substitute_step("step {{<with>}} here", &[], &row);
        assert_eq!(result, Ok(("step {x} here".to_string(), Vec::new())));
    }

    #[rstest]
    #[case("<with>", "4")]
    #[case("x <with> <other> y", "x 4 <other> y")]
    #[case("< with>", "< with>")]
    #[case("no refs", "no refs")]
    fn substitutes_only_known_raw_references(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(substitute_known(input, &values(&[("with", "4")])), expected);
    }

    #[rstest]
    #[case("5", true)]
    #[case("0042", true)]
    #[case("", false)]
    #[case("4a", false)]
    #[case("-1", false)]
    fn recognises_numbers(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_number(value), expected);
    }
}
