//! Whole-document behaviour: parse, expand, filter.

use gherkin_lite::{
    Filter, ParseError, ScenarioKind, TagFilter, TokenKind, parse_document,
};
use rstest::rstest;

const OUTLINE: &str = "@outline\n\
                       Feature: numbers\n\
                       \n\
                       \t@smoke\n\
                       \tScenario Outline: check value\n\
                       \t\tThen value is <n>\n\
                       \t\tExamples:\n\
                       \t\t| n |\n\
                       \t\t| 1 |\n\
                       \t\t| 2 |\n";

#[test]
fn parses_single_step_scenario() {
    let features = parse_document("Feature: F\nScenario: S\n\tGiven a step\n")
        .unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    assert_eq!(features.len(), 1);
    let feature = features.iter().next().unwrap_or_else(|| panic!("no feature"));
    assert_eq!(feature.title, "F");
    let [ScenarioKind::Scenario(scenario)] = feature.scenarios.as_slice() else {
        panic!("expected one plain scenario, got {:?}", feature.scenarios);
    };
    assert_eq!(scenario.text, "S");
    let [step] = scenario.steps.as_slice() else {
        panic!("expected one step");
    };
    assert_eq!(step.text, "a step");
    assert!(step.literal_data.is_empty());
    assert_eq!(step.keyword.kind, TokenKind::Given);
}

#[test]
fn extracts_numeric_literal() {
    let features = parse_document("Feature: F\nScenario: S\n\tThen value is 5\n")
        .unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    let step = features
        .iter()
        .flat_map(|feature| feature.scenarios.iter())
        .flat_map(ScenarioKind::steps)
        .next()
        .unwrap_or_else(|| panic!("no step"));
    assert_eq!(step.text, "value is {{d}}");
    assert_eq!(step.literal_data, ["5"]);
}

#[test]
fn expands_outline_rows_into_scenarios() {
    let features = parse_document(OUTLINE).unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    let feature = features.iter().next().unwrap_or_else(|| panic!("no feature"));
    let [ScenarioKind::Outline(outline)] = feature.scenarios.as_slice() else {
        panic!("expected one outline");
    };
    let expanded = outline
        .expand()
        .unwrap_or_else(|err| panic!("expansion failed: {err}"));

    let rendered: Vec<(String, Vec<String>, usize)> = expanded
        .iter()
        .map(|scenario| {
            let step = scenario.steps.first().unwrap_or_else(|| panic!("no step"));
            let prose = step
                .literal_data
                .iter()
                .fold(step.text.clone(), |text, datum| text.replacen("{{d}}", datum, 1));
            (prose, step.literal_data.clone(), scenario.anchor_line)
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("value is 1".to_string(), vec!["1".to_string()], 9),
            ("value is 2".to_string(), vec!["2".to_string()], 10),
        ]
    );
    for scenario in &expanded {
        assert_eq!(scenario.text, outline.text);
        assert_eq!(scenario.tags, outline.tags);
    }
}

#[test]
fn missing_colon_yields_no_features() {
    let failure = parse_document("Feature F\n").err().unwrap_or_else(|| panic!("should fail"));
    assert!(!failure.errors.is_empty());
    assert!(matches!(
        failure.errors.first(),
        Some(ParseError::UnexpectedToken {
            expected: TokenKind::Colon,
            ..
        })
    ));
    assert_eq!(
        failure.errors.first().map(ToString::to_string).as_deref(),
        Some("line 1: expected COLON but found STEPBODY")
    );
}

#[rstest]
#[case(&["smoke"], true)]
#[case(&["smoke", "slow"], false)]
#[case(&[], false)]
#[case(&["slow"], false)]
fn smoke_but_not_slow(#[case] tags: &[&str], #[case] expected: bool) {
    let header: String = tags.iter().map(|tag| format!("@{tag} ")).collect();
    let source = format!("Feature: F\n{header}\nScenario: S\n\tGiven x\n");
    let features = parse_document(&source).unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    let feature = features.iter().next().unwrap_or_else(|| panic!("no feature"));
    let scenario = feature.scenarios.first().unwrap_or_else(|| panic!("no scenario"));
    let filter = TagFilter::parse("@smoke&&~@slow").unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(filter.matches_scenario(feature, scenario), expected);
    assert_eq!(features.filtered(&filter).len(), usize::from(expected));
}

#[test]
fn merges_documents_in_order() {
    let mut features =
        parse_document("Feature: A\n").unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    let more =
        parse_document("Feature: B\n").unwrap_or_else(|failure| panic!("parse failed: {failure}"));
    features.merge(more);
    let titles: Vec<&str> = features.iter().map(|feature| feature.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
}
