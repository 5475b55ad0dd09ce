//! Selecting features and scenarios by tag expression or line range.
//!
//! Filters only read the tree. [`FeatureSet::filtered`] applies one and
//! returns a pruned copy.

use crate::model::{Feature, FeatureSet, ScenarioKind};

mod lines;
mod tags;

pub use lines::LineFilter;
pub use tags::TagFilter;

/// Predicate over features and the scenarios they contain.
pub trait Filter {
    /// Whether the feature itself is selected.
    fn matches_feature(&self, feature: &Feature) -> bool;

    /// Whether `scenario`, which belongs to `feature`, is selected.
    fn matches_scenario(&self, feature: &Feature, scenario: &ScenarioKind) -> bool;

    /// The part of `scenario` to keep, or `None` to drop it.
    ///
    /// Keeps the whole scenario when [`matches_scenario`](Self::matches_scenario)
    /// accepts it. Filters that can select part of an outline override this.
    fn select_scenario(&self, feature: &Feature, scenario: &ScenarioKind) -> Option<ScenarioKind> {
        self.matches_scenario(feature, scenario)
            .then(|| scenario.clone())
    }
}

impl FeatureSet {
    /// Keep the scenarios `filter` accepts and drop features left with none.
    ///
    /// A feature that had no scenarios to begin with survives when the
    /// filter accepts the feature itself.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lite::{TagFilter, parse_document};
    ///
    /// let source = "Feature: F\n@smoke\nScenario: A\n\tGiven x\nScenario: B\n\tGiven y\n";
    /// let features = parse_document(source)?;
    /// let filter = TagFilter::parse("@smoke")?;
    /// let selected = features.filtered(&filter);
    /// let titles: Vec<&str> = selected
    ///     .iter()
    ///     .flat_map(|feature| feature.scenarios.iter().map(|s| s.text()))
    ///     .collect();
    /// assert_eq!(titles, ["A"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn filtered(&self, filter: &dyn Filter) -> Self {
        self.iter()
            .filter_map(|feature| {
                let scenarios: Vec<ScenarioKind> = feature
                    .scenarios
                    .iter()
                    .filter_map(|scenario| filter.select_scenario(feature, scenario))
                    .collect();
                let keep = if feature.scenarios.is_empty() {
                    filter.matches_feature(feature)
                } else {
                    !scenarios.is_empty()
                };
                keep.then(|| Feature {
                    scenarios,
                    ..feature.clone()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scenario;

    struct TitleStartsWith(&'static str);

    impl Filter for TitleStartsWith {
        fn matches_feature(&self, feature: &Feature) -> bool {
            feature.title.starts_with(self.0)
        }

        fn matches_scenario(&self, _feature: &Feature, scenario: &ScenarioKind) -> bool {
            scenario.text().starts_with(self.0)
        }
    }

    fn feature(title: &str, scenarios: &[&str]) -> Feature {
        Feature {
            title: title.into(),
            scenarios: scenarios
                .iter()
                .map(|text| {
                    ScenarioKind::Scenario(Scenario {
                        text: (*text).into(),
                        ..Scenario::default()
                    })
                })
                .collect(),
            ..Feature::default()
        }
    }

    #[test]
    fn prunes_scenarios_and_empty_features() {
        let set = FeatureSet::from(vec![
            feature("one", &["keep me", "drop me"]),
            feature("two", &["drop"]),
            feature("keep bare", &[]),
            feature("bare", &[]),
        ]);
        let filtered = set.filtered(&TitleStartsWith("keep"));
        let summary: Vec<(&str, Vec<&str>)> = filtered
            .iter()
            .map(|f| (f.title.as_str(), f.scenarios.iter().map(ScenarioKind::text).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![("one", vec!["keep me"]), ("keep bare", Vec::new())]
        );
    }
}
