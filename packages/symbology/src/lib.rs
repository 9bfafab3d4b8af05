#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Symbol classification and map styling for activity events.
//!
//! [`classify`] turns a record's activity and abduction outcome into the
//! [`SymbolKey`] the rendering engine styles by. The [`renderer`] module
//! builds the per-key style table and heatmap settings, [`icons`] holds the
//! SVG marker assets, and [`layers`] describes the point and heatmap
//! layers the engine constructs once per dataset.

pub mod icons;
pub mod layers;
pub mod renderer;

use std::str::FromStr as _;

use activity_map_activity_models::{AbductionStatus, ActivityKind, SymbolKey};
use activity_map_record_models::EventProperties;

/// Classifies a record into its style lookup key.
///
/// Raids and abductions are refined by the `abducted_yn` outcome
/// (`Raid_YES`, `Raid_NO`, `Raid_UNKNOWN`, ...). Every other value of
/// `simplified_activity`, including ones outside the known kinds, is used
/// verbatim.
#[must_use]
pub fn classify(properties: &EventProperties) -> SymbolKey {
    classify_raw(&properties.simplified_activity, &properties.abducted_yn)
}

/// Same as [`classify`], taking the two relevant cell values directly.
#[must_use]
pub fn classify_raw(simplified_activity: &str, abducted_yn: &str) -> SymbolKey {
    match ActivityKind::from_str(simplified_activity) {
        Ok(kind) if kind.tracks_abduction() => SymbolKey::with_outcome(
            simplified_activity,
            AbductionStatus::from_raw(abducted_yn),
        ),
        _ => SymbolKey::verbatim(simplified_activity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raid_with_yes_is_refined() {
        assert_eq!(classify_raw("Raid", "Yes").as_str(), "Raid_YES");
    }

    #[test]
    fn raid_with_blank_outcome_is_unknown() {
        assert_eq!(classify_raw("Raid", "").as_str(), "Raid_UNKNOWN");
    }

    #[test]
    fn abduction_outcome_is_case_insensitive() {
        assert_eq!(
            classify_raw("Abduction/Attempt", "no").as_str(),
            "Abduction/Attempt_NO"
        );
        assert_eq!(
            classify_raw("Abduction/Attempt", "YES").as_str(),
            "Abduction/Attempt_YES"
        );
        assert_eq!(
            classify_raw("Abduction/Attempt", "n/a").as_str(),
            "Abduction/Attempt_UNKNOWN"
        );
    }

    #[test]
    fn drone_is_verbatim() {
        assert_eq!(classify_raw("Drone", "Yes").as_str(), "Drone");
    }

    #[test]
    fn plain_kinds_ignore_outcome() {
        for kind in ActivityKind::all().iter().filter(|k| !k.tracks_abduction()) {
            for outcome in ["", "yes", "NO", "garbage"] {
                assert_eq!(
                    classify_raw(kind.as_ref(), outcome).as_str(),
                    kind.as_ref(),
                    "{kind} with outcome {outcome:?}"
                );
            }
        }
    }

    #[test]
    fn tracked_kinds_end_in_exactly_one_suffix() {
        for kind in ActivityKind::all().iter().filter(|k| k.tracks_abduction()) {
            for outcome in ["", "yes", "Yes", "NO", "unknown", "  no "] {
                let key = classify_raw(kind.as_ref(), outcome);
                let suffixes = AbductionStatus::all()
                    .iter()
                    .filter(|s| key.as_str().ends_with(s.suffix()))
                    .count();
                assert_eq!(suffixes, 1, "{key} for outcome {outcome:?}");
                assert!(key.as_str().starts_with(kind.as_ref()));
            }
        }
    }

    #[test]
    fn unrecognized_activity_passes_through() {
        assert_eq!(classify_raw("raid", "Yes").as_str(), "raid");
        assert_eq!(classify_raw("", "").as_str(), "");
    }

    #[test]
    fn classify_reads_record_properties() {
        let properties = EventProperties {
            simplified_activity: "Raid".to_string(),
            abducted_yn: "No".to_string(),
            ..EventProperties::default()
        };
        assert_eq!(classify(&properties).as_str(), "Raid_NO");
    }
}
