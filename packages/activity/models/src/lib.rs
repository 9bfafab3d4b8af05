#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Activity kind taxonomy and symbol key types.
//!
//! Every event record in the host table carries a `simplified_activity`
//! value drawn from the closed set in [`ActivityKind`]. Two of those kinds
//! additionally track whether anyone was taken, which refines them into
//! the [`SymbolKey`] used to pick a map style.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The closed set of activity kinds an event record can be classified as.
///
/// The string forms match the host table's `simplified_activity` values
/// exactly, including the slashes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ActivityKind {
    /// Enforcement raid on a residence or business
    #[serde(rename = "Raid")]
    #[strum(serialize = "Raid")]
    Raid,
    /// Someone taken, or an attempt to take someone
    #[serde(rename = "Abduction/Attempt")]
    #[strum(serialize = "Abduction/Attempt")]
    AbductionAttempt,
    /// Verbal or physical threat
    #[serde(rename = "Threat")]
    #[strum(serialize = "Threat")]
    Threat,
    /// Agents waiting at a fixed location
    #[serde(rename = "Stakeout")]
    #[strum(serialize = "Stakeout")]
    Stakeout,
    /// Agents or vehicles gathering before an operation
    #[serde(rename = "Gathering/Staging")]
    #[strum(serialize = "Gathering/Staging")]
    GatheringStaging,
    /// Vehicles seen driving or parked
    #[serde(rename = "Driving/Observed")]
    #[strum(serialize = "Driving/Observed")]
    DrivingObserved,
    /// Drone overhead
    #[serde(rename = "Drone")]
    #[strum(serialize = "Drone")]
    Drone,
    /// Helicopter overhead
    #[serde(rename = "Helicopter")]
    #[strum(serialize = "Helicopter")]
    Helicopter,
    /// Anything not fitting the other kinds
    #[serde(rename = "Misc/Unknown")]
    #[strum(serialize = "Misc/Unknown")]
    MiscUnknown,
}

impl ActivityKind {
    /// Returns all variants of this enum, in legend order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Raid,
            Self::AbductionAttempt,
            Self::Threat,
            Self::Stakeout,
            Self::GatheringStaging,
            Self::DrivingObserved,
            Self::Drone,
            Self::Helicopter,
            Self::MiscUnknown,
        ]
    }

    /// Whether records of this kind are split by abduction outcome when
    /// choosing a symbol.
    #[must_use]
    pub const fn tracks_abduction(self) -> bool {
        matches!(self, Self::Raid | Self::AbductionAttempt)
    }
}

/// Outcome recorded in the tri-state `abducted_yn` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AbductionStatus {
    /// Someone was taken
    Yes,
    /// No one was confirmed taken
    No,
    /// Blank, missing, or any other value
    Unknown,
}

impl AbductionStatus {
    /// Interprets a raw `abducted_yn` cell. Case and surrounding whitespace
    /// are ignored; anything other than yes/no is [`Self::Unknown`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            _ => Self::Unknown,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Yes, Self::No, Self::Unknown]
    }

    /// Suffix appended to the activity name in a [`SymbolKey`].
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Yes => "_YES",
            Self::No => "_NO",
            Self::Unknown => "_UNKNOWN",
        }
    }
}

/// The rendering key a style table is looked up by.
///
/// Usually one of the canonical keys from [`SymbolKey::canonical`], but an
/// unrecognized `simplified_activity` passes through verbatim, so this is a
/// string rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolKey(String);

impl SymbolKey {
    /// Key for an activity that is not split by outcome, or for a raw value
    /// outside the known kinds.
    #[must_use]
    pub fn verbatim(activity: &str) -> Self {
        Self(activity.to_string())
    }

    /// Key for an activity refined by abduction outcome, e.g. `Raid_YES`.
    #[must_use]
    pub fn with_outcome(activity: &str, status: AbductionStatus) -> Self {
        Self(format!("{activity}{}", status.suffix()))
    }

    /// The 13 keys a complete style table must cover.
    #[must_use]
    pub fn canonical() -> Vec<Self> {
        let mut keys = Vec::with_capacity(13);
        for kind in ActivityKind::all() {
            if kind.tracks_abduction() {
                keys.extend(
                    AbductionStatus::all()
                        .iter()
                        .map(|status| Self::with_outcome(kind.as_ref(), *status)),
                );
            } else {
                keys.push(Self::verbatim(kind.as_ref()));
            }
        }
        keys
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SymbolKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
