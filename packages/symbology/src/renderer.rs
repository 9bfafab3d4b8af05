//! Renderer descriptions for the point and heatmap layers.
//!
//! The point layer uses a unique-value renderer keyed on
//! `activity_symbol_key`; [`style_table`] supplies one entry per canonical
//! [`SymbolKey`]. These types serialize to the JSON shape the rendering
//! engine accepts.

use std::collections::BTreeSet;

use activity_map_activity_models::{AbductionStatus, ActivityKind, SymbolKey};
use serde::Serialize;

use crate::icons;

/// Attribute the point layer's renderer is keyed on.
pub const SYMBOL_KEY_FIELD: &str = "activity_symbol_key";

/// Default heatmap intensity ceiling.
pub const DEFAULT_MAX_PIXEL_INTENSITY: u32 = 50;

/// Default heatmap intensity floor.
pub const DEFAULT_MIN_PIXEL_INTENSITY: u32 = 1;

/// A marker color, either a CSS color string or an RGBA tuple with
/// fractional alpha.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    /// CSS color name or hex string.
    Named(String),
    /// Red, green, blue, alpha.
    Rgba(u8, u8, u8, f64),
}

impl Color {
    fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Outline drawn around a simple marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in points.
    pub width: u32,
}

impl Outline {
    fn black() -> Self {
        Self {
            color: Color::named("black"),
            width: 1,
        }
    }
}

/// Shape of a simple marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Filled circle.
    Circle,
    /// Upward triangle.
    Triangle,
}

/// Symbol drawn for one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MarkerSymbol {
    /// Image marker from a data URL.
    PictureMarker {
        /// `data:` URL of the image.
        url: String,
        /// Width in points.
        width: u32,
        /// Height in points.
        height: u32,
    },
    /// Built-in geometric marker.
    SimpleMarker {
        /// Marker shape.
        style: MarkerStyle,
        /// Fill color.
        color: Color,
        /// Size in points.
        size: u32,
        /// Outline stroke.
        outline: Outline,
    },
}

/// Style entry for one value of the renderer's field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueValueInfo {
    /// Symbol key this entry applies to.
    pub value: SymbolKey,
    /// Legend label.
    pub label: String,
    /// Symbol to draw.
    pub symbol: MarkerSymbol,
}

/// Renderer that picks a symbol per distinct field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueValueRenderer {
    /// Attribute to look values up by.
    pub field: String,
    /// One entry per styled value.
    pub unique_value_infos: Vec<UniqueValueInfo>,
}

/// Density renderer for the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRenderer {
    /// Pixel intensity mapped to the hottest color.
    pub max_pixel_intensity: u32,
    /// Pixel intensity mapped to the coolest color.
    pub min_pixel_intensity: u32,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self {
            max_pixel_intensity: DEFAULT_MAX_PIXEL_INTENSITY,
            min_pixel_intensity: DEFAULT_MIN_PIXEL_INTENSITY,
        }
    }
}

/// Either renderer, tagged the way the engine expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Renderer {
    /// Per-value symbols.
    UniqueValue(UniqueValueRenderer),
    /// Density surface.
    Heatmap(HeatmapRenderer),
}

/// Builds the point layer renderer from [`style_table`].
#[must_use]
pub fn point_renderer() -> Renderer {
    Renderer::UniqueValue(UniqueValueRenderer {
        field: SYMBOL_KEY_FIELD.to_string(),
        unique_value_infos: style_table(),
    })
}

/// The style entry for every canonical symbol key, in legend order.
#[must_use]
pub fn style_table() -> Vec<UniqueValueInfo> {
    let mut infos = Vec::with_capacity(13);

    for kind in ActivityKind::all() {
        if kind.tracks_abduction() {
            for status in AbductionStatus::all() {
                infos.push(UniqueValueInfo {
                    value: SymbolKey::with_outcome(kind.as_ref(), *status),
                    label: format!("{kind} ({})", outcome_label(*status)),
                    symbol: outcome_symbol(*kind, *status),
                });
            }
        } else {
            infos.push(UniqueValueInfo {
                value: SymbolKey::verbatim(kind.as_ref()),
                label: plain_label(*kind).to_string(),
                symbol: plain_symbol(*kind),
            });
        }
    }

    infos
}

/// Returns the canonical keys that have no entry in `infos`.
///
/// A point whose key has no style is drawn with the engine's fallback
/// symbol, so a non-empty result means the table is misconfigured.
#[must_use]
pub fn missing_styles(infos: &[UniqueValueInfo]) -> Vec<SymbolKey> {
    let styled: BTreeSet<&SymbolKey> = infos.iter().map(|info| &info.value).collect();
    let missing: Vec<SymbolKey> = SymbolKey::canonical()
        .into_iter()
        .filter(|key| !styled.contains(key))
        .collect();

    if !missing.is_empty() {
        log::warn!("Style table has no entry for: {missing:?}");
    }

    missing
}

const fn outcome_label(status: AbductionStatus) -> &'static str {
    match status {
        AbductionStatus::Yes => "someone taken",
        AbductionStatus::No => "no one confirmed taken",
        AbductionStatus::Unknown => "unknown result",
    }
}

const fn outcome_fill(status: AbductionStatus) -> &'static str {
    match status {
        AbductionStatus::Yes => "red",
        AbductionStatus::No => "#fcf2fa",
        AbductionStatus::Unknown => "gray",
    }
}

fn outcome_symbol(kind: ActivityKind, status: AbductionStatus) -> MarkerSymbol {
    let fill = outcome_fill(status);
    if kind == ActivityKind::Raid {
        MarkerSymbol::PictureMarker {
            url: icons::hexagon(fill),
            width: 12,
            height: 12,
        }
    } else {
        MarkerSymbol::SimpleMarker {
            style: MarkerStyle::Triangle,
            color: Color::named(fill),
            size: 12,
            outline: Outline::black(),
        }
    }
}

const fn plain_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Raid => "Raid",
        ActivityKind::AbductionAttempt => "Abduction/Attempt",
        ActivityKind::Threat => "Threat",
        ActivityKind::Stakeout => "Stakeout",
        ActivityKind::GatheringStaging => "Gathering / Staging",
        ActivityKind::DrivingObserved => "Driving / Observed",
        ActivityKind::Drone => "Drone",
        ActivityKind::Helicopter => "Helicopter",
        ActivityKind::MiscUnknown => "Misc / Unknown",
    }
}

fn picture(url: String, size: u32) -> MarkerSymbol {
    MarkerSymbol::PictureMarker {
        url,
        width: size,
        height: size,
    }
}

fn plain_symbol(kind: ActivityKind) -> MarkerSymbol {
    match kind {
        ActivityKind::Stakeout => picture(icons::stakeout(), 20),
        ActivityKind::GatheringStaging => picture(icons::bullseye(), 15),
        ActivityKind::Drone => picture(icons::drone(), 18),
        ActivityKind::Helicopter => picture(icons::helicopter(), 15),
        ActivityKind::Threat => MarkerSymbol::SimpleMarker {
            style: MarkerStyle::Circle,
            color: Color::named("red"),
            size: 8,
            outline: Outline::black(),
        },
        ActivityKind::DrivingObserved => MarkerSymbol::SimpleMarker {
            style: MarkerStyle::Circle,
            color: Color::named("black"),
            size: 7,
            outline: Outline {
                color: Color::Rgba(255, 255, 255, 0.7),
                width: 1,
            },
        },
        // Raids and abductions only land here if they stop tracking
        // outcomes; give them the generic gray dot.
        ActivityKind::Raid | ActivityKind::AbductionAttempt | ActivityKind::MiscUnknown => {
            MarkerSymbol::SimpleMarker {
                style: MarkerStyle::Circle,
                color: Color::named("gray"),
                size: 7,
                outline: Outline::black(),
            }
        }
    }
}
