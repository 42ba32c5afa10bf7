//! Proportional arc layout.
//!
//! Angles are in degrees with 0° at 12 o'clock, increasing clockwise. Segment
//! `i` starts exactly where segment `i - 1` ends, so drawing them in order
//! yields a ring with no gaps or overlaps.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Degrees in a full ring.
pub const FULL_CIRCLE: f64 = 360.0;

/// How percentages are turned into sweep angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by the actual sum, so the ring always closes.
    #[default]
    Proportional,
    /// Use `percentage / 100` as given, leaving a gap when the sum is below
    /// 100. Sums above 100 fall back to proportional scaling.
    Absolute,
}

impl Normalization {
    /// Degrees per percentage point for entries summing to `sum`.
    fn degrees_per_point(self, sum: f64) -> f64 {
        if sum <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Absolute if sum <= 100.0 => FULL_CIRCLE / 100.0,
            Self::Proportional | Self::Absolute => FULL_CIRCLE / sum,
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proportional => write!(f, "proportional"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}

/// One labelled share of the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
    /// Legend label.
    pub label: String,
    /// Share in percent, nominally 0 to 100.
    pub percentage: f64,
    /// Stroke colour; a palette colour is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ShareEntry {
    /// Create an entry without an explicit colour.
    #[must_use]
    pub fn new(label: impl Into<String>, percentage: f64) -> Self {
        Self {
            label: label.into(),
            percentage,
            color: None,
        }
    }

    /// Set the stroke colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Percentage with negative or non-finite values treated as zero.
    fn weight(&self) -> f64 {
        if self.percentage.is_finite() {
            self.percentage.max(0.0)
        } else {
            0.0
        }
    }
}

/// Geometry of one slice of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSegment<'a> {
    /// Label of the source entry.
    pub label: &'a str,
    /// Rotation of the segment start, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Angular length, in degrees.
    pub sweep: f64,
    /// Visible stroke length along the circle.
    pub dash_length: f64,
    /// `stroke-dashoffset` that hides everything but this segment.
    pub dash_offset: f64,
}

impl ArcSegment<'_> {
    /// Angle at which the segment ends.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }
}

/// Circumference of a ring with the given radius.
#[must_use]
pub fn circumference(radius: f64) -> f64 {
    TAU * radius
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            "radius",
            format!("must be a positive finite number, got {radius}"),
        ))
    }
}

/// Lay out `entries` on a ring of `radius` with proportional normalization.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `radius` is not positive.
pub fn layout(entries: &[ShareEntry], radius: f64) -> Result<Vec<ArcSegment<'_>>> {
    layout_with(entries, radius, Normalization::default())
}

/// Lay out `entries` on a ring of `radius` using the given normalization.
///
/// Empty input yields an empty layout. Entries whose weights are all zero
/// produce zero-length segments at 0°.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `radius` is not positive.
pub fn layout_with(
    entries: &[ShareEntry],
    radius: f64,
    normalization: Normalization,
) -> Result<Vec<ArcSegment<'_>>> {
    check_radius(radius)?;

    let sum: f64 = entries.iter().map(ShareEntry::weight).sum();
    let scale = normalization.degrees_per_point(sum);
    let ring = circumference(radius);
    debug!(
        entries = entries.len(),
        sum,
        scale,
        %normalization,
        "Laying out arc segments"
    );

    let mut start_angle = 0.0;
    let segments = entries
        .iter()
        .map(|entry| {
            let sweep = entry.weight() * scale;
            let dash_length = sweep / FULL_CIRCLE * ring;
            let segment = ArcSegment {
                label: &entry.label,
                start_angle,
                sweep,
                dash_length,
                dash_offset: ring - dash_length,
            };
            trace!(label = %entry.label, start_angle, sweep, "Placed segment");
            start_angle += sweep;
            segment
        })
        .collect();
    Ok(segments)
}
