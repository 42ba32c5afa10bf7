//! SVG rendering of the donut chart.
//!
//! Each segment is a full `<circle>` whose dash pattern exposes only its own
//! arc, rotated into place around the centre.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::arc::{circumference, layout_with, Normalization, ShareEntry};
use crate::error::Result;

/// Space between the ring and the edge of the canvas.
const MARGIN: f64 = 12.0;

/// Fallback colours, dark to light.
const PALETTE: [&str; 5] = ["#0D3559", "#175D9C", "#2185DE", "#63A9E8", "#A6CEF2"];

/// Ring geometry and angle policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutStyle {
    /// Radius of the stroke centre line.
    pub radius: f64,
    /// Width of the ring stroke.
    pub stroke_width: f64,
    /// How percentages map to angles.
    pub normalization: Normalization,
}

impl Default for DonutStyle {
    fn default() -> Self {
        Self {
            radius: 70.0,
            stroke_width: 28.0,
            normalization: Normalization::Proportional,
        }
    }
}

impl DonutStyle {
    /// Width and height of the square canvas.
    #[must_use]
    pub fn size(&self) -> f64 {
        2.0 * self.center()
    }

    /// Coordinate of the ring centre on both axes.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.radius + self.stroke_width / 2.0 + MARGIN
    }
}

/// Escape text for inclusion in SVG markup.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render `entries` as a donut with a two-line caption in the hole.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if the style radius is not positive.
pub fn render_svg(
    entries: &[ShareEntry],
    style: &DonutStyle,
    title: &str,
    subtitle: &str,
) -> Result<String> {
    let segments = layout_with(entries, style.radius, style.normalization)?;
    let ring = circumference(style.radius);
    let size = style.size();
    let c = style.center();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.2} {size:.2}">"##
    );
    for (i, (segment, entry)) in segments.iter().zip(entries).enumerate() {
        let color = entry
            .color
            .as_deref()
            .unwrap_or(PALETTE[i % PALETTE.len()]);
        // SVG strokes begin at 3 o'clock; shift back a quarter turn.
        let rotation = segment.start_angle - 90.0;
        let _ = writeln!(
            svg,
            r##"  <circle cx="{c:.2}" cy="{c:.2}" r="{r:.2}" fill="none" stroke="{color}" stroke-width="{w:.2}" stroke-dasharray="{ring:.4}" stroke-dashoffset="{offset:.4}" transform="rotate({rotation:.4} {c:.2} {c:.2})"><title>{label}</title></circle>"##,
            r = style.radius,
            w = style.stroke_width,
            color = escape(color),
            offset = segment.dash_offset,
            label = escape(segment.label),
        );
    }
    let _ = writeln!(
        svg,
        r##"  <text x="{c:.2}" y="{y:.2}" text-anchor="middle" font-size="24" font-weight="bold" fill="#1A202C">{title}</text>"##,
        y = c - 2.0,
        title = escape(title),
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{c:.2}" y="{y:.2}" text-anchor="middle" font-size="14" fill="#90A3BF">{subtitle}</text>"##,
        y = c + 18.0,
        subtitle = escape(subtitle),
    );
    svg.push_str("</svg>\n");
    Ok(svg)
}
