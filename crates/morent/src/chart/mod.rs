//! Proportional donut chart layout.
//!
//! [`layout`] turns ordered `(label, percentage)` shares into consecutive
//! [`ArcSegment`]s on a ring of fixed radius; [`render_svg`] draws them.
//!
//! # Example
//!
//! ```
//! use morent::chart::{layout, ShareEntry};
//!
//! let shares = vec![ShareEntry::new("SUV", 60.0), ShareEntry::new("MPV", 40.0)];
//! let segments = layout(&shares, 70.0)?;
//!
//! assert_eq!(segments[1].start_angle, segments[0].sweep);
//! # Ok::<(), morent::Error>(())
//! ```

mod arc;
mod svg;

pub use arc::{
    circumference, layout, layout_with, ArcSegment, Normalization, ShareEntry, FULL_CIRCLE,
};
pub use svg::{escape, render_svg, DonutStyle};
