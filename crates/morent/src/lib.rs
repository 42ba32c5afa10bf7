//! `morent` - Core of a car-rental marketplace demo
//!
//! This library provides the catalog filter and pagination engine, the donut
//! chart arc layout, and the trip and checkout model behind the `morent` CLI.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod booking;
pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;

pub use booking::{swap_pair, Checkout, RentalSummary, Trip, TripLeg};
pub use catalog::{filter, paginate, CarRecord, Catalog, FilterSelection, FilteredPage, PageSize};
pub use chart::{layout, layout_with, ArcSegment, Normalization, ShareEntry};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
