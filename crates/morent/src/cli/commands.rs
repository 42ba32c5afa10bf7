//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::booking::{Trip, TripLeg};
use crate::catalog::FilterSelection;
use crate::chart::Normalization;
use crate::error::{Error, Result};

/// Catalog browsing arguments.
#[derive(Debug, Args)]
pub struct CatalogCommand {
    /// Only show these car types (repeatable)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Only show these capacity labels, e.g. "4 People" (repeatable)
    #[arg(short = 'p', long = "capacity", value_name = "CAPACITY")]
    pub capacities: Vec<String>,

    /// Maximum daily price (defaults to the configured slider position)
    #[arg(short, long)]
    pub max_price: Option<f64>,

    /// Show every match instead of the first page
    #[arg(short, long)]
    pub all: bool,

    /// Override the configured page size
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print type and capacity tallies before the list
    #[arg(long)]
    pub facets: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl CatalogCommand {
    /// Build the filter selection, falling back to `default_max_price`.
    ///
    /// The price slider only spans `0..=price_ceiling`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `--max-price` is outside that range.
    pub fn selection(
        &self,
        default_max_price: f64,
        price_ceiling: f64,
    ) -> Result<FilterSelection> {
        let max_price = self.max_price.unwrap_or(default_max_price);
        if !(0.0..=price_ceiling).contains(&max_price) {
            return Err(Error::invalid_argument(
                "max_price",
                format!("must be between 0 and {price_ceiling}, got {max_price}"),
            ));
        }
        Ok(FilterSelection::new(max_price)
            .with_types(self.types.iter().cloned())
            .with_capacities(self.capacities.iter().cloned()))
    }
}

/// Home page arguments.
#[derive(Debug, Args)]
pub struct HomeCommand {
    /// Show every recommendation instead of the first page
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Car detail arguments.
#[derive(Debug, Args)]
pub struct CarCommand {
    /// Catalog id of the car
    pub id: u32,

    /// Show every review instead of the first page
    #[arg(long)]
    pub all_reviews: bool,

    /// Rental length used for the price summary
    #[arg(short, long, default_value = "1")]
    pub days: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Donut chart arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Override the configured ring radius
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Override the configured normalization
    #[arg(short, long, value_enum)]
    pub normalization: Option<NormalizationArg>,

    /// Emit the chart as SVG instead of a segment listing
    #[arg(long)]
    pub svg: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the segment listing
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Dashboard arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Pick-up / drop-off arguments.
#[derive(Debug, Args)]
pub struct TripCommand {
    /// Pick-up city
    #[arg(long)]
    pub pickup_location: Option<String>,

    /// Pick-up date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub pickup_date: Option<NaiveDate>,

    /// Pick-up time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub pickup_time: Option<NaiveTime>,

    /// Drop-off city
    #[arg(long)]
    pub dropoff_location: Option<String>,

    /// Drop-off date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub dropoff_date: Option<NaiveDate>,

    /// Drop-off time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub dropoff_time: Option<NaiveTime>,

    /// Exchange pick-up and drop-off
    #[arg(short, long)]
    pub swap: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl TripCommand {
    /// Assemble the trip described by the flags, swapped if requested.
    #[must_use]
    pub fn trip(&self) -> Trip {
        let trip = Trip::new(
            TripLeg {
                location: self.pickup_location.clone(),
                date: self.pickup_date,
                time: self.pickup_time,
            },
            TripLeg {
                location: self.dropoff_location.clone(),
                date: self.dropoff_date,
                time: self.dropoff_time,
            },
        );
        if self.swap {
            trip.swapped()
        } else {
            trip
        }
    }
}

/// Simulated checkout arguments.
#[derive(Debug, Args)]
pub struct CheckoutCommand {
    /// Catalog id of the car to rent
    pub id: u32,

    /// JSON file with the filled-in checkout form
    #[arg(short = 'F', long, value_name = "FILE")]
    pub form: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Normalization argument for the chart command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalizationArg {
    /// Scale by the actual sum so the ring closes
    Proportional,
    /// Use percentages as given
    Absolute,
}

impl From<NormalizationArg> for Normalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::Proportional => Self::Proportional,
            NormalizationArg::Absolute => Self::Absolute,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_arg_conversion() {
        assert_eq!(
            Normalization::from(NormalizationArg::Proportional),
            Normalization::Proportional
        );
        assert_eq!(
            Normalization::from(NormalizationArg::Absolute),
            Normalization::Absolute
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    fn catalog_cmd(max_price: Option<f64>) -> CatalogCommand {
        CatalogCommand {
            types: vec![],
            capacities: vec![],
            max_price,
            all: false,
            page_size: None,
            facets: false,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_catalog_selection() {
        let cmd = CatalogCommand {
            types: vec!["SUV".to_string()],
            ..catalog_cmd(None)
        };
        let selection = cmd.selection(100.0, 100.0).unwrap();
        assert!(selection.types.contains("SUV"));
        assert!(selection.capacities.is_empty());
        assert!((selection.max_price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_catalog_selection_explicit_price() {
        let cmd = CatalogCommand {
            types: vec![],
            capacities: vec!["2 People".to_string()],
            max_price: Some(60.0),
            all: true,
            page_size: Some(3),
            facets: true,
            format: OutputFormat::Json,
        };
        let selection = cmd.selection(100.0, 100.0).unwrap();
        assert!((selection.max_price - 60.0).abs() < f64::EPSILON);
        assert!(selection.capacities.contains("2 People"));
    }

    #[test]
    fn test_catalog_selection_price_bounds() {
        assert!(catalog_cmd(Some(0.0)).selection(100.0, 100.0).is_ok());
        assert!(catalog_cmd(Some(100.0)).selection(100.0, 100.0).is_ok());

        for price in [500.0, -1.0, f64::NAN] {
            let err = catalog_cmd(Some(price)).selection(100.0, 100.0).unwrap_err();
            assert!(err.is_invalid_argument(), "{price} accepted");
        }
    }

    #[test]
    fn test_catalog_selection_follows_ceiling() {
        let selection = catalog_cmd(Some(150.0)).selection(100.0, 200.0).unwrap();
        assert!((selection.max_price - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trip_swap_flag() {
        let cmd = TripCommand {
            pickup_location: Some("Kota Semarang".to_string()),
            pickup_date: None,
            pickup_time: None,
            dropoff_location: Some("Jakarta".to_string()),
            dropoff_date: None,
            dropoff_time: None,
            swap: true,
            format: OutputFormat::Plain,
        };
        let trip = cmd.trip();
        assert_eq!(trip.pickup.location.as_deref(), Some("Jakarta"));
        assert_eq!(trip.dropoff.location.as_deref(), Some("Kota Semarang"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-07-20").unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
        );
        assert!(parse_date("20 July").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("07:00").unwrap(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap()
        );
        assert!(parse_time("7am").is_err());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
