//! Command-line interface for morent.
//!
//! This module provides the CLI structure for the `morent` binary, which
//! plays the part of the presentation layer: it turns flags into filter
//! selections, trip legs and chart settings, and prints what the core returns.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CarCommand, CatalogCommand, ChartCommand, CheckoutCommand, ConfigCommand, DashboardCommand,
    HomeCommand, NormalizationArg, OutputFormat, TripCommand,
};

/// morent - Browse and rent cars from the demo marketplace
///
/// Filters the catalog, shows car details and reviews, simulates a checkout
/// and renders the rental-share chart from the built-in mock dataset.
#[derive(Debug, Parser)]
#[command(name = "morent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter and page through the catalog
    Catalog(CatalogCommand),

    /// Show popular and recommended cars
    Home(HomeCommand),

    /// Show one car with its price summary and reviews
    Car(CarCommand),

    /// Lay out or render the top-rentals donut chart
    Chart(ChartCommand),

    /// Show rental shares and recent transactions
    Dashboard(DashboardCommand),

    /// Fill in pick-up and drop-off, optionally swapping them
    Trip(TripCommand),

    /// Run a simulated checkout from a form file
    Checkout(CheckoutCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
