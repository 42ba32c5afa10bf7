//! Configuration management for morent.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::PageSize;
use crate::chart::{DonutStyle, Normalization};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "morent";

/// Environment variable prefix.
const ENV_PREFIX: &str = "MORENT_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MORENT_`)
/// 2. TOML config file at `~/.config/morent/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// Review list configuration.
    pub reviews: ReviewConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
}

/// Catalog browsing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON dataset to load instead of the built-in one.
    pub data_path: Option<PathBuf>,
    /// Cars per page on the category grid.
    pub page_size: usize,
    /// Cars per page in the home page recommendations.
    pub recommendation_page_size: usize,
    /// Initial position of the price slider.
    pub default_max_price: f64,
    /// Upper end of the price slider.
    pub price_ceiling: f64,
}

/// Review list configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Reviews shown before "Show All".
    pub page_size: usize,
}

/// Donut chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Ring radius.
    pub radius: f64,
    /// Ring stroke width.
    pub stroke_width: f64,
    /// How percentages map to angles.
    pub normalization: Normalization,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: None, // Built-in dataset
            page_size: 9,
            recommendation_page_size: 8,
            default_max_price: 100.0,
            price_ceiling: 100.0,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { page_size: 2 }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        let style = DonutStyle::default();
        Self {
            radius: style.radius,
            stroke_width: style.stroke_width,
            normalization: style.normalization,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("catalog.page_size", self.catalog.page_size),
            (
                "catalog.recommendation_page_size",
                self.catalog.recommendation_page_size,
            ),
            ("reviews.page_size", self.reviews.page_size),
        ] {
            if size == 0 {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be greater than 0"),
                });
            }
        }

        let ceiling = self.catalog.price_ceiling;
        if !(ceiling.is_finite() && ceiling > 0.0) {
            return Err(Error::ConfigValidation {
                message: format!("catalog.price_ceiling must be positive, got {ceiling}"),
            });
        }

        let max_price = self.catalog.default_max_price;
        if !(0.0..=ceiling).contains(&max_price) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "catalog.default_max_price ({max_price}) must be between 0 and price_ceiling ({ceiling})"
                ),
            });
        }

        for (name, value) in [
            ("chart.radius", self.chart.radius),
            ("chart.stroke_width", self.chart.stroke_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be positive, got {value}"),
                });
            }
        }

        Ok(())
    }

    /// External dataset path, if configured.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        self.catalog.data_path.as_deref()
    }

    /// Page size of the category grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the configured size is zero.
    pub fn catalog_page_size(&self) -> Result<PageSize> {
        PageSize::new(self.catalog.page_size)
    }

    /// Page size of the home page recommendations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the configured size is zero.
    pub fn recommendation_page_size(&self) -> Result<PageSize> {
        PageSize::new(self.catalog.recommendation_page_size)
    }

    /// Page size of the review list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the configured size is zero.
    pub fn review_page_size(&self) -> Result<PageSize> {
        PageSize::new(self.reviews.page_size)
    }

    /// Donut style built from the chart section.
    #[must_use]
    pub fn donut_style(&self) -> DonutStyle {
        DonutStyle {
            radius: self.chart.radius,
            stroke_width: self.chart.stroke_width,
            normalization: self.chart.normalization,
        }
    }
}
