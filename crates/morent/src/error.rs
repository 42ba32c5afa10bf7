//! Error types for morent.
//!
//! This module defines all error types used throughout the morent crate.
//! The catalog and chart cores only ever fail with [`Error::InvalidArgument`];
//! the remaining variants belong to data loading, configuration and checkout.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for morent operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Argument Errors ===
    /// A caller passed a value outside the operation's domain.
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of the violated constraint.
        message: String,
    },

    // === Catalog Errors ===
    /// No car with the requested identifier exists.
    #[error("no car with id {0}")]
    CarNotFound(u32),

    /// Failed to read a catalog file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogLoad {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog data could not be parsed.
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// The catalog parsed but its records are inconsistent.
    #[error("invalid catalog: {message}")]
    CatalogInvalid {
        /// Description of the inconsistency.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Checkout Errors ===
    /// A simulated checkout could not be confirmed.
    #[error("checkout incomplete: {message}")]
    Checkout {
        /// What is still missing.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for morent operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid argument error.
    #[must_use]
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Create a new catalog consistency error.
    #[must_use]
    pub fn catalog_invalid(message: impl Into<String>) -> Self {
        Self::CatalogInvalid {
            message: message.into(),
        }
    }

    /// Create a new checkout error.
    #[must_use]
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Check if this error is a rejected argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this error is a catalog lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CarNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("page_size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument `page_size`: must be at least 1"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_car_not_found() {
        let err = Error::CarNotFound(42);
        assert_eq!(err.to_string(), "no car with id 42");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_catalog_load_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::CatalogLoad {
            path: PathBuf::from("/data/cars.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/cars.json"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::CatalogParse(_)));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_checkout_error_display() {
        let err = Error::checkout("terms and conditions not accepted");
        assert!(err.to_string().contains("terms and conditions"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "radius must be positive".to_string(),
        };
        assert!(err.to_string().contains("radius must be positive"));
    }

    #[test]
    fn test_catalog_invalid_display() {
        let err = Error::catalog_invalid("duplicate id 3");
        assert_eq!(err.to_string(), "invalid catalog: duplicate id 3");
    }
}
