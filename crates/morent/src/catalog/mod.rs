//! The car catalog and its filter/pagination engine.
//!
//! This module owns the static dataset and the pure functions the
//! presentation layer calls on every interaction:
//!
//! - [`filter`] selects the records matching a [`FilterSelection`].
//! - [`paginate`] takes a visible page of any matched list.
//!
//! # Example
//!
//! ```
//! use morent::catalog::{filter, paginate, Catalog, FilterSelection, PageSize};
//!
//! let catalog = Catalog::builtin()?;
//! let selection = FilterSelection::new(80.0).with_types(["SUV"]);
//! let matched = filter(catalog.cars(), &selection);
//! let page = paginate(&matched, PageSize::new(9)?, false);
//!
//! println!("{} of {} cars", page.items.len(), page.total_count);
//! # Ok::<(), morent::Error>(())
//! ```

mod filter;
mod page;
mod record;

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use filter::{capacity_counts, filter, type_counts, FilterSelection};
pub use page::{paginate, FilteredPage, PageSize};
pub use record::{CarRecord, Review};

/// Mock dataset compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Number of cars in the "Popular Car" strip.
pub const POPULAR_COUNT: usize = 4;

/// Records shown under "Recommendation Car".
pub const RECOMMENDED_RANGE: Range<usize> = 4..12;

/// Records shown under "Recent Car" on the detail view.
pub const RECENT_RANGE: Range<usize> = 0..3;

/// Recommendation strip on the detail view.
pub const DETAIL_RECOMMENDED_RANGE: Range<usize> = 4..7;

/// The immutable catalog of cars and reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    cars: Vec<CarRecord>,
    reviews: Vec<Review>,
}

/// On-disk shape, validated before becoming a [`Catalog`].
#[derive(Deserialize)]
struct RawCatalog {
    cars: Vec<CarRecord>,
    #[serde(default)]
    reviews: Vec<Review>,
}

impl Catalog {
    /// Build a catalog from records, validating them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogInvalid`] if ids are zero or duplicated, a price
    /// is negative, an original price is below the price, or a review rating
    /// is outside 1 to 5.
    pub fn new(cars: Vec<CarRecord>, reviews: Vec<Review>) -> Result<Self> {
        let catalog = Self { cars, reviews };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the dataset embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data fails to parse or validate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogParse`] for malformed JSON, or a validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.cars, raw.reviews)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogLoad`] if the file cannot be read, or any
    /// parse/validation error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading catalog from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| Error::CatalogLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            cars = catalog.cars.len(),
            reviews = catalog.reviews.len(),
            "Catalog loaded from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise the embedded dataset.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_path`] and [`Catalog::builtin`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.cars.len());
        for car in &self.cars {
            if car.id == 0 {
                return Err(Error::catalog_invalid(format!(
                    "car '{}' has id 0; ids must be positive",
                    car.name
                )));
            }
            if !seen.insert(car.id) {
                return Err(Error::catalog_invalid(format!("duplicate car id {}", car.id)));
            }
            if car.price.is_nan() || car.price < 0.0 {
                return Err(Error::catalog_invalid(format!(
                    "car {} has invalid price {}",
                    car.id, car.price
                )));
            }
            if let Some(original) = car.original_price {
                if original.is_nan() || original < car.price {
                    return Err(Error::catalog_invalid(format!(
                        "car {} original price {original} is below price {}",
                        car.id, car.price
                    )));
                }
            }
        }

        for review in &self.reviews {
            if !(1..=Review::MAX_RATING).contains(&review.rating) {
                return Err(Error::catalog_invalid(format!(
                    "review {} has rating {}; expected 1 to {}",
                    review.id,
                    review.rating,
                    Review::MAX_RATING
                )));
            }
        }
        Ok(())
    }

    /// All cars, in catalog order.
    #[must_use]
    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    /// All reviews, in catalog order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Look up a car by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CarNotFound`] if no car has this id.
    pub fn find(&self, id: u32) -> Result<&CarRecord> {
        self.cars
            .iter()
            .find(|car| car.id == id)
            .ok_or(Error::CarNotFound(id))
    }

    /// Cars in `range`, clamped to the catalog length.
    #[must_use]
    pub fn window(&self, range: Range<usize>) -> &[CarRecord] {
        let end = range.end.min(self.cars.len());
        let start = range.start.min(end);
        &self.cars[start..end]
    }

    /// The "Popular Car" strip.
    #[must_use]
    pub fn popular(&self) -> &[CarRecord] {
        self.window(0..POPULAR_COUNT)
    }

    /// The "Recommendation Car" grid, before pagination.
    #[must_use]
    pub fn recommended(&self) -> &[CarRecord] {
        self.window(RECOMMENDED_RANGE)
    }

    /// The "Recent Car" strip on the detail view.
    #[must_use]
    pub fn recent(&self) -> &[CarRecord] {
        self.window(RECENT_RANGE)
    }

    /// The recommendation strip below the reviews on the detail view.
    #[must_use]
    pub fn detail_recommendations(&self) -> &[CarRecord] {
        self.window(DETAIL_RECOMMENDED_RANGE)
    }

    /// Mean review rating, or `None` without reviews.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(sum) / self.reviews.len() as f64)
    }

    /// Number of cars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Whether the catalog has no cars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: u32, price: f64, original_price: Option<f64>) -> CarRecord {
        CarRecord {
            id,
            name: format!("Car {id}"),
            car_type: "SUV".to_string(),
            capacity: "6 People".to_string(),
            fuel: "80L".to_string(),
            steering: "Manual".to_string(),
            image: String::new(),
            price,
            original_price,
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 12);
        assert!(!catalog.reviews().is_empty());
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin().unwrap();
        let gtr = catalog.find(2).unwrap();
        assert_eq!(gtr.car_type, "Sport");
        assert_eq!(gtr.original_price, Some(100.0));

        let err = catalog.find(9999).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_popular_and_recommended() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.popular().len(), POPULAR_COUNT);
        assert_eq!(catalog.popular()[0].id, catalog.cars()[0].id);
        assert_eq!(catalog.recommended().len(), 8);
        assert_eq!(catalog.recommended()[0].id, catalog.cars()[4].id);
    }

    #[test]
    fn test_detail_view_strips() {
        let catalog = Catalog::builtin().unwrap();
        let recent: Vec<u32> = catalog.recent().iter().map(|c| c.id).collect();
        let suggested: Vec<u32> = catalog.detail_recommendations().iter().map(|c| c.id).collect();
        assert_eq!(recent, vec![1, 2, 3]);
        assert_eq!(suggested, vec![5, 6, 7]);
    }

    #[test]
    fn test_detail_view_strips_on_short_catalog() {
        let catalog = Catalog::new(vec![car(1, 10.0, None), car(2, 20.0, None)], vec![]).unwrap();
        assert_eq!(catalog.recent().len(), 2);
        assert!(catalog.detail_recommendations().is_empty());
    }

    #[test]
    fn test_window_clamps() {
        let catalog = Catalog::new(vec![car(1, 10.0, None), car(2, 20.0, None)], vec![]).unwrap();
        assert_eq!(catalog.window(1..10).len(), 1);
        assert!(catalog.window(5..10).is_empty());
        assert!(catalog.recommended().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![car(1, 10.0, None), car(1, 20.0, None)], vec![]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate car id 1"));
    }

    #[test]
    fn test_rejects_zero_id() {
        assert!(Catalog::new(vec![car(0, 10.0, None)], vec![]).is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        assert!(Catalog::new(vec![car(1, -1.0, None)], vec![]).is_err());
    }

    #[test]
    fn test_rejects_original_below_price() {
        assert!(Catalog::new(vec![car(1, 80.0, Some(70.0))], vec![]).is_err());
        assert!(Catalog::new(vec![car(1, 80.0, Some(100.0))], vec![]).is_ok());
    }

    #[test]
    fn test_rejects_bad_rating() {
        let json = r#"{"cars": [], "reviews": [{"id": 1, "name": "N", "role": "R",
            "date": "2022-07-21", "rating": 6, "comment": "", "avatar": ""}]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, Error::CatalogInvalid { .. }));
    }

    #[test]
    fn test_from_json_without_reviews() {
        let catalog = Catalog::from_json(r#"{"cars": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.average_rating().is_none());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Catalog::from_json("{").unwrap_err();
        assert!(matches!(err, Error::CatalogParse(_)));
    }

    #[test]
    fn test_from_path_missing() {
        let err = Catalog::from_path("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, Error::CatalogLoad { .. }));
    }

    #[test]
    fn test_load_defaults_to_builtin() {
        let catalog = Catalog::load(None).unwrap();
        assert_eq!(catalog, Catalog::builtin().unwrap());
    }

    #[test]
    fn test_average_rating() {
        let catalog = Catalog::builtin().unwrap();
        let avg = catalog.average_rating().unwrap();
        assert!((1.0..=5.0).contains(&avg));
    }

    #[test]
    fn test_builtin_facets_cover_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let total: usize = type_counts(catalog.cars()).iter().map(|(_, n)| n).sum();
        assert_eq!(total, catalog.len());
    }
}
