//! Catalog record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single rentable car in the catalog.
///
/// Records are loaded once and never mutated; the filter engine hands out
/// references into the owning collection rather than copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    /// Unique positive identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Category such as "Sport" or "SUV".
    #[serde(rename = "type")]
    pub car_type: String,
    /// Capacity label such as "4 People".
    pub capacity: String,
    /// Fuel tank label such as "90L".
    pub fuel: String,
    /// Steering label such as "Manual".
    pub steering: String,
    /// Image reference.
    pub image: String,
    /// Daily price.
    pub price: f64,
    /// Pre-discount daily price, when the car is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
}

impl CarRecord {
    /// Per-day discount relative to the original price, if any.
    #[must_use]
    pub fn discount(&self) -> Option<f64> {
        self.original_price.map(|original| original - self.price)
    }

    /// Discount as a percentage of the original price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<f64> {
        match self.original_price {
            Some(original) if original > 0.0 => Some((original - self.price) / original * 100.0),
            _ => None,
        }
    }

    /// Whether the car is currently discounted.
    #[must_use]
    pub fn is_on_offer(&self) -> bool {
        self.discount().is_some_and(|d| d > 0.0)
    }
}

/// A customer review shown on the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier.
    pub id: u32,
    /// Reviewer name.
    pub name: String,
    /// Reviewer role or company.
    pub role: String,
    /// Date the review was written.
    pub date: NaiveDate,
    /// Star rating from 1 to 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// Avatar image reference.
    pub avatar: String,
}

impl Review {
    /// Maximum star rating.
    pub const MAX_RATING: u8 = 5;

    /// Date formatted the way the review list shows it, e.g. "21 July 2022".
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%-d %B %Y").to_string()
    }

    /// Star bar such as `★★★★☆`.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(Self::MAX_RATING));
        let empty = usize::from(Self::MAX_RATING) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}
