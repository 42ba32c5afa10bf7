//! Static analytics shown on the rental dashboard.

use serde::Serialize;

use crate::catalog::{CarRecord, Catalog};
use crate::chart::ShareEntry;
use crate::error::Result;

/// One category in the "Top 5 Car Rental" chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentalShare {
    /// Category name.
    pub name: &'static str,
    /// Number of rentals.
    pub rentals: u64,
    /// Share of rentals, in percent.
    pub percentage: f64,
    /// Chart colour.
    pub color: &'static str,
}

/// Rental counts per category.
pub const TOP_RENTALS: [RentalShare; 5] = [
    RentalShare {
        name: "Sport Car",
        rentals: 17_439,
        percentage: 24.0,
        color: "#0D3559",
    },
    RentalShare {
        name: "SUV",
        rentals: 9_478,
        percentage: 13.0,
        color: "#175D9C",
    },
    RentalShare {
        name: "Coupe",
        rentals: 18_197,
        percentage: 25.0,
        color: "#2185DE",
    },
    RentalShare {
        name: "Hatchback",
        rentals: 12_510,
        percentage: 17.0,
        color: "#63A9E8",
    },
    RentalShare {
        name: "MPV",
        rentals: 14_406,
        percentage: 20.0,
        color: "#A6CEF2",
    },
];

/// Chart entries for the top rentals, in display order.
#[must_use]
pub fn share_entries(shares: &[RentalShare]) -> Vec<ShareEntry> {
    shares
        .iter()
        .map(|s| ShareEntry::new(s.name, s.percentage).with_color(s.color))
        .collect()
}

/// Sum of rentals across all categories, shown in the chart hole.
#[must_use]
pub fn total_rentals(shares: &[RentalShare]) -> u64 {
    shares.iter().map(|s| s.rentals).sum()
}

/// Format a count with thousands separators, e.g. `72,030`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A past rental listed under "Recent Transaction".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction<'a> {
    /// The rented car.
    pub car: &'a CarRecord,
    /// Display date.
    pub date: &'static str,
    /// Amount paid.
    pub price: f64,
}

/// Car id, date and amount of each recent transaction.
const RECENT: [(u32, &str, f64); 4] = [
    (2, "20 July", 80.0),
    (1, "19 July", 99.0),
    (3, "18 July", 96.0),
    (6, "17 July", 80.0),
];

/// Recent transactions resolved against `catalog`.
///
/// # Errors
///
/// Returns [`crate::Error::CarNotFound`] if the catalog lacks a referenced car.
pub fn recent_transactions(catalog: &Catalog) -> Result<Vec<Transaction<'_>>> {
    RECENT
        .iter()
        .map(|&(id, date, price)| {
            Ok(Transaction {
                car: catalog.find(id)?,
                date,
                price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout;

    #[test]
    fn test_total_rentals() {
        assert_eq!(total_rentals(&TOP_RENTALS), 72_030);
        assert_eq!(total_rentals(&[]), 0);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(72_030), "72,030");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_share_entries_keep_order_and_colour() {
        let entries = share_entries(&TOP_RENTALS);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].label, "Sport Car");
        assert_eq!(entries[4].color.as_deref(), Some("#A6CEF2"));
    }

    #[test]
    fn test_top_rentals_ring_closes() {
        let entries = share_entries(&TOP_RENTALS);
        let segments = layout(&entries, 70.0).unwrap();
        let last = segments.last().unwrap();
        assert!((last.end_angle() - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_transactions_resolve() {
        let catalog = Catalog::builtin().unwrap();
        let recent = recent_transactions(&catalog).unwrap();
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].car.id, 2);
        assert_eq!(recent[1].price, 99.0);
    }

    #[test]
    fn test_recent_transactions_missing_car() {
        let catalog = Catalog::new(vec![], vec![]).unwrap();
        let err = recent_transactions(&catalog).unwrap_err();
        assert!(err.is_not_found());
    }
}
