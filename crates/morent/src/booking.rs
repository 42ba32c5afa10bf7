//! Trip legs, rental pricing and the simulated checkout.
//!
//! Nothing here is persisted or charged; a successful [`Checkout::confirm`]
//! only produces a [`Confirmation`] value for the caller to display.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::CarRecord;
use crate::error::{Error, Result};

/// Number of steps in the checkout form.
pub const CHECKOUT_STEPS: usize = 4;

/// Exchange two values.
///
/// Both values are moved, so the results never alias each other.
#[must_use]
pub fn swap_pair<T>(a: T, b: T) -> (T, T) {
    (b, a)
}

/// Location, date and time for one end of a rental.
///
/// Unset fields mirror an untouched form control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripLeg {
    /// City or branch.
    pub location: Option<String>,
    /// Calendar date.
    pub date: Option<NaiveDate>,
    /// Time of day.
    pub time: Option<NaiveTime>,
}

impl TripLeg {
    /// Create a fully specified leg.
    #[must_use]
    pub fn new(location: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            location: Some(location.into()),
            date: Some(date),
            time: Some(time),
        }
    }

    /// Whether every field has been chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.location.as_deref().is_some_and(|l| !l.trim().is_empty())
            && self.date.is_some()
            && self.time.is_some()
    }
}

impl std::fmt::Display for TripLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = self.location.as_deref().unwrap_or("-");
        let date = self
            .date
            .map_or_else(|| "-".to_string(), |d| d.format("%-d %B %Y").to_string());
        let time = self
            .time
            .map_or_else(|| "-".to_string(), |t| t.format("%H:%M").to_string());
        write!(f, "{location}, {date} {time}")
    }
}

/// Pick-up and drop-off legs of a rental.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trip {
    /// Where and when the car is collected.
    pub pickup: TripLeg,
    /// Where and when the car is returned.
    pub dropoff: TripLeg,
}

impl Trip {
    /// Create a trip from its two legs.
    #[must_use]
    pub fn new(pickup: TripLeg, dropoff: TripLeg) -> Self {
        Self { pickup, dropoff }
    }

    /// A copy with pick-up and drop-off exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        let (pickup, dropoff) = swap_pair(self.pickup.clone(), self.dropoff.clone());
        Self { pickup, dropoff }
    }

    /// Exchange pick-up and drop-off in place.
    pub fn swap(&mut self) {
        let (pickup, dropoff) =
            swap_pair(std::mem::take(&mut self.pickup), std::mem::take(&mut self.dropoff));
        self.pickup = pickup;
        self.dropoff = dropoff;
    }

    /// Whether both legs are fully specified.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pickup.is_complete() && self.dropoff.is_complete()
    }

    /// Billable days between the two dates, at least one.
    ///
    /// `None` when either date is missing or drop-off precedes pick-up.
    #[must_use]
    pub fn rental_days(&self) -> Option<u32> {
        let (start, end) = (self.pickup.date?, self.dropoff.date?);
        let days = (end - start).num_days();
        if days < 0 {
            return None;
        }
        u32::try_from(days.max(1)).ok()
    }
}

/// Price breakdown shown in the "Rental Summary" panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentalSummary {
    /// Car being rented.
    pub car_id: u32,
    /// Daily price after discount.
    pub daily_price: f64,
    /// Number of billable days.
    pub days: u32,
    /// `daily_price * days`.
    pub subtotal: f64,
    /// Amount saved against the original price.
    pub savings: f64,
    /// Tax charged; always zero in the demo.
    pub tax: f64,
    /// Amount due.
    pub total: f64,
}

impl RentalSummary {
    /// Price a rental of `car` for `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `days` is zero.
    pub fn for_car(car: &CarRecord, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::invalid_argument("days", "must be at least 1"));
        }
        let n = f64::from(days);
        let subtotal = car.price * n;
        let savings = car.discount().unwrap_or(0.0) * n;
        let tax = 0.0;
        Ok(Self {
            car_id: car.id,
            daily_price: car.price,
            days,
            subtotal,
            savings,
            tax,
            total: subtotal + tax,
        })
    }
}

/// Step 1: who is renting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingInfo {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// Town or city.
    pub city: String,
}

impl BillingInfo {
    /// Whether every field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.phone, &self.address, &self.city]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Step 3: how the rental is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum PaymentMethod {
    /// Card payment; the details are only checked for presence.
    CreditCard {
        /// Card number.
        number: String,
        /// Expiry as typed.
        expiry: String,
        /// Name on the card.
        holder: String,
        /// Security code.
        cvc: String,
    },
    /// Redirect to PayPal.
    #[serde(rename = "paypal")]
    PayPal,
    /// Pay with Bitcoin.
    Bitcoin,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::CreditCard {
            number: String::new(),
            expiry: String::new(),
            holder: String::new(),
            cvc: String::new(),
        }
    }
}

impl PaymentMethod {
    /// Whether the method needs no further input.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::CreditCard {
                number,
                expiry,
                holder,
                cvc,
            } => [number, expiry, holder, cvc]
                .iter()
                .all(|field| !field.trim().is_empty()),
            Self::PayPal | Self::Bitcoin => true,
        }
    }

    /// Short display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreditCard { .. } => "Credit Card",
            Self::PayPal => "PayPal",
            Self::Bitcoin => "Bitcoin",
        }
    }
}

/// The four-step checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkout {
    /// Step 1.
    pub billing: BillingInfo,
    /// Step 2.
    pub trip: Trip,
    /// Step 3.
    pub payment: PaymentMethod,
    /// Opt-in to marketing emails.
    pub marketing_opt_in: bool,
    /// Step 4: terms and privacy policy accepted.
    pub terms_accepted: bool,
}

/// Result of a successful simulated checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    /// Priced rental.
    pub summary: RentalSummary,
    /// Legs of the trip.
    pub trip: Trip,
    /// Payment method name.
    pub payment_method: &'static str,
    /// Whether marketing emails were accepted.
    pub marketing_opt_in: bool,
}

impl Checkout {
    /// Read a filled-in form from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::Checkout`] if it is not a valid form.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let form: Self = serde_json::from_str(&json)
            .map_err(|e| Error::checkout(format!("malformed form {}: {e}", path.display())))?;
        debug!(
            steps = form.steps_completed(),
            of = CHECKOUT_STEPS,
            "Checkout form read from {}",
            path.display()
        );
        Ok(form)
    }

    /// Number of completed steps, out of [`CHECKOUT_STEPS`].
    #[must_use]
    pub fn steps_completed(&self) -> usize {
        [
            self.billing.is_complete(),
            self.trip.is_complete(),
            self.payment.is_complete(),
            self.terms_accepted,
        ]
        .into_iter()
        .filter(|done| *done)
        .count()
    }

    /// Confirm the rental of `car`.
    ///
    /// The rental length comes from the trip dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Checkout`] naming the first incomplete step.
    pub fn confirm(&self, car: &CarRecord) -> Result<Confirmation> {
        if !self.billing.is_complete() {
            return Err(Error::checkout("billing info is incomplete"));
        }
        if !self.trip.is_complete() {
            return Err(Error::checkout("pick-up and drop-off must both be set"));
        }
        let days = self
            .trip
            .rental_days()
            .ok_or_else(|| Error::checkout("drop-off date is before pick-up date"))?;
        if !self.payment.is_complete() {
            return Err(Error::checkout("payment details are incomplete"));
        }
        if !self.terms_accepted {
            return Err(Error::checkout("please agree to terms and conditions"));
        }

        let summary = RentalSummary::for_car(car, days)?;
        debug!(car = car.id, days, total = summary.total, "Checkout validated");
        info!(car = car.id, method = self.payment.name(), "Rental confirmed");
        Ok(Confirmation {
            summary,
            trip: self.trip.clone(),
            payment_method: self.payment.name(),
            marketing_opt_in: self.marketing_opt_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn seven() -> NaiveTime {
        NaiveTime::from_hms_opt(7, 0, 0).unwrap()
    }

    fn gtr() -> CarRecord {
        CarRecord {
            id: 2,
            name: "Nissan GT - R".to_string(),
            car_type: "Sport".to_string(),
            capacity: "2 People".to_string(),
            fuel: "80L".to_string(),
            steering: "Manual".to_string(),
            image: String::new(),
            price: 80.0,
            original_price: Some(100.0),
        }
    }

    fn trip() -> Trip {
        Trip::new(
            TripLeg::new("Kota Semarang", date(20), seven()),
            TripLeg::new("Jakarta", date(23), seven()),
        )
    }

    fn complete_checkout() -> Checkout {
        Checkout {
            billing: BillingInfo {
                name: "Alex Stanton".to_string(),
                phone: "0812".to_string(),
                address: "Jl. Pemuda 1".to_string(),
                city: "Semarang".to_string(),
            },
            trip: trip(),
            payment: PaymentMethod::PayPal,
            marketing_opt_in: false,
            terms_accepted: true,
        }
    }

    #[test]
    fn test_swap_pair() {
        assert_eq!(swap_pair(1, 2), (2, 1));
    }

    #[test]
    fn test_swap_pair_does_not_alias() {
        let a = TripLeg::new("Kota Semarang", date(20), seven());
        let b = TripLeg::default();
        let (mut x, y) = swap_pair(a.clone(), b.clone());
        x.location = Some("Changed".to_string());
        assert_eq!(y, a);
        assert_eq!(b, TripLeg::default());
    }

    #[test]
    fn test_trip_swapped_and_swap_agree() {
        let original = trip();
        let swapped = original.swapped();
        assert_eq!(swapped.pickup, original.dropoff);
        assert_eq!(swapped.dropoff, original.pickup);

        let mut in_place = original.clone();
        in_place.swap();
        assert_eq!(in_place, swapped);

        in_place.swap();
        assert_eq!(in_place, original);
    }

    #[test]
    fn test_swap_partial_legs() {
        let mut t = Trip::new(
            TripLeg {
                location: Some("Jakarta".to_string()),
                ..TripLeg::default()
            },
            TripLeg::default(),
        );
        t.swap();
        assert!(t.pickup.location.is_none());
        assert_eq!(t.dropoff.location.as_deref(), Some("Jakarta"));
    }

    #[test]
    fn test_leg_completeness() {
        assert!(!TripLeg::default().is_complete());
        assert!(TripLeg::new("Jakarta", date(20), seven()).is_complete());
        assert!(!TripLeg::new("  ", date(20), seven()).is_complete());
    }

    #[test]
    fn test_leg_display() {
        let leg = TripLeg::new("Kota Semarang", date(20), seven());
        assert_eq!(leg.to_string(), "Kota Semarang, 20 July 2024 07:00");
        assert_eq!(TripLeg::default().to_string(), "-, - -");
    }

    #[test]
    fn test_rental_days() {
        assert_eq!(trip().rental_days(), Some(3));

        let same_day = Trip::new(
            TripLeg::new("A", date(20), seven()),
            TripLeg::new("B", date(20), seven()),
        );
        assert_eq!(same_day.rental_days(), Some(1));

        assert_eq!(trip().swapped().rental_days(), None);
        assert_eq!(Trip::default().rental_days(), None);
    }

    #[test]
    fn test_rental_summary() {
        let summary = RentalSummary::for_car(&gtr(), 3).unwrap();
        assert_eq!(summary.subtotal, 240.0);
        assert_eq!(summary.savings, 60.0);
        assert_eq!(summary.tax, 0.0);
        assert_eq!(summary.total, 240.0);
    }

    #[test]
    fn test_rental_summary_zero_days() {
        let err = RentalSummary::for_car(&gtr(), 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_payment_completeness() {
        assert!(!PaymentMethod::default().is_complete());
        assert!(PaymentMethod::Bitcoin.is_complete());
        let card = PaymentMethod::CreditCard {
            number: "4111 1111 1111 1111".to_string(),
            expiry: "01 / 01 / 27".to_string(),
            holder: "Alex Stanton".to_string(),
            cvc: "123".to_string(),
        };
        assert!(card.is_complete());
        assert_eq!(card.name(), "Credit Card");
    }

    #[test]
    fn test_steps_completed() {
        assert_eq!(Checkout::default().steps_completed(), 0);
        assert_eq!(complete_checkout().steps_completed(), CHECKOUT_STEPS);

        let mut checkout = complete_checkout();
        checkout.terms_accepted = false;
        assert_eq!(checkout.steps_completed(), 3);
    }

    #[test]
    fn test_confirm_success() {
        let confirmation = complete_checkout().confirm(&gtr()).unwrap();
        assert_eq!(confirmation.summary.days, 3);
        assert_eq!(confirmation.summary.total, 240.0);
        assert_eq!(confirmation.payment_method, "PayPal");
    }

    #[test]
    fn test_confirm_requires_terms() {
        let mut checkout = complete_checkout();
        checkout.terms_accepted = false;
        let err = checkout.confirm(&gtr()).unwrap_err();
        assert!(err.to_string().contains("terms and conditions"));
    }

    #[test]
    fn test_confirm_requires_billing() {
        let mut checkout = complete_checkout();
        checkout.billing.city.clear();
        let err = checkout.confirm(&gtr()).unwrap_err();
        assert!(matches!(err, Error::Checkout { .. }));
    }

    #[test]
    fn test_confirm_rejects_reversed_dates() {
        let mut checkout = complete_checkout();
        checkout.trip.swap();
        let err = checkout.confirm(&gtr()).unwrap_err();
        assert!(err.to_string().contains("before pick-up"));
    }

    #[test]
    fn test_checkout_deserialize() {
        let json = r#"{"payment": {"method": "bitcoin"}, "terms_accepted": true}"#;
        let checkout: Checkout = serde_json::from_str(json).unwrap();
        assert_eq!(checkout.payment, PaymentMethod::Bitcoin);
        assert!(checkout.terms_accepted);
        assert!(!checkout.billing.is_complete());
    }

    #[test]
    fn test_payment_method_tags() {
        let card = PaymentMethod::CreditCard {
            number: "4111".to_string(),
            expiry: "01/27".to_string(),
            holder: "Alex Stanton".to_string(),
            cvc: "123".to_string(),
        };
        for (method, tag) in [
            (card, "credit_card"),
            (PaymentMethod::PayPal, "paypal"),
            (PaymentMethod::Bitcoin, "bitcoin"),
        ] {
            let json = serde_json::to_value(&method).unwrap();
            assert_eq!(json["method"], tag);
            let back: PaymentMethod = serde_json::from_value(json).unwrap();
            assert_eq!(back, method);
        }
    }

    #[test]
    fn test_checkout_deserialize_paypal() {
        let json = r#"{"payment": {"method": "paypal"}}"#;
        let checkout: Checkout = serde_json::from_str(json).unwrap();
        assert_eq!(checkout.payment, PaymentMethod::PayPal);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Checkout::from_path("/nonexistent/form.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
