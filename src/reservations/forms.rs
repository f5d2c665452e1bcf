//! Submitted reservation forms
//!
//! Every field arrives as an optional string, from JSON or URL-encoded bodies.
//! The legacy Portuguese field names (`cliente`, `data_inicio`, ...) are
//! accepted as aliases. Errors are always reported under the English names.

use crate::core::validation::form::{self, Form, FormErrors, REQUIRED};
use crate::entities::{FuelLevel, Reservation, ReservationStatus};
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Message for a value outside a closed set of choices
pub fn invalid_choice(value: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        value
    )
}

fn parse_choice<T: FromStr>(field: &str, raw: &str, errors: &mut FormErrors) -> Option<T> {
    let raw = raw.trim();
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, invalid_choice(raw));
            None
        }
    }
}

fn required_choice<T: FromStr>(
    field: &str,
    raw: Option<&str>,
    errors: &mut FormErrors,
) -> Option<T> {
    match raw.map(str::trim) {
        None | Some("") => {
            if !errors.contains(field) {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(value) => parse_choice(field, value, errors),
    }
}

/// Blank clears the level, anything else must be a known level
fn optional_fuel(
    field: &str,
    raw: Option<&str>,
    errors: &mut FormErrors,
) -> Option<Option<Option<FuelLevel>>> {
    match raw.map(str::trim) {
        None => Some(None),
        Some("") => Some(Some(None)),
        Some(value) => parse_choice(field, value, errors).map(|level| Some(Some(level))),
    }
}

/// Present fields must hold a value; absent fields are left alone
fn optional_value<T: FromStr>(
    field: &str,
    raw: Option<&str>,
    invalid: &str,
    errors: &mut FormErrors,
) -> Option<Option<T>> {
    match raw {
        None => Some(None),
        Some(value) => form::parse_required(field, Some(value), invalid, errors).map(Some),
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// Booking form: who rents and for which dates
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReservationForm {
    #[serde(default, alias = "cliente")]
    #[validate(required(message = "This field is required."))]
    pub customer_id: Option<String>,

    #[serde(default, alias = "data_inicio")]
    #[validate(required(message = "This field is required."))]
    pub start_date: Option<String>,

    #[serde(default, alias = "data_fim")]
    #[validate(required(message = "This field is required."))]
    pub end_date: Option<String>,
}

/// A cleaned booking form. The customer still has to be checked against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReservation {
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Form for ReservationForm {
    const FIELDS: &'static [&'static str] = &["customer_id", "start_date", "end_date"];
    type Cleaned = NewReservation;

    fn clean(self, errors: &mut FormErrors) -> Option<NewReservation> {
        let customer_id = form::parse_id("customer_id", self.customer_id.as_deref(), errors);
        let start_date = form::parse_date("start_date", self.start_date.as_deref(), errors);
        let end_date = form::parse_date("end_date", self.end_date.as_deref(), errors);

        Some(NewReservation {
            customer_id: customer_id?,
            start_date: start_date?,
            end_date: end_date?,
        })
    }
}

// =============================================================================
// Pickup and return
// =============================================================================

/// Fuel level recorded when the customer takes the vehicle
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PickupForm {
    #[serde(default, alias = "nivel_combustivel_inicial")]
    #[validate(required(message = "This field is required."))]
    pub initial_fuel_level: Option<String>,
}

impl Form for PickupForm {
    const FIELDS: &'static [&'static str] = &["initial_fuel_level"];
    type Cleaned = FuelLevel;

    fn clean(self, errors: &mut FormErrors) -> Option<FuelLevel> {
        required_choice("initial_fuel_level", self.initial_fuel_level.as_deref(), errors)
    }
}

/// Fuel level recorded when the vehicle comes back
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReturnForm {
    #[serde(default, alias = "nivel_combustivel_final")]
    #[validate(required(message = "This field is required."))]
    pub final_fuel_level: Option<String>,
}

impl Form for ReturnForm {
    const FIELDS: &'static [&'static str] = &["final_fuel_level"];
    type Cleaned = FuelLevel;

    fn clean(self, errors: &mut FormErrors) -> Option<FuelLevel> {
        required_choice("final_fuel_level", self.final_fuel_level.as_deref(), errors)
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Direct edit of a reservation. Only submitted fields change.
///
/// An empty fuel level clears it. The status and fuel levels are written as
/// given, without any lifecycle check.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EditReservationForm {
    #[serde(default, alias = "cliente")]
    pub customer_id: Option<String>,

    #[serde(default, alias = "data_inicio")]
    pub start_date: Option<String>,

    #[serde(default, alias = "data_fim")]
    pub end_date: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, alias = "nivel_combustivel_inicial")]
    pub initial_fuel_level: Option<String>,

    #[serde(default, alias = "nivel_combustivel_final")]
    pub final_fuel_level: Option<String>,
}

/// Cleaned edit: `None` leaves a field as it is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationChanges {
    pub customer_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub initial_fuel_level: Option<Option<FuelLevel>>,
    pub final_fuel_level: Option<Option<FuelLevel>>,
}

impl ReservationChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the changes onto `reservation`. The total cost is left as it was.
    pub fn apply(&self, reservation: &mut Reservation) {
        if let Some(customer_id) = self.customer_id {
            reservation.customer_id = customer_id;
        }
        if let Some(start_date) = self.start_date {
            reservation.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            reservation.end_date = end_date;
        }
        if let Some(status) = self.status {
            reservation.status = status;
        }
        if let Some(level) = self.initial_fuel_level {
            reservation.initial_fuel_level = level;
        }
        if let Some(level) = self.final_fuel_level {
            reservation.final_fuel_level = level;
        }
    }
}

impl Form for EditReservationForm {
    const FIELDS: &'static [&'static str] = &[
        "customer_id",
        "start_date",
        "end_date",
        "status",
        "initial_fuel_level",
        "final_fuel_level",
    ];
    type Cleaned = ReservationChanges;

    fn clean(self, errors: &mut FormErrors) -> Option<ReservationChanges> {
        let customer_id = optional_value(
            "customer_id",
            self.customer_id.as_deref(),
            form::INVALID_ID,
            errors,
        );
        let start_date = optional_value(
            "start_date",
            self.start_date.as_deref(),
            form::INVALID_DATE,
            errors,
        );
        let end_date = optional_value(
            "end_date",
            self.end_date.as_deref(),
            form::INVALID_DATE,
            errors,
        );
        let status = match self.status.as_deref() {
            None => Some(None),
            Some(raw) => required_choice("status", Some(raw), errors).map(Some),
        };
        let initial_fuel_level =
            optional_fuel("initial_fuel_level", self.initial_fuel_level.as_deref(), errors);
        let final_fuel_level =
            optional_fuel("final_fuel_level", self.final_fuel_level.as_deref(), errors);

        Some(ReservationChanges {
            customer_id: customer_id?,
            start_date: start_date?,
            end_date: end_date?,
            status: status?,
            initial_fuel_level: initial_fuel_level?,
            final_fuel_level: final_fuel_level?,
        })
    }
}
