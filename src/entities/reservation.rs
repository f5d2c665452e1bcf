//! Reservations, their lifecycle status and fuel levels
//!
//! A reservation moves `created → retirada → finalizada`. Pickup records the
//! fuel level the vehicle left with; return records the level it came back
//! with, which may not be lower.

use crate::core::{Data, FieldValue};
use crate::entities::Vehicle;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Fuel tank level, ordered from empty to full
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelLevel {
    #[serde(rename = "muito_baixo")]
    VeryLow,
    #[serde(rename = "baixo")]
    Low,
    #[serde(rename = "meio")]
    Half,
    #[serde(rename = "cheio")]
    Full,
}

impl FuelLevel {
    pub const ALL: [FuelLevel; 4] = [
        FuelLevel::VeryLow,
        FuelLevel::Low,
        FuelLevel::Half,
        FuelLevel::Full,
    ];

    /// Position in the ordering, 0 for `muito_baixo` up to 3 for `cheio`
    pub fn rank(self) -> u8 {
        match self {
            FuelLevel::VeryLow => 0,
            FuelLevel::Low => 1,
            FuelLevel::Half => 2,
            FuelLevel::Full => 3,
        }
    }

    /// Wire name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            FuelLevel::VeryLow => "muito_baixo",
            FuelLevel::Low => "baixo",
            FuelLevel::Half => "meio",
            FuelLevel::Full => "cheio",
        }
    }

    /// Display label shown next to the choice
    pub fn label(self) -> &'static str {
        match self {
            FuelLevel::VeryLow => "Muito Baixo",
            FuelLevel::Low => "Baixo",
            FuelLevel::Half => "Meio",
            FuelLevel::Full => "Cheio",
        }
    }
}

impl fmt::Display for FuelLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of the known fuel levels
#[derive(Debug, Error, PartialEq)]
#[error("unknown fuel level '{0}'")]
pub struct UnknownFuelLevel(pub String);

impl FromStr for FuelLevel {
    type Err = UnknownFuelLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownFuelLevel(s.to_string()))
    }
}

/// Lifecycle status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Booked, vehicle not yet picked up
    #[default]
    #[serde(rename = "created")]
    Created,
    /// Vehicle picked up by the customer
    #[serde(rename = "retirada")]
    PickedUp,
    /// Vehicle returned
    #[serde(rename = "finalizada")]
    Finalized,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Created,
        ReservationStatus::PickedUp,
        ReservationStatus::Finalized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Created => "created",
            ReservationStatus::PickedUp => "retirada",
            ReservationStatus::Finalized => "finalizada",
        }
    }

    /// Whether a reservation in this status still holds its vehicle
    pub fn is_active(self) -> bool {
        !matches!(self, ReservationStatus::Finalized)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown reservation status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Why a return cannot be registered
#[derive(Debug, Error, PartialEq)]
pub enum ReturnRejection {
    /// No fuel level was recorded at pickup
    #[error("no pickup has been registered")]
    PickupNotRegistered,

    /// The vehicle came back with less fuel than it left with
    #[error("final fuel level must be equal to or higher than at pickup")]
    FuelBelowPickup { initial: FuelLevel, returned: FuelLevel },
}

/// A booking of one vehicle by one customer, handled by one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Days times the vehicle's daily price, fixed at creation
    pub total_cost: Decimal,

    pub initial_fuel_level: Option<FuelLevel>,
    pub final_fuel_level: Option<FuelLevel>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Reservation, "reservation", "reservations");

/// Cost of renting at `daily_price` from `start` to `end`.
///
/// Whole days between the two dates; zero or negative spans are not rejected.
pub fn rental_cost(start: NaiveDate, end: NaiveDate, daily_price: Decimal) -> Decimal {
    Decimal::from((end - start).num_days()) * daily_price
}

impl Reservation {
    /// Book `vehicle` for a customer, pricing the stay from the vehicle's daily rate
    pub fn new(
        customer_id: Uuid,
        vehicle: &Vehicle,
        employee_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            vehicle_id: vehicle.id,
            employee_id,
            start_date,
            end_date,
            total_cost: rental_cost(start_date, end_date, vehicle.rental_price),
            initial_fuel_level: None,
            final_fuel_level: None,
            status: ReservationStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the pickup. Allowed from any status.
    pub fn register_pickup(&mut self, initial_fuel_level: FuelLevel) {
        self.initial_fuel_level = Some(initial_fuel_level);
        self.status = ReservationStatus::PickedUp;
        self.updated_at = Utc::now();
    }

    /// Check that a return with `final_fuel_level` would be accepted
    pub fn check_return(&self, final_fuel_level: FuelLevel) -> Result<(), ReturnRejection> {
        let initial = self
            .initial_fuel_level
            .ok_or(ReturnRejection::PickupNotRegistered)?;
        if final_fuel_level.rank() < initial.rank() {
            return Err(ReturnRejection::FuelBelowPickup {
                initial,
                returned: final_fuel_level,
            });
        }
        Ok(())
    }

    /// Record the return and finalize. Leaves the reservation untouched on rejection.
    pub fn finalize(&mut self, final_fuel_level: FuelLevel) -> Result<(), ReturnRejection> {
        self.check_return(final_fuel_level)?;
        self.final_fuel_level = Some(final_fuel_level);
        self.status = ReservationStatus::Finalized;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Data for Reservation {
    fn indexed_fields() -> &'static [&'static str] {
        &[
            "id",
            "customer_id",
            "vehicle_id",
            "employee_id",
            "start_date",
            "end_date",
            "total_cost",
            "status",
            "initial_fuel_level",
            "final_fuel_level",
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let fuel =
            |level: Option<FuelLevel>| FieldValue::from(level.map(|l| l.as_str().to_string()));
        match field {
            "id" => Some(self.id.into()),
            "customer_id" => Some(self.customer_id.into()),
            "vehicle_id" => Some(self.vehicle_id.into()),
            "employee_id" => Some(self.employee_id.into()),
            "start_date" => Some(self.start_date.into()),
            "end_date" => Some(self.end_date.into()),
            "total_cost" => Some(self.total_cost.into()),
            "status" => Some(self.status.as_str().to_string().into()),
            "initial_fuel_level" => Some(fuel(self.initial_fuel_level)),
            "final_fuel_level" => Some(fuel(self.final_fuel_level)),
            _ => None,
        }
    }
}
