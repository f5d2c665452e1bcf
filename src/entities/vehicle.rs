//! Rentable vehicles and their availability flag

use crate::core::{Data, FieldValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn available_by_default() -> bool {
    true
}

/// A vehicle offered for rent
///
/// `available` is only changed by the reservation lifecycle: reserving and
/// picking up mark the vehicle unavailable, a validated return releases it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Licence plate, used as the vehicle's label
    pub plate: String,

    pub model: String,

    /// Price per rental day
    pub rental_price: Decimal,

    #[serde(default = "available_by_default")]
    pub available: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Vehicle, "vehicle", "vehicles");

impl Vehicle {
    pub fn new(plate: impl Into<String>, model: impl Into<String>, rental_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            plate: plate.into(),
            model: model.into(),
            rental_price,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Take the vehicle out of the available pool
    pub fn mark_reserved(&mut self) {
        self.available = false;
        self.updated_at = Utc::now();
    }

    /// Put the vehicle back in the available pool
    pub fn mark_released(&mut self) {
        self.available = true;
        self.updated_at = Utc::now();
    }
}

impl Data for Vehicle {
    fn label(&self) -> &str {
        &self.plate
    }

    fn indexed_fields() -> &'static [&'static str] {
        &["id", "plate", "model", "rental_price", "available"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "plate" => Some(self.plate.clone().into()),
            "model" => Some(self.model.clone().into()),
            "rental_price" => Some(self.rental_price.into()),
            "available" => Some(self.available.into()),
            _ => None,
        }
    }
}
