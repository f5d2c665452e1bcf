//! Shared test harness for rental store testing
//!
//! Provides helpers building vehicles, customers, employees and reservations,
//! plus two macro-generated suites:
//! - `data_service_tests!` validates `DataService<Vehicle>` (CRUD and search
//!   across the String, Uuid, Decimal and Boolean `FieldValue` variants)
//! - `rental_store_tests!` validates `RentalStore::commit` atomicity
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;
#[macro_use]
pub mod rental_store_tests;

use chrono::NaiveDate;
use rental::core::field::FieldValue;
use rental::entities::{Customer, Employee, Reservation, Vehicle};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn price(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal literal")
}

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("valid YYYY-MM-DD date")
}

/// A vehicle with the given plate, model and daily price
pub fn create_test_vehicle(plate: &str, model: &str, daily_price: &str, available: bool) -> Vehicle {
    let mut vehicle = Vehicle::new(plate, model, price(daily_price));
    vehicle.available = available;
    vehicle
}

/// `n` available vehicles with distinct plates
pub fn sample_fleet(n: usize) -> Vec<Vehicle> {
    (0..n)
        .map(|i| create_test_vehicle(&format!("TST{:04}", i), "Fleet", "100.00", true))
        .collect()
}

pub fn create_test_customer(name: &str) -> Customer {
    Customer::new(name.to_string())
}

pub fn create_test_employee(name: &str) -> Employee {
    Employee::new(name.to_string())
}

pub fn create_test_reservation(
    customer: &Customer,
    vehicle: &Vehicle,
    employee: &Employee,
    start: &str,
    end: &str,
) -> Reservation {
    Reservation::new(customer.id, vehicle, employee.id, date(start), date(end))
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

pub fn assert_field_value_string(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::String(s) => assert_eq!(s, expected),
        other => panic!("Expected FieldValue::String, got {:?}", other),
    }
}

pub fn assert_field_value_decimal(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::Decimal(d) => assert_eq!(*d, price(expected)),
        other => panic!("Expected FieldValue::Decimal, got {:?}", other),
    }
}
