//! Reference data loaded into a store at startup
//!
//! Vehicles, customers and employees are managed outside the reservation
//! workflow. A deployment lists them in the `seed` section of its
//! configuration and they are inserted once when the server starts.

use crate::core::error::RentalResult;
use crate::core::store::RentalStore;
use crate::entities::{Customer, Employee, Vehicle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub vehicles: Vec<Vehicle>,
    pub customers: Vec<Customer>,
    pub employees: Vec<Employee>,
}

impl SeedData {
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty() && self.customers.is_empty() && self.employees.is_empty()
    }
}

/// Insert every seed record into `store`
pub async fn load_seed(store: &dyn RentalStore, seed: &SeedData) -> RentalResult<()> {
    for vehicle in &seed.vehicles {
        store.vehicles().create(vehicle.clone()).await?;
    }
    for customer in &seed.customers {
        store.customers().create(customer.clone()).await?;
    }
    for employee in &seed.employees {
        store.employees().create(employee.clone()).await?;
    }

    tracing::info!(
        vehicles = seed.vehicles.len(),
        customers = seed.customers.len(),
        employees = seed.employees.len(),
        "seed data loaded"
    );
    Ok(())
}
