//! The rental store and its atomic unit of work
//!
//! Lifecycle transitions change a reservation and its vehicle together. They
//! are staged in a [`UnitOfWork`] and handed to [`RentalStore::commit`], which
//! applies every change or none of them.

use crate::core::service::DataService;
use crate::entities::{Customer, Employee, Reservation, Vehicle};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// A single staged write
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    InsertReservation(Reservation),
    UpdateReservation(Reservation),
    DeleteReservation(Uuid),
    UpdateVehicle(Vehicle),
}

/// Writes that must be applied together
///
/// # Example
/// ```rust,ignore
/// let unit = UnitOfWork::new()
///     .insert_reservation(reservation)
///     .update_vehicle(vehicle);
/// store.commit(unit).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitOfWork {
    changes: Vec<Change>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_reservation(mut self, reservation: Reservation) -> Self {
        self.changes.push(Change::InsertReservation(reservation));
        self
    }

    pub fn update_reservation(mut self, reservation: Reservation) -> Self {
        self.changes.push(Change::UpdateReservation(reservation));
        self
    }

    pub fn delete_reservation(mut self, id: Uuid) -> Self {
        self.changes.push(Change::DeleteReservation(id));
        self
    }

    pub fn update_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.changes.push(Change::UpdateVehicle(vehicle));
        self
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Storage for everything the reservation workflow reads and writes
#[async_trait]
pub trait RentalStore: Send + Sync {
    fn vehicles(&self) -> &dyn DataService<Vehicle>;

    fn customers(&self) -> &dyn DataService<Customer>;

    fn employees(&self) -> &dyn DataService<Employee>;

    fn reservations(&self) -> &dyn DataService<Reservation>;

    /// Apply every change of `unit` atomically.
    ///
    /// Fails with [`StorageError::IntegrityError`](crate::core::error::StorageError)
    /// without applying anything when a change targets a missing record or
    /// inserts a duplicate identifier.
    async fn commit(&self, unit: UnitOfWork) -> Result<()>;
}
