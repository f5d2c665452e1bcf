//! In-memory implementation of the rental store for testing and development

use crate::core::error::{EntityError, StorageError};
use crate::core::store::{Change, RentalStore, UnitOfWork};
use crate::core::{Data, DataService};
use crate::entities::{Customer, Employee, Reservation, Vehicle};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Every table of the in-memory store
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub vehicles: HashMap<Uuid, Vehicle>,
    pub customers: HashMap<Uuid, Customer>,
    pub employees: HashMap<Uuid, Employee>,
    pub reservations: HashMap<Uuid, Reservation>,
}

/// Records that live in one of the in-memory [`Tables`]
pub trait Stored: Data {
    fn table(tables: &Tables) -> &HashMap<Uuid, Self>;

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;
}

macro_rules! stored_in {
    ($type:ty, $field:ident) => {
        impl Stored for $type {
            fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
                &tables.$field
            }

            fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
                &mut tables.$field
            }
        }
    };
}

stored_in!(Vehicle, vehicles);
stored_in!(Customer, customers);
stored_in!(Employee, employees);
stored_in!(Reservation, reservations);

/// In-memory rental store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// a committed [`UnitOfWork`] is applied under a single write guard.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every table, for inspection in tests and diagnostics
    pub fn snapshot(&self) -> Result<Tables> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(tables.clone())
    }
}

fn integrity(message: String) -> anyhow::Error {
    anyhow::Error::new(StorageError::IntegrityError { message })
}

fn require<T>(table: &HashMap<Uuid, T>, what: &str, id: &Uuid) -> Result<()> {
    if table.contains_key(id) {
        Ok(())
    } else {
        Err(integrity(format!("{what} '{id}' does not exist")))
    }
}

fn check_references(tables: &Tables, reservation: &Reservation) -> Result<()> {
    require(&tables.customers, "customer", &reservation.customer_id)?;
    require(&tables.vehicles, "vehicle", &reservation.vehicle_id)?;
    require(&tables.employees, "employee", &reservation.employee_id)
}

/// Apply `changes` to a scratch copy of the mutable tables, failing on the first bad change
fn stage(tables: &Tables, changes: Vec<Change>) -> Result<Tables> {
    let mut staged = Tables {
        vehicles: tables.vehicles.clone(),
        reservations: tables.reservations.clone(),
        ..Tables::default()
    };

    for change in changes {
        match change {
            Change::InsertReservation(reservation) => {
                check_references(tables, &reservation)?;
                if staged.reservations.contains_key(&reservation.id) {
                    return Err(integrity(format!(
                        "reservation '{}' already exists",
                        reservation.id
                    )));
                }
                staged.reservations.insert(reservation.id, reservation);
            }
            Change::UpdateReservation(reservation) => {
                check_references(tables, &reservation)?;
                require(&staged.reservations, "reservation", &reservation.id)?;
                staged.reservations.insert(reservation.id, reservation);
            }
            Change::DeleteReservation(id) => {
                require(&staged.reservations, "reservation", &id)?;
                staged.reservations.remove(&id);
            }
            Change::UpdateVehicle(vehicle) => {
                require(&staged.vehicles, "vehicle", &vehicle.id)?;
                staged.vehicles.insert(vehicle.id, vehicle);
            }
        }
    }

    Ok(staged)
}

#[async_trait]
impl<T: Stored> DataService<T> for InMemoryStore {
    async fn create(&self, entity: T) -> Result<T> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let table = T::table_mut(&mut tables);
        if table.contains_key(&entity.id()) {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id: entity.id(),
            }
            .into());
        }
        table.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(T::table(&tables).get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut entities: Vec<T> = T::table(&tables).values().cloned().collect();
        entities.sort_by_key(|e| (e.created_at(), e.id()));
        Ok(entities)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let table = T::table_mut(&mut tables);
        if !table.contains_key(id) {
            return Err(EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            }
            .into());
        }
        table.insert(*id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        T::table_mut(&mut tables).remove(id);

        Ok(())
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let entities = <Self as DataService<T>>::list(self).await?;

        Ok(entities
            .into_iter()
            .filter(|entity| {
                entity
                    .field_value(field)
                    .is_some_and(|candidate| candidate.matches(value))
            })
            .collect())
    }
}

#[async_trait]
impl RentalStore for InMemoryStore {
    fn vehicles(&self) -> &dyn DataService<Vehicle> {
        self
    }

    fn customers(&self) -> &dyn DataService<Customer> {
        self
    }

    fn employees(&self) -> &dyn DataService<Employee> {
        self
    }

    fn reservations(&self) -> &dyn DataService<Reservation> {
        self
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let staged = stage(&tables, unit.into_changes())?;
        tables.vehicles = staged.vehicles;
        tables.reservations = staged.reservations;

        Ok(())
    }
}
