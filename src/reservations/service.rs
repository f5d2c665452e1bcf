//! The reservation workflow
//!
//! [`ReservationService`] owns every reservation operation: booking a vehicle,
//! registering pickup and return, listing and history lookups, and the direct
//! edit and delete operations. Lifecycle transitions commit the reservation
//! and its vehicle's availability in one [`UnitOfWork`].

use crate::core::error::{
    ActorError, LifecycleError, RentalError, RentalResult, ValidationError,
};
use crate::core::events::{EventBus, ReservationEvent};
use crate::core::query::{ReservationQuery, SortKey, SortSpec, VehicleQuery};
use crate::core::store::{RentalStore, UnitOfWork};
use crate::core::validation::form::{INVALID_CHOICE, clean_form, validate_form};
use crate::core::{Actor, Entity, FormErrors};
use crate::entities::{Customer, Employee, Reservation, ReturnRejection, Vehicle};
use crate::reservations::forms::{
    EditReservationForm, PickupForm, ReservationForm, ReturnForm,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A reservation with the names a listing displays next to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationSummary {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub customer_name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_model: Option<String>,
}

impl ReservationSummary {
    fn new(
        reservation: Reservation,
        customer: Option<&Customer>,
        vehicle: Option<&Vehicle>,
    ) -> Self {
        Self {
            customer_name: customer.map(|c| c.name.clone()),
            vehicle_plate: vehicle.map(|v| v.plate.clone()),
            vehicle_model: vehicle.map(|v| v.model.clone()),
            reservation,
        }
    }

    fn compare(&self, other: &Self, key: SortKey) -> Ordering {
        let (a, b) = (&self.reservation, &other.reservation);
        match key {
            SortKey::StartDate => a.start_date.cmp(&b.start_date),
            SortKey::EndDate => a.end_date.cmp(&b.end_date),
            SortKey::TotalCost => a.total_cost.cmp(&b.total_cost),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Customer => self.customer_name.cmp(&other.customer_name),
            SortKey::Vehicle => self.vehicle_plate.cmp(&other.vehicle_plate),
            SortKey::Id => a.id.cmp(&b.id),
        }
    }
}

/// Order `summaries` by `sort`, breaking ties by reservation id
pub fn sort_summaries(summaries: &mut [ReservationSummary], sort: SortSpec) {
    summaries.sort_by(|a, b| {
        let primary = a.compare(b, sort.key);
        let primary = if sort.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.reservation.id.cmp(&b.reservation.id))
    });
}

/// A customer's reservations, with the customer list to pick from
#[derive(Debug, Clone, Serialize)]
pub struct CustomerHistory {
    pub customers: Vec<Customer>,
    pub selected_customer: Option<Customer>,
    pub reservations: Vec<ReservationSummary>,
}

/// Result of a successful mutation: the notice to show and the affected reservation
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutcome {
    pub message: String,
    pub reservation: ReservationSummary,
}

/// Reservation operations over a [`RentalStore`]
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn RentalStore>,
    events: Option<Arc<EventBus>>,
    default_sort: SortSpec,
}

impl ReservationService {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self {
            store,
            events: None,
            default_sort: SortSpec::default(),
        }
    }

    /// Publish lifecycle events on `bus`
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    /// Sort used by listings that request none
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn store(&self) -> &Arc<dyn RentalStore> {
        &self.store
    }

    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.events.as_ref()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Book `vehicle_id` for the customer named in `form`, handled by `actor`
    ///
    /// The vehicle is marked unavailable in the same commit. Zero or negative
    /// day spans and vehicles already unavailable are accepted.
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        form: ReservationForm,
        actor: &Actor,
    ) -> RentalResult<MutationOutcome> {
        let mut vehicle = self.require_vehicle(vehicle_id).await?;

        let customer_ref = form
            .customer_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok());
        let (cleaned, mut errors) = clean_form(form);
        let customer = self
            .check_customer(customer_ref, "customer_id", &mut errors)
            .await?;

        let input = match (cleaned, customer) {
            (Some(input), Some(_)) if errors.is_empty() => input,
            _ => return Err(ValidationError::Form(errors).into()),
        };

        if self.store.employees().get(&actor.employee_id).await?.is_none() {
            return Err(ActorError::Unknown {
                id: actor.employee_id,
            }
            .into());
        }

        if !vehicle.available {
            tracing::warn!(vehicle_id = %vehicle.id, "reserving a vehicle that is not available");
        }

        let reservation = Reservation::new(
            input.customer_id,
            &vehicle,
            actor.employee_id,
            input.start_date,
            input.end_date,
        );
        vehicle.mark_reserved();

        self.store
            .commit(
                UnitOfWork::new()
                    .insert_reservation(reservation.clone())
                    .update_vehicle(vehicle.clone()),
            )
            .await?;

        tracing::info!(
            reservation_id = %reservation.id,
            vehicle_id = %vehicle.id,
            employee_id = %actor.employee_id,
            total_cost = %reservation.total_cost,
            "reservation created"
        );

        let message = self.publish(ReservationEvent::Created {
            reservation_id: reservation.id,
            vehicle_id: vehicle.id,
            customer_id: reservation.customer_id,
            employee_id: actor.employee_id,
        });
        let summary = self.summarize(reservation).await?;
        Ok(MutationOutcome::new(message, summary))
    }

    /// Record the pickup fuel level and mark the reservation `retirada`
    pub async fn register_pickup(
        &self,
        reservation_id: Uuid,
        form: PickupForm,
    ) -> RentalResult<MutationOutcome> {
        let mut reservation = self.require_reservation(reservation_id).await?;
        let level = validate_form(form)?;
        let mut vehicle = self.require_vehicle(reservation.vehicle_id).await?;

        reservation.register_pickup(level);
        vehicle.mark_reserved();

        self.store
            .commit(
                UnitOfWork::new()
                    .update_reservation(reservation.clone())
                    .update_vehicle(vehicle),
            )
            .await?;

        tracing::info!(%reservation_id, fuel = %level, "pickup registered");

        let message = self.publish(ReservationEvent::PickedUp {
            reservation_id,
            vehicle_id: reservation.vehicle_id,
            initial_fuel_level: level,
        });
        let summary = self.summarize(reservation).await?;
        Ok(MutationOutcome::new(message, summary))
    }

    /// Record the return fuel level, finalize the reservation and release the vehicle
    ///
    /// The returned level may not be lower than the pickup level.
    pub async fn register_return(
        &self,
        reservation_id: Uuid,
        form: ReturnForm,
    ) -> RentalResult<MutationOutcome> {
        let mut reservation = self.require_reservation(reservation_id).await?;
        let level = validate_form(form)?;

        match reservation.finalize(level) {
            Ok(()) => {}
            Err(ReturnRejection::PickupNotRegistered) => {
                return Err(LifecycleError::PickupNotRegistered { reservation_id }.into());
            }
            Err(rejection @ ReturnRejection::FuelBelowPickup { .. }) => {
                tracing::debug!(%reservation_id, %rejection, "return rejected");
                let mut errors = FormErrors::new();
                errors.add("final_fuel_level", rejection.to_string());
                return Err(ValidationError::Form(errors).into());
            }
        }

        let mut vehicle = self.require_vehicle(reservation.vehicle_id).await?;
        vehicle.mark_released();

        self.store
            .commit(
                UnitOfWork::new()
                    .update_reservation(reservation.clone())
                    .update_vehicle(vehicle),
            )
            .await?;

        tracing::info!(%reservation_id, fuel = %level, "return registered");

        let message = self.publish(ReservationEvent::Returned {
            reservation_id,
            vehicle_id: reservation.vehicle_id,
            final_fuel_level: level,
        });
        let summary = self.summarize(reservation).await?;
        Ok(MutationOutcome::new(message, summary))
    }

    // -------------------------------------------------------------------------
    // Direct edit and delete
    // -------------------------------------------------------------------------

    /// Overwrite the submitted fields. No lifecycle check, no availability
    /// change and no new total cost.
    pub async fn edit(
        &self,
        reservation_id: Uuid,
        form: EditReservationForm,
    ) -> RentalResult<MutationOutcome> {
        let mut reservation = self.require_reservation(reservation_id).await?;

        let customer_ref = form
            .customer_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok());
        let (cleaned, mut errors) = clean_form(form);
        self.check_customer(customer_ref, "customer_id", &mut errors)
            .await?;

        let changes = match cleaned {
            Some(changes) if errors.is_empty() => changes,
            _ => return Err(ValidationError::Form(errors).into()),
        };

        changes.apply(&mut reservation);
        reservation.touch();

        self.store
            .commit(UnitOfWork::new().update_reservation(reservation.clone()))
            .await?;

        tracing::info!(%reservation_id, status = %reservation.status, "reservation updated");

        let message = self.publish(ReservationEvent::Updated {
            reservation_id,
            status: reservation.status,
        });
        let summary = self.summarize(reservation).await?;
        Ok(MutationOutcome::new(message, summary))
    }

    /// Remove the reservation. The vehicle's availability is left as it is.
    pub async fn delete(&self, reservation_id: Uuid) -> RentalResult<MutationOutcome> {
        let reservation = self.require_reservation(reservation_id).await?;
        let vehicle = self.store.vehicles().get(&reservation.vehicle_id).await?;

        if reservation.status.is_active() && vehicle.as_ref().is_some_and(|v| !v.available) {
            tracing::warn!(
                %reservation_id,
                vehicle_id = %reservation.vehicle_id,
                "deleted reservation was holding its vehicle; vehicle stays unavailable"
            );
        }

        self.store
            .commit(UnitOfWork::new().delete_reservation(reservation_id))
            .await?;

        tracing::info!(%reservation_id, "reservation deleted");

        let message = self.publish(ReservationEvent::Deleted {
            reservation_id,
            vehicle_id: reservation.vehicle_id,
        });
        let summary = self.summarize(reservation).await?;
        Ok(MutationOutcome::new(message, summary))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Reservations whose customer name contains `q` (case-insensitive), sorted
    ///
    /// The sort key is validated before the store is read.
    pub async fn list(&self, query: &ReservationQuery) -> RentalResult<Vec<ReservationSummary>> {
        let sort = query.sort_spec(self.default_sort)?;
        let needle = query.search_term().map(str::to_lowercase);

        let mut summaries = self.summarize_all(self.store.reservations().list().await?).await?;
        if let Some(needle) = &needle {
            summaries.retain(|s| {
                s.customer_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(needle.as_str()))
            });
        }
        sort_summaries(&mut summaries, sort);

        tracing::debug!(q = ?needle, %sort, count = summaries.len(), "reservations listed");
        Ok(summaries)
    }

    /// Every customer, plus the selected customer's reservations
    pub async fn history(&self, customer_id: Option<Uuid>) -> RentalResult<CustomerHistory> {
        let customers = self.store.customers().list().await?;

        let Some(customer_id) = customer_id else {
            return Ok(CustomerHistory {
                customers,
                selected_customer: None,
                reservations: Vec::new(),
            });
        };

        let selected = customers
            .iter()
            .find(|c| c.id == customer_id)
            .cloned()
            .ok_or_else(|| RentalError::not_found(Customer::resource_name_singular(), customer_id))?;

        let reservations = self
            .store
            .reservations()
            .search("customer_id", &customer_id.to_string())
            .await?;
        let mut summaries = self.summarize_all(reservations).await?;
        sort_summaries(&mut summaries, self.default_sort);

        tracing::debug!(%customer_id, count = summaries.len(), "customer history");
        Ok(CustomerHistory {
            customers,
            selected_customer: Some(selected),
            reservations: summaries,
        })
    }

    pub async fn get(&self, reservation_id: Uuid) -> RentalResult<ReservationSummary> {
        let reservation = self.require_reservation(reservation_id).await?;
        self.summarize(reservation).await
    }

    // -------------------------------------------------------------------------
    // Reference lookups
    // -------------------------------------------------------------------------

    pub async fn list_vehicles(&self, query: &VehicleQuery) -> RentalResult<Vec<Vehicle>> {
        let vehicles = match query.available {
            Some(available) => {
                self.store
                    .vehicles()
                    .search("available", &available.to_string())
                    .await?
            }
            None => self.store.vehicles().list().await?,
        };
        Ok(vehicles)
    }

    pub async fn get_vehicle(&self, vehicle_id: Uuid) -> RentalResult<Vehicle> {
        self.require_vehicle(vehicle_id).await
    }

    pub async fn list_customers(&self) -> RentalResult<Vec<Customer>> {
        Ok(self.store.customers().list().await?)
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> RentalResult<Customer> {
        self.store
            .customers()
            .get(&customer_id)
            .await?
            .ok_or_else(|| RentalError::not_found(Customer::resource_name_singular(), customer_id))
    }

    pub async fn list_employees(&self) -> RentalResult<Vec<Employee>> {
        Ok(self.store.employees().list().await?)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn publish(&self, event: ReservationEvent) -> &'static str {
        let message = event.message();
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
        message
    }

    async fn require_reservation(&self, id: Uuid) -> RentalResult<Reservation> {
        self.store
            .reservations()
            .get(&id)
            .await?
            .ok_or_else(|| RentalError::not_found(Reservation::resource_name_singular(), id))
    }

    async fn require_vehicle(&self, id: Uuid) -> RentalResult<Vehicle> {
        self.store
            .vehicles()
            .get(&id)
            .await?
            .ok_or_else(|| RentalError::not_found(Vehicle::resource_name_singular(), id))
    }

    /// Look up a referenced customer, recording an invalid choice on `field` when missing
    async fn check_customer(
        &self,
        customer_id: Option<Uuid>,
        field: &str,
        errors: &mut FormErrors,
    ) -> RentalResult<Option<Customer>> {
        let Some(customer_id) = customer_id else {
            return Ok(None);
        };
        let customer = self.store.customers().get(&customer_id).await?;
        if customer.is_none() && !errors.contains(field) {
            errors.add(field, INVALID_CHOICE);
        }
        Ok(customer)
    }

    async fn summarize(&self, reservation: Reservation) -> RentalResult<ReservationSummary> {
        let customer = self.store.customers().get(&reservation.customer_id).await?;
        let vehicle = self.store.vehicles().get(&reservation.vehicle_id).await?;
        Ok(ReservationSummary::new(
            reservation,
            customer.as_ref(),
            vehicle.as_ref(),
        ))
    }

    async fn summarize_all(
        &self,
        reservations: Vec<Reservation>,
    ) -> RentalResult<Vec<ReservationSummary>> {
        let customers: HashMap<Uuid, Customer> = self
            .store
            .customers()
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let vehicles: HashMap<Uuid, Vehicle> = self
            .store
            .vehicles()
            .list()
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        Ok(reservations
            .into_iter()
            .map(|r| {
                let customer = customers.get(&r.customer_id);
                let vehicle = vehicles.get(&r.vehicle_id);
                ReservationSummary::new(r, customer, vehicle)
            })
            .collect())
    }
}

impl MutationOutcome {
    fn new(message: &str, reservation: ReservationSummary) -> Self {
        Self {
            message: message.to_string(),
            reservation,
        }
    }
}
