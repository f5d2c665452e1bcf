//! HTTP handlers for reservation operations and reference lookups
//!
//! Handlers stay thin: they parse path identifiers, resolve the acting
//! employee where one is needed and delegate to [`ReservationService`].

use crate::core::actor::ActorResolver;
use crate::core::error::{RentalResult, ValidationError};
use crate::core::query::{HistoryQuery, ReservationQuery, VehicleQuery};
use crate::core::validation::FormBody;
use crate::entities::{Customer, Employee, Vehicle};
use crate::reservations::forms::{EditReservationForm, PickupForm, ReservationForm, ReturnForm};
use crate::reservations::service::{
    CustomerHistory, MutationOutcome, ReservationService, ReservationSummary,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ReservationService,
    pub actor_resolver: Arc<dyn ActorResolver>,
}

impl AppState {
    pub fn new(service: ReservationService, actor_resolver: Arc<dyn ActorResolver>) -> Self {
        Self {
            service,
            actor_resolver,
        }
    }
}

/// Parse an identifier taken from the URL path
fn parse_id(field: &str, raw: &str) -> RentalResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ValidationError::InvalidEntityId {
            field: field.to_string(),
            value: raw.to_string(),
        }
        .into()
    })
}

// =============================================================================
// Reservations
// =============================================================================

/// `POST /vehicles/{id}/reservations`
pub async fn create_reservation(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    headers: HeaderMap,
    FormBody(form): FormBody<ReservationForm>,
) -> RentalResult<(StatusCode, Json<MutationOutcome>)> {
    let vehicle_id = parse_id("vehicle_id", &vehicle_id)?;
    let actor = state
        .actor_resolver
        .resolve(&headers, state.service.store().as_ref())
        .await?;

    let outcome = state.service.create(vehicle_id, form, &actor).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `GET /reservations?q=&sort=`
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationQuery>,
) -> RentalResult<Json<Vec<ReservationSummary>>> {
    Ok(Json(state.service.list(&query).await?))
}

/// `GET /reservations/history?cliente=`
pub async fn customer_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> RentalResult<Json<CustomerHistory>> {
    let customer_id = query.customer_id()?;
    Ok(Json(state.service.history(customer_id).await?))
}

/// `GET /reservations/{id}`
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RentalResult<Json<ReservationSummary>> {
    let id = parse_id("reservation_id", &id)?;
    Ok(Json(state.service.get(id).await?))
}

/// `POST /reservations/{id}/pickup`
pub async fn register_pickup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<PickupForm>,
) -> RentalResult<Json<MutationOutcome>> {
    let id = parse_id("reservation_id", &id)?;
    Ok(Json(state.service.register_pickup(id, form).await?))
}

/// `POST /reservations/{id}/return`
pub async fn register_return(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<ReturnForm>,
) -> RentalResult<Json<MutationOutcome>> {
    let id = parse_id("reservation_id", &id)?;
    Ok(Json(state.service.register_return(id, form).await?))
}

/// `POST|PUT /reservations/{id}`
pub async fn edit_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<EditReservationForm>,
) -> RentalResult<Json<MutationOutcome>> {
    let id = parse_id("reservation_id", &id)?;
    Ok(Json(state.service.edit(id, form).await?))
}

/// `DELETE /reservations/{id}` and `POST /reservations/{id}/delete`
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RentalResult<Json<MutationOutcome>> {
    let id = parse_id("reservation_id", &id)?;
    Ok(Json(state.service.delete(id).await?))
}

// =============================================================================
// Reference lookups
// =============================================================================

pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> RentalResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.service.list_vehicles(&query).await?))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RentalResult<Json<Vehicle>> {
    let id = parse_id("vehicle_id", &id)?;
    Ok(Json(state.service.get_vehicle(id).await?))
}

pub async fn list_customers(State(state): State<AppState>) -> RentalResult<Json<Vec<Customer>>> {
    Ok(Json(state.service.list_customers().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RentalResult<Json<Customer>> {
    let id = parse_id("customer_id", &id)?;
    Ok(Json(state.service.get_customer(id).await?))
}

pub async fn list_employees(State(state): State<AppState>) -> RentalResult<Json<Vec<Employee>>> {
    Ok(Json(state.service.list_employees().await?))
}
