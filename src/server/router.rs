//! Router builder for the reservation and lookup routes

use crate::reservations::handlers::{
    AppState, create_reservation, customer_history, delete_reservation, edit_reservation,
    get_customer, get_reservation, get_vehicle, list_customers, list_employees,
    list_reservations, list_vehicles, register_pickup, register_return,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the reservation routes
///
/// - POST /vehicles/{id}/reservations - Book a vehicle
/// - GET /reservations - List, search (`q`) and sort (`sort`)
/// - GET /reservations/history - A customer's reservations (`cliente`)
/// - GET /reservations/{id} - Fetch one reservation
/// - POST|PUT /reservations/{id} - Edit, DELETE /reservations/{id} - Delete
/// - POST /reservations/{id}/pickup, /return, /delete
/// - GET /vehicles, /vehicles/{id}, /customers, /customers/{id}, /employees
pub fn build_reservation_routes(state: AppState) -> Router {
    Router::new()
        .route("/vehicles/{id}/reservations", post(create_reservation))
        .route("/reservations", get(list_reservations))
        .route("/reservations/history", get(customer_history))
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .post(edit_reservation)
                .put(edit_reservation)
                .delete(delete_reservation),
        )
        .route("/reservations/{id}/pickup", post(register_pickup))
        .route("/reservations/{id}/return", post(register_return))
        .route("/reservations/{id}/delete", post(delete_reservation))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/{id}", get(get_vehicle))
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer))
        .route("/employees", get(list_employees))
        .with_state(state)
}
