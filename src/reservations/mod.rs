//! Reservation workflow: forms, service and HTTP handlers

pub mod forms;
pub mod handlers;
pub mod service;

pub use forms::{
    EditReservationForm, NewReservation, PickupForm, ReservationChanges, ReservationForm,
    ReturnForm,
};
pub use handlers::AppState;
pub use service::{
    CustomerHistory, MutationOutcome, ReservationService, ReservationSummary, sort_summaries,
};
