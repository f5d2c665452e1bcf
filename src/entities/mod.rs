//! Records handled by the rental service

pub mod macros;

pub mod customer;
pub mod employee;
pub mod reservation;
pub mod vehicle;

pub use customer::Customer;
pub use employee::Employee;
pub use reservation::{FuelLevel, Reservation, ReservationStatus, ReturnRejection, rental_cost};
pub use vehicle::Vehicle;
