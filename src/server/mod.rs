//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires the store, the
//! reservation service and the actor resolver into a `ServerHost`, and
//! exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use router::build_reservation_routes;
