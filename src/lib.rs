//! # rental-rs
//!
//! Vehicle rental reservations: booking, pickup and return registration,
//! listings and customer history, exposed over a REST API.
//!
//! ## Features
//!
//! - **Reservation lifecycle**: `created → retirada → finalizada`, with the
//!   vehicle's availability flag following each transition
//! - **Fuel check on return**: the returned fuel level may not be lower than at pickup
//! - **Atomic transitions**: reservation and vehicle writes are committed as one unit of work
//! - **Validated listings**: search by customer name, sort by an enumerated key
//! - **Explicit actor**: the handling employee comes from the request, never from a placeholder
//! - **Lifecycle events**: every mutation is published on a broadcast event bus
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rental::prelude::*;
//!
//! let store = InMemoryStore::new();
//! load_seed(&store, &config.seed).await?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_config(&config)?
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod reservations;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        actor::{Actor, ActorPolicy, ActorResolver, FirstEmployeeResolver, HeaderActorResolver},
        entity::{Data, Entity},
        error::{RentalError, RentalResult},
        events::{EventBus, EventEnvelope, ReservationEvent},
        field::FieldValue,
        query::{ReservationQuery, SortKey, SortSpec},
        service::DataService,
        store::{RentalStore, UnitOfWork},
        validation::{FormBody, FormErrors},
    };

    // === Macros ===
    pub use crate::{impl_data_entity, impl_entity};

    // === Entities ===
    pub use crate::entities::{
        Customer, Employee, FuelLevel, Reservation, ReservationStatus, Vehicle,
    };

    // === Reservations ===
    pub use crate::reservations::{
        EditReservationForm, MutationOutcome, PickupForm, ReservationForm, ReservationService,
        ReservationSummary, ReturnForm,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, SeedData, load_seed};

    // === Config ===
    pub use crate::config::RentalConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
