//! Core module containing the fundamental traits and types of the rental service

pub mod actor;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use actor::{Actor, ActorPolicy, ActorResolver, FirstEmployeeResolver, HeaderActorResolver};
pub use entity::{Data, Entity};
pub use error::{RentalError, RentalResult};
pub use events::{EventBus, EventEnvelope, ReservationEvent};
pub use field::FieldValue;
pub use query::{HistoryQuery, ReservationQuery, SortKey, SortSpec, VehicleQuery};
pub use service::DataService;
pub use store::{Change, RentalStore, UnitOfWork};
pub use validation::{Form, FormBody, FormErrors, clean_form, validate_form};
