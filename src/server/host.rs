//! Server host for transport-agnostic API exposure
//!
//! The `ServerHost` holds everything an exposure needs to serve the rental
//! API: the store, the reservation service built on it, the actor resolver
//! and the optional event bus. It is the single source of truth for the
//! application state; the REST exposure only turns it into a router.

use crate::core::actor::ActorResolver;
use crate::core::events::EventBus;
use crate::core::query::SortSpec;
use crate::core::store::RentalStore;
use crate::reservations::{AppState, ReservationService};
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(Arc::new(InMemoryStore::new()), Arc::new(HeaderActorResolver))
///     .with_event_bus(EventBus::new(1024));
///
/// let app = RestExposure::build_router(Arc::new(host), vec![]);
/// ```
pub struct ServerHost {
    /// Storage for vehicles, customers, employees and reservations
    pub store: Arc<dyn RentalStore>,

    /// Reservation workflow over `store`
    pub service: ReservationService,

    /// Strategy deciding which employee acts on a request
    pub actor_resolver: Arc<dyn ActorResolver>,

    /// Optional event bus for lifecycle notifications
    ///
    /// When present, the reservation service publishes an event for every
    /// successful mutation.
    pub event_bus: Option<Arc<EventBus>>,
}

impl ServerHost {
    pub fn new(store: Arc<dyn RentalStore>, actor_resolver: Arc<dyn ActorResolver>) -> Self {
        Self {
            service: ReservationService::new(store.clone()),
            store,
            actor_resolver,
            event_bus: None,
        }
    }

    /// Set the event bus and wire it into the reservation service
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        let bus = Arc::new(event_bus);
        self.service = self.service.with_event_bus(bus.clone());
        self.event_bus = Some(bus);
        self
    }

    /// Sort used by reservation listings that request none
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.service = self.service.with_default_sort(sort);
        self
    }

    /// Get a reference to the event bus (if configured)
    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.event_bus.as_ref()
    }

    /// Handler state derived from the host
    pub fn app_state(&self) -> AppState {
        AppState::new(self.service.clone(), self.actor_resolver.clone())
    }
}
