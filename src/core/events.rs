//! Reservation events and the notification bus
//!
//! Every successful reservation mutation produces a [`ReservationEvent`]. The
//! event's [`message`](ReservationEvent::message) is the user-facing success
//! notice returned with the HTTP response, and the event itself is published
//! on the [`EventBus`] for anyone listening (dashboards, mailers, tests).
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(1024);
//! let mut rx = event_bus.subscribe();
//!
//! event_bus.publish(ReservationEvent::Deleted { reservation_id, vehicle_id });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{}", envelope.event.message());
//! }
//! ```

use crate::entities::{FuelLevel, ReservationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events emitted by the reservation lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReservationEvent {
    /// A reservation was created and its vehicle marked unavailable
    Created {
        reservation_id: Uuid,
        vehicle_id: Uuid,
        customer_id: Uuid,
        employee_id: Uuid,
    },
    /// The customer took the vehicle
    PickedUp {
        reservation_id: Uuid,
        vehicle_id: Uuid,
        initial_fuel_level: FuelLevel,
    },
    /// The vehicle came back and the reservation was finalized
    Returned {
        reservation_id: Uuid,
        vehicle_id: Uuid,
        final_fuel_level: FuelLevel,
    },
    /// A reservation was edited directly
    Updated {
        reservation_id: Uuid,
        status: ReservationStatus,
    },
    /// A reservation was removed
    Deleted {
        reservation_id: Uuid,
        vehicle_id: Uuid,
    },
}

impl ReservationEvent {
    /// The reservation this event relates to
    pub fn reservation_id(&self) -> Uuid {
        match self {
            ReservationEvent::Created { reservation_id, .. }
            | ReservationEvent::PickedUp { reservation_id, .. }
            | ReservationEvent::Returned { reservation_id, .. }
            | ReservationEvent::Updated { reservation_id, .. }
            | ReservationEvent::Deleted { reservation_id, .. } => *reservation_id,
        }
    }

    /// Get the action name
    pub fn action(&self) -> &'static str {
        match self {
            ReservationEvent::Created { .. } => "created",
            ReservationEvent::PickedUp { .. } => "picked_up",
            ReservationEvent::Returned { .. } => "returned",
            ReservationEvent::Updated { .. } => "updated",
            ReservationEvent::Deleted { .. } => "deleted",
        }
    }

    /// User-facing success notice for this event
    pub fn message(&self) -> &'static str {
        match self {
            ReservationEvent::Created { .. } => "Reservation created successfully.",
            ReservationEvent::PickedUp { .. } => "Pickup registered successfully.",
            ReservationEvent::Returned { .. } => "Return registered successfully.",
            ReservationEvent::Updated { .. } => "Reservation updated successfully.",
            ReservationEvent::Deleted { .. } => "Reservation deleted successfully.",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ReservationEvent,
}

impl EventEnvelope {
    /// Create a new event envelope
    pub fn new(event: ReservationEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Uses `tokio::sync::broadcast`, so any number of receivers can listen. The
/// bus is cheap to clone and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. With no subscribers the event is dropped.
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: ReservationEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
