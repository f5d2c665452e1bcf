//! Entity traits defining the core abstraction for all stored records

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Base trait for every record kept by the rental store.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// The trait is implemented through [`impl_entity!`](crate::impl_entity) for
/// the concrete entity structs.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "vehicles", "reservations")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "vehicle", "reservation")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at` to now
    fn touch(&mut self);
}

/// Trait for entities exposed through lookups and searches.
///
/// Data entities extend the base Entity with:
/// - label: A human-readable label (customer name, vehicle plate, ...)
/// - indexed_fields: Fields that can be searched
/// - field_value: Dynamic field access
pub trait Data: Entity {
    /// Human-readable label of this record
    ///
    /// Records without a natural label fall back to their singular resource name.
    fn label(&self) -> &str {
        Self::resource_name_singular()
    }

    /// List of fields that can be used with `DataService::search`
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
