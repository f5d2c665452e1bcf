//! Service trait for record storage

use crate::core::Data;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing stored records
///
/// Implementations provide CRUD operations for a specific record type.
/// The reservation workflow is agnostic to the underlying storage mechanism.
///
/// Errors are `anyhow` errors; backends wrap typed
/// [`EntityError`](crate::core::error::EntityError) or
/// [`StorageError`](crate::core::error::StorageError) values so callers can
/// recover them by downcasting.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Create a new record. Fails if the identifier is already taken.
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all records, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing record. Fails if it does not exist.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete a record. Deleting a missing record is not an error.
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Search records whose indexed field equals the raw value
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;
}
