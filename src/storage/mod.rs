//! Storage implementations

pub mod in_memory;
pub mod seed;

pub use in_memory::{InMemoryStore, Stored, Tables};
pub use seed::{SeedData, load_seed};
