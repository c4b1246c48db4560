//! Persistence adapters implementing the bar-store port.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryBarStore;
pub use postgres::PostgresBarStore;
