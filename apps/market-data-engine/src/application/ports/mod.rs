//! Ports - boundary traits the core depends on.
//!
//! The transport port hides the HTTP stack from the pagination logic, and the
//! bar-store port hides the relational store from everything else. Both are
//! implemented under `infrastructure`.

pub mod bar_store;
pub mod transport;

pub use bar_store::{BarStorePort, StoreError};
pub use transport::{DataTransport, TransportError};
