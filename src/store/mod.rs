//! Persistence layer for the engine.
//!
//! Persistence mechanics are an external concern; the engine only relies
//! on the transactional read-then-write contract this module provides.

mod memory;

pub use memory::{MemoryStore, RequestFilter, StoreInner};
