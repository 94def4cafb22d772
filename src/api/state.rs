//! Application state for the leave engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::LeaveEngine;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// principally the engine itself.
#[derive(Clone)]
pub struct AppState {
    /// The engine serving every route.
    engine: Arc<LeaveEngine>,
}

impl AppState {
    /// Creates a new application state over the given engine.
    pub fn new(engine: LeaveEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &LeaveEngine {
        &self.engine
    }
}
