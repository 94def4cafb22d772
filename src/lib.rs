//! Leave request validation and balance engine.
//!
//! This crate validates employee leave requests against calendar rules,
//! overlap checks and per-category balances, drives the request lifecycle
//! (pending, approved, rejected, cancelled) with atomic balance accounting,
//! and exposes the operations over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod store;
