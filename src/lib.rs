//! cascade-rs: headless cascading vehicle-selection engine.
//!
//! This crate provides the client-side selection state machine behind
//! "Make → Model → Year" style catalog filters: the dependent-dropdown
//! cascade, the persisted committed selection, and the editing/summary
//! view contract. It owns no rendering surface, timers, or transport;
//! hosts inject a [`lookup::TermLookup`] and a [`storage::SessionStore`]
//! and drive the engine from their own event loop.

pub mod api;
pub mod core;
pub mod error;
pub mod lookup;
pub mod storage;
pub mod telemetry;

pub use api::{SelectionEngine, SelectionEngineConfig};
pub use error::{CascadeError, CascadeResult};
