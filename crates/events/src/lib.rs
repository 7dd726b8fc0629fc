//! # Quantdash Events
//!
//! This crate defines the shared language between the workflow coordinator and
//! everything that observes it: the session state snapshot and the stream of
//! events describing how that state changed.
//!
//! As a Layer 1 crate, it depends only on `core-types`. The coordinator is the only
//! writer of these types; the presentation layer reads them through `Arc` snapshots.

// Declare the modules that make up this crate.
pub mod messages;
pub mod state;

// Re-export the core types to provide a clean public API.
pub use messages::{SessionEvent, SessionEventKind};
pub use state::{OperationResult, OperationStatus, PerSlot, SessionState, Slot};
