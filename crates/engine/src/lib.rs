//! # Quantdash Engine
//!
//! The workflow coordinator: the only component with real decisions to make.
//! It sequences the three dependent remote operations (analysis, then prediction,
//! then backtest), tracks each one's loading and error state independently, and
//! invalidates downstream results when what they were computed from changes.
//!
//! ## Architectural Principles
//!
//! - **Single writer:** `WorkflowCoordinator` owns `SessionState` outright. Observers
//!   get `Arc` snapshots through a `watch` channel and never a mutable reference.
//! - **Supersede, don't queue:** each slot has one in-flight call. A newer dispatch
//!   bumps the slot's generation and the older call's result is dropped on arrival.
//! - **Failures are state:** gateway errors become `failed(message)` on their slot.
//!   Only `PreconditionError` is returned to the caller.
//!
//! ## Public API
//!
//! - `WorkflowCoordinator`: commands, resolution pumping and observation.
//! - `CoordinatorPolicy`: same-subject behavior, request timeout, backtest parameters.
//! - `ApplyOutcome`: whether a resolution was applied or discarded as stale.
//! - `PreconditionError`: synchronous rejection of an out-of-order command.

pub mod coordinator;
pub mod error;

pub use coordinator::{ApplyOutcome, CoordinatorPolicy, WorkflowCoordinator};
pub use error::PreconditionError;
