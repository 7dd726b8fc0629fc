//! # Quantdash Core Types
//!
//! The foundational vocabulary shared by every other crate in the workspace:
//! the instruments a user can pick, the investment targets they type in, and the
//! records the remote analytics service returns.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** depends on no other workspace crate.
//! - **No computation:** the records here are decoded, never derived. The
//!   analytics service owns every number; this crate only gives it a shape.
//!
//! ## Public API
//!
//! - `Subject`, `TargetParameters`: session inputs.
//! - `PredictionMode`, `Scenario`: closed sets of service-defined tags.
//! - `AnalysisPayload`, `PredictionPayload`, `BacktestPayload` and their parts.
//! - `CoreError`: the specific error types that can be returned from this crate.

pub mod enums;
pub mod error;
pub mod payloads;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{PredictionMode, Scenario};
pub use error::CoreError;
pub use payloads::{
    AnalysisPayload, BacktestMetrics, BacktestPayload, ComparisonPoint, ForecastPoint,
    InvestmentRecommendation, MarketMetrics, Momentum, MovingAveragePoint, PerformanceMetrics,
    PredictionPayload, TechnicalMetrics,
};
pub use structs::{Subject, TargetParameters, normalize_target_input};
