//! # Meridian Sales Forecaster
//!
//! This crate fits a linear trend to historical daily revenue and projects it
//! a fixed horizon forward, with a day-of-week seasonality adjustment and a
//! ±2σ confidence band around every point.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0) and
//!   `configuration`.
//! - **Stateless Calculation:** The `ForecastEngine` is a stateless
//!   calculator. It takes a slice of sale records as input and produces a
//!   `ForecastReport` as output. This makes it highly reliable and easy to
//!   test.
//!
//! ## Public API
//!
//! - `ForecastEngine`: The main struct that contains the calculation logic.
//! - `ForecastReport`: The standardized struct holding predictions, model
//!   diagnostics and the daily aggregates the model was fitted on.
//! - `ForecastError`: The specific error types that can be returned from this
//!   crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::ForecastEngine;
pub use error::ForecastError;
pub use report::{
    ConfidenceInterval, DailyAggregate, ForecastReport, ModelInfo, PredictionPoint,
    MODEL_INSUFFICIENT_DATA, MODEL_LINEAR_REGRESSION,
};
