//! # Meridian Inventory Optimizer
//!
//! This crate turns a snapshot of stock levels plus a trailing window of
//! recent sales into prioritized reorder recommendations and a fleet-wide
//! optimization score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`
//!   and `configuration`. The recent-sales window is filtered by the caller;
//!   this crate never consults the clock, which keeps it trivially testable.
//! - **Stateless Calculation:** `InventoryOptimizer` takes its inputs, emits
//!   an `InventorySummary`, and holds nothing between calls.
//!
//! ## Public API
//!
//! - `InventoryOptimizer`: The main struct that contains the decision logic.
//! - `InventorySummary` / `ReorderRecommendation`: The structured output the
//!   dashboard renders.
//! - `OptimizerError`: The specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::InventoryOptimizer;
pub use error::OptimizerError;
pub use report::{
    InventorySummary, Priority, ReorderRecommendation, NO_STOCKOUT_SENTINEL,
};
