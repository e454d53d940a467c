//! # Meridian Financial Analyzer
//!
//! This crate compares two adjacent trailing periods of revenue and expense
//! and derives growth rates, margin, break-even ratio, cash runway, a health
//! score, qualitative insights, and a naive next-period projection.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`
//!   and `configuration`. Both periods arrive pre-filtered by the caller;
//!   the analyzer performs no date filtering of its own.
//! - **Stateless Calculation:** `FinancialAnalyzer` takes two `PeriodData`
//!   slices and produces a `FinancialSummary`; nothing survives the call.
//!
//! ## Public API
//!
//! - `FinancialAnalyzer`: The main struct that contains the rule logic.
//! - `FinancialSummary` / `FinancialInsight`: The structured output the
//!   dashboard cards render.
//! - `AnalyzerError`: The specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{FinancialAnalyzer, PeriodData};
pub use error::AnalyzerError;
pub use report::{FinancialInsight, FinancialSummary, InsightKind, ProjectedPeriod};
