//! `macro-monitor` library crate.
//!
//! Data core for a fixed-income / macro dashboard:
//!
//! - acquire treasury yield-curve tables, FRED series, and equity closing
//!   prices behind injectable source traits
//! - normalize heterogeneous raw tables into one canonical date-indexed table
//! - derive spreads, z-scores, percentage changes, and monthly resamples
//! - align series on common dates for cross-asset comparison
//! - summarize indicators with threshold alerts
//!
//! Rendering, export, and user interaction belong to the consuming shell;
//! this crate exposes data types and pure transforms only, so front-ends
//! (and tests) can drive the same pipeline.

pub mod align;
pub mod data;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod stats;
