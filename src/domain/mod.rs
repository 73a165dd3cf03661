//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw acquisition shapes (`RawTable`, `RawRecord`)
//! - the canonical date-indexed table (`CanonicalTable`, `CanonicalRow`)
//! - named and derived series (`NamedSeries`, `DerivedSeries`)
//! - cross-series alignment output (`AlignedTable`)
//! - the missing-value sentinel and alert labels

pub mod types;

pub use types::*;
