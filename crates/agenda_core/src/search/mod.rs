//! Contact search entry points.
//!
//! # Responsibility
//! - Expose name search and alphabet filters used by list projections.

pub mod filter;
