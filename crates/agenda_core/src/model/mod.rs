//! Domain model for the contact manager.
//!
//! # Responsibility
//! - Define canonical data structures used by the state container and views.
//!
//! # Invariants
//! - A contact is identified by its email inside one collection.

pub mod contact;
