//! UI-facing projections.
//!
//! # Responsibility
//! - Model the list and form views as plain state so hosts only render.
//! - Translate user gestures into intents for the contact book.
//!
//! # Invariants
//! - Views never mutate the contact collection themselves.

pub mod contact_form;
pub mod contact_list;
