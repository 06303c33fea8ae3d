//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into UI intent handling.
//! - Keep FFI/CLI hosts decoupled from storage details.

pub mod clock;
pub mod contact_book;
pub mod notice;
