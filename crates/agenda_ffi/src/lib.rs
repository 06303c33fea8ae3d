//! FFI bridge crate for the Agenda UI host.

pub mod api;
