//! Durable key-value storage for UI state.
//!
//! # Responsibility
//! - Define the string-keyed slot contract the contact book persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - A slot holds exactly one value; writes replace it wholesale.
//! - Reading an unknown key is not an error.

pub mod kv;

pub use kv::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
