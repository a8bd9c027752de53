//! Domain logic shared across the Rifugio backend.
//!
//! This crate has no I/O: it holds shared type aliases, the domain error
//! enum, the animal code generation rule, the custody day-counting rule,
//! and the entry/exit lifecycle vocabulary. Both the repository layer and
//! the API layer depend on it.

pub mod code;
pub mod days;
pub mod error;
pub mod lifecycle;
pub mod types;
