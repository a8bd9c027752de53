//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Lifecycle DTOs are additionally `Serialize` so the animal log can store
//! a JSON snapshot of the triggering request.

pub mod adopter;
pub mod animal;
pub mod animal_log;
pub mod city;
pub mod document;
pub mod report;
pub mod species;
pub mod vet;
