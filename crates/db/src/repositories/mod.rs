//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Plain CRUD repositories return
//! `sqlx::Error`; the animal repository's lifecycle operations return
//! [`crate::error::DbError`] because they also fail on domain rules.

pub mod adopter_repo;
pub mod animal_repo;
pub mod city_repo;
pub mod document_repo;
pub mod species_repo;
pub mod vet_repo;

pub use adopter_repo::AdopterRepo;
pub use animal_repo::AnimalRepo;
pub use city_repo::CityRepo;
pub use document_repo::DocumentRepo;
pub use species_repo::SpeciesRepo;
pub use vet_repo::VetRepo;
