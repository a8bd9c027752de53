use crate::types::{Date, DbId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Exit attempted for an animal with no current entry.
    #[error("Animal {animal_id} is not present in the shelter")]
    AnimalNotPresent { animal_id: DbId },

    /// Exit (or a dependent operation) attempted before the entry date was
    /// recorded.
    #[error("Entry for animal {animal_id} is not complete")]
    EntryNotComplete { animal_id: DbId },

    /// Supplied exit date precedes the entry date.
    #[error("Exit date {exit_date} precedes entry date {entry_date}")]
    ExitNotValid { entry_date: Date, exit_date: Date },

    /// Adoption creation attempted while an open adoption already exists
    /// for the entry.
    #[error("Entry {entry_id} already has an open adoption")]
    ExistingAdoption { entry_id: DbId },

    /// Chip code uniqueness violation; carries the id of the animal that
    /// already owns the chip code.
    #[error("Chip code is already assigned to animal {animal_id}")]
    ChipCodeInUse { animal_id: DbId },

    /// Invalid lifecycle transitions without a dedicated variant: double
    /// exit, completing a non-existent entry, re-entry while an entry is
    /// still open.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
