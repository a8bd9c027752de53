//! Animal entity, entry/adoption rows, and lifecycle DTOs.
//!
//! `entry_type` / `exit_type` / `sex` are TEXT columns constrained by the
//! schema; entity structs carry the raw string, request DTOs carry the
//! typed enums from `rifugio_core::lifecycle`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use rifugio_core::lifecycle::{EntryType, ExitType};
use rifugio_core::types::{Date, DbId, Timestamp};

/// An animal row from the `animals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub code: String,
    pub species_id: DbId,
    pub breed_id: Option<DbId>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    pub chip_code: Option<String>,
    pub chip_code_set: bool,
    pub sterilized: bool,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One shelter stay, from the `animal_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalEntry {
    pub id: DbId,
    pub animal_id: DbId,
    pub entry_type: String,
    pub origin_city_id: DbId,
    pub entry_date: Option<Date>,
    pub exit_date: Option<Date>,
    pub exit_type: Option<String>,
    pub current: bool,
    pub created_at: Timestamp,
}

/// An adoption linking an animal, an adopter, and the entry during which
/// the adoption occurred.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Adoption {
    pub id: DbId,
    pub animal_id: DbId,
    pub adopter_id: DbId,
    pub entry_id: DbId,
    pub completed_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for registering a new animal. Creates the animal plus its initial
/// entry (current, entry date still unset).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAnimal {
    pub species_id: DbId,
    pub breed_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub entry_type: EntryType,
    pub origin_city_id: DbId,
    pub rescue_date: Date,
    pub notes: Option<String>,
}

/// DTO for the partial update of mutable animal fields.
///
/// `chip_code` is write-once: once an animal has a chip code recorded, a
/// later value here is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAnimal {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub breed_id: Option<DbId>,
    pub sex: Option<String>,
    pub birth_date: Option<Date>,
    #[validate(length(min = 1, max = 35))]
    pub chip_code: Option<String>,
    pub sterilized: Option<bool>,
    pub notes: Option<String>,
}

/// DTO for recording the entry date on the current entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteEntry {
    pub entry_date: Date,
}

/// DTO for opening a new entry after the animal has exited (re-entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    pub entry_type: EntryType,
    pub origin_city_id: DbId,
}

/// DTO for recording an exit. `adopter_id` is required when `exit_type`
/// is `adoption` and ignored otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitAnimal {
    pub exit_date: Date,
    pub exit_type: ExitType,
    pub adopter_id: Option<DbId>,
}

/// Filter parameters for searching currently present animals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalSearchQuery {
    /// Case-insensitive substring match on the animal name.
    pub name: Option<String>,
    pub species_id: Option<DbId>,
    pub origin_city_id: Option<DbId>,
    pub entry_type: Option<EntryType>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Projected row returned by the search listing: the current entry joined
/// to species, origin city, and open-adoption presence.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalSummary {
    pub id: DbId,
    pub code: String,
    pub name: Option<String>,
    pub species_name: String,
    pub city_name: String,
    pub entry_type: String,
    pub entry_date: Option<Date>,
    pub chip_code: Option<String>,
    pub has_open_adoption: bool,
}

/// Paginated search response.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalPage {
    pub items: Vec<AnimalSummary>,
    pub total: i64,
}
