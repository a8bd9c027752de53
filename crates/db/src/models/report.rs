//! Reporting query parameters and projected rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rifugio_core::lifecycle::EntryType;
use rifugio_core::types::{Date, DbId};

/// Parameters for the custody-days report: a date range and an origin
/// city.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimalDaysQuery {
    pub from: Date,
    pub to: Date,
    pub city_id: DbId,
}

/// Custody days for one animal within the queried range, summed across
/// all of its entries from the queried city.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalDaysRow {
    pub animal_id: DbId,
    pub code: String,
    pub name: Option<String>,
    pub days: i64,
}

/// The full custody-days report.
#[derive(Debug, Clone, Serialize)]
pub struct AnimalDaysReport {
    pub items: Vec<AnimalDaysRow>,
    pub total_days: i64,
}

/// Parameters for the entries report: entry date range plus an optional
/// entry-type filter.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimalEntriesQuery {
    pub from: Date,
    pub to: Date,
    pub entry_type: Option<EntryType>,
}

/// One entry within the queried range, joined to a readable city name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalEntryRow {
    pub animal_id: DbId,
    pub code: String,
    pub name: Option<String>,
    pub entry_type: String,
    pub entry_date: Date,
    pub city_name: String,
}
