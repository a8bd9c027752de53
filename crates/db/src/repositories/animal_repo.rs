//! Repository for animals, their shelter stays, adoptions, and the
//! append-only event log.
//!
//! This is the one repository with real business rules. Every lifecycle
//! operation (create, complete_entry, add_entry, exit, update) runs its
//! statements in a single transaction and appends a log row before
//! committing. The one-current-entry invariant is enforced here and backed
//! by a partial unique index on `animal_entries`.

use sqlx::{PgConnection, PgPool};

use rifugio_core::code::{animal_code, code_prefix};
use rifugio_core::error::CoreError;
use rifugio_core::lifecycle::{log_events, ExitType};
use rifugio_core::types::{Date, DbId};

use crate::error::{is_unique_violation, DbError};
use crate::models::animal::{
    Adoption, Animal, AnimalEntry, AnimalPage, AnimalSearchQuery, AnimalSummary, CompleteEntry,
    CreateAnimal, ExitAnimal, NewEntry, UpdateAnimal,
};
use crate::models::animal_log::AnimalLog;
use crate::models::document::AnimalDocument;
use crate::models::report::{
    AnimalDaysQuery, AnimalDaysReport, AnimalDaysRow, AnimalEntriesQuery, AnimalEntryRow,
};
use crate::{clamp_limit, clamp_offset};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const ANIMAL_COLUMNS: &str = "\
    id, code, species_id, breed_id, name, sex, birth_date, chip_code, \
    chip_code_set, sterilized, notes, deleted_at, created_at, updated_at";

const ENTRY_COLUMNS: &str = "\
    id, animal_id, entry_type, origin_city_id, entry_date, exit_date, \
    exit_type, current, created_at";

const ADOPTION_COLUMNS: &str =
    "id, animal_id, adopter_id, entry_id, completed_at, returned_at, created_at";

const LOG_COLUMNS: &str = "id, animal_id, event, payload, operator, created_at";

/// Day-count expression shared by the custody-days report. Mirrors
/// `rifugio_core::days::custody_days`: the entry day is excluded, the exit
/// (or truncation) day is included. `$2` is the range start, `$3` the
/// range end.
const DAYS_EXPR: &str = "\
    GREATEST(0, (LEAST(COALESCE(e.exit_date, $3), $3) + 1) \
              - GREATEST(e.entry_date + 1, $2))";

// ---------------------------------------------------------------------------
// AnimalRepo
// ---------------------------------------------------------------------------

/// Owns all creation and mutation of `animals`, `animal_entries`,
/// `adoptions`, and `animal_logs` rows.
pub struct AnimalRepo;

impl AnimalRepo {
    // -- Lifecycle ----------------------------------------------------------

    /// Register a new animal: generates its code, inserts the animal plus
    /// an initial entry (current, entry date unset) plus a `create` log
    /// row, all in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnimal,
        operator: Option<&str>,
    ) -> Result<Animal, DbError> {
        let mut tx = pool.begin().await?;

        let species_code: String = sqlx::query_scalar("SELECT code FROM species WHERE id = $1")
            .bind(input.species_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Species",
                id: input.species_id,
            })?;

        let city_code: String = sqlx::query_scalar("SELECT code FROM cities WHERE id = $1")
            .bind(input.origin_city_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "City",
                id: input.origin_city_id,
            })?;

        let code = Self::next_code(&mut tx, &species_code, &city_code, input.rescue_date).await?;

        let query = format!(
            "INSERT INTO animals (code, species_id, breed_id, name, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ANIMAL_COLUMNS}"
        );
        let animal = sqlx::query_as::<_, Animal>(&query)
            .bind(&code)
            .bind(input.species_id)
            .bind(input.breed_id)
            .bind(&input.name)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO animal_entries (animal_id, entry_type, origin_city_id, current)
             VALUES ($1, $2, $3, TRUE)",
        )
        .bind(animal.id)
        .bind(input.entry_type.as_str())
        .bind(input.origin_city_id)
        .execute(&mut *tx)
        .await?;

        Self::insert_log(&mut tx, animal.id, log_events::CREATE, snapshot(input)?, operator)
            .await?;

        tx.commit().await?;
        tracing::debug!(animal_id = animal.id, code = %animal.code, "Animal registered");
        Ok(animal)
    }

    /// Assign the next code for a same-day intake of one species from one
    /// city.
    ///
    /// Same-day intakes must be serialized: the sequence number is derived
    /// from a count, so two concurrent inserts would otherwise race
    /// between count and insert. A transaction-scoped advisory lock on the
    /// code prefix queues them; the unique index on `animals.code` remains
    /// the backstop.
    async fn next_code(
        conn: &mut PgConnection,
        species_code: &str,
        city_code: &str,
        rescue_date: Date,
    ) -> Result<String, DbError> {
        let prefix = code_prefix(species_code, city_code, rescue_date);

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&prefix)
            .execute(&mut *conn)
            .await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM animals WHERE code LIKE $1 || '%'")
                .bind(&prefix)
                .fetch_one(&mut *conn)
                .await?;

        Ok(animal_code(species_code, city_code, rescue_date, existing + 1))
    }

    /// Record the entry date on the current entry whose entry date is
    /// still unset.
    pub async fn complete_entry(
        pool: &PgPool,
        animal_id: DbId,
        input: &CompleteEntry,
        operator: Option<&str>,
    ) -> Result<AnimalEntry, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_animal(&mut tx, animal_id).await?;

        let query = format!(
            "UPDATE animal_entries SET entry_date = $2
             WHERE animal_id = $1 AND current AND entry_date IS NULL
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, AnimalEntry>(&query)
            .bind(animal_id)
            .bind(input.entry_date)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::InvalidState("no entry to complete".into()))?;

        Self::insert_log(
            &mut tx,
            animal_id,
            log_events::ENTRY_COMPLETE,
            snapshot(input)?,
            operator,
        )
        .await?;

        tx.commit().await?;
        tracing::debug!(animal_id, entry_id = entry.id, "Entry completed");
        Ok(entry)
    }

    /// Open a new entry for an animal that previously exited (re-entry).
    ///
    /// Atomically: stamps `returned_at` on any open adoption of the
    /// superseded entry, flips its `current` flag, inserts the new entry
    /// (current, entry date unset), and logs a `new-entry` event.
    pub async fn add_entry(
        pool: &PgPool,
        animal_id: DbId,
        input: &NewEntry,
        operator: Option<&str>,
    ) -> Result<AnimalEntry, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_animal(&mut tx, animal_id).await?;

        if let Some(current) = Self::current_entry(&mut tx, animal_id).await? {
            if current.exit_date.is_none() {
                return Err(CoreError::InvalidState(
                    "animal already has an active entry".into(),
                )
                .into());
            }

            sqlx::query(
                "UPDATE adoptions SET returned_at = NOW()
                 WHERE entry_id = $1 AND returned_at IS NULL",
            )
            .bind(current.id)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE animal_entries SET current = FALSE WHERE id = $1")
                .bind(current.id)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO animal_entries (animal_id, entry_type, origin_city_id, current)
             VALUES ($1, $2, $3, TRUE)
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, AnimalEntry>(&query)
            .bind(animal_id)
            .bind(input.entry_type.as_str())
            .bind(input.origin_city_id)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_log(&mut tx, animal_id, log_events::NEW_ENTRY, snapshot(input)?, operator)
            .await?;

        tx.commit().await?;
        tracing::debug!(animal_id, entry_id = entry.id, "Re-entry opened");
        Ok(entry)
    }

    /// Record an exit on the current entry.
    ///
    /// Preconditions, checked in order: a current entry exists
    /// (`AnimalNotPresent`), its entry date is recorded
    /// (`EntryNotComplete`), it has not already exited (`InvalidState`),
    /// and the exit date does not precede the entry date (`ExitNotValid`).
    /// An adoption-type exit also creates the adoption row.
    pub async fn exit(
        pool: &PgPool,
        animal_id: DbId,
        input: &ExitAnimal,
        operator: Option<&str>,
    ) -> Result<AnimalEntry, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_animal(&mut tx, animal_id).await?;

        let current = Self::current_entry(&mut tx, animal_id)
            .await?
            .ok_or(CoreError::AnimalNotPresent { animal_id })?;

        let entry_date = current
            .entry_date
            .ok_or(CoreError::EntryNotComplete { animal_id })?;

        if current.exit_date.is_some() {
            return Err(CoreError::InvalidState("animal already exited".into()).into());
        }

        if input.exit_date < entry_date {
            return Err(CoreError::ExitNotValid {
                entry_date,
                exit_date: input.exit_date,
            }
            .into());
        }

        if input.exit_type == ExitType::Adoption {
            let adopter_id = input.adopter_id.ok_or_else(|| {
                CoreError::Validation("adoption exit requires an adopter_id".into())
            })?;
            Self::new_adoption(&mut tx, animal_id, adopter_id, current.id).await?;
        }

        let query = format!(
            "UPDATE animal_entries SET exit_date = $2, exit_type = $3
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, AnimalEntry>(&query)
            .bind(current.id)
            .bind(input.exit_date)
            .bind(input.exit_type.as_str())
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_log(&mut tx, animal_id, log_events::EXIT, snapshot(input)?, operator)
            .await?;

        tx.commit().await?;
        tracing::debug!(animal_id, entry_id = entry.id, exit_type = input.exit_type.as_str(), "Exit recorded");
        Ok(entry)
    }

    /// Create an adoption for an entry, re-checking that no open adoption
    /// already exists for it.
    async fn new_adoption(
        conn: &mut PgConnection,
        animal_id: DbId,
        adopter_id: DbId,
        entry_id: DbId,
    ) -> Result<Adoption, DbError> {
        let open: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM adoptions WHERE entry_id = $1 AND returned_at IS NULL",
        )
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?;
        if open.is_some() {
            return Err(CoreError::ExistingAdoption { entry_id }.into());
        }

        let adopter: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM adopters WHERE id = $1 AND deleted_at IS NULL")
                .bind(adopter_id)
                .fetch_optional(&mut *conn)
                .await?;
        if adopter.is_none() {
            return Err(CoreError::NotFound {
                entity: "Adopter",
                id: adopter_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO adoptions (animal_id, adopter_id, entry_id, completed_at)
             VALUES ($1, $2, $3, NOW())
             RETURNING {ADOPTION_COLUMNS}"
        );
        let adoption = sqlx::query_as::<_, Adoption>(&query)
            .bind(animal_id)
            .bind(adopter_id)
            .bind(entry_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(adoption)
    }

    /// Partial update of mutable animal fields.
    ///
    /// The chip code is write-once: once `chip_code_set` is true the
    /// incoming value is silently dropped. A uniqueness violation on the
    /// chip code is translated to `ChipCodeInUse` carrying the id of the
    /// animal that already owns it.
    pub async fn update(
        pool: &PgPool,
        animal_id: DbId,
        input: &UpdateAnimal,
        operator: Option<&str>,
    ) -> Result<Animal, DbError> {
        let mut tx = pool.begin().await?;
        let animal = Self::lock_animal(&mut tx, animal_id).await?;

        let chip_to_store = if animal.chip_code_set {
            None
        } else {
            input.chip_code.as_deref()
        };
        let chip_code_set = animal.chip_code_set || input.chip_code.is_some();

        let query = format!(
            "UPDATE animals SET
                name = COALESCE($2, name),
                breed_id = COALESCE($3, breed_id),
                sex = COALESCE($4, sex),
                birth_date = COALESCE($5, birth_date),
                chip_code = COALESCE($6, chip_code),
                chip_code_set = $7,
                sterilized = COALESCE($8, sterilized),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {ANIMAL_COLUMNS}"
        );
        let result = sqlx::query_as::<_, Animal>(&query)
            .bind(animal_id)
            .bind(&input.name)
            .bind(input.breed_id)
            .bind(&input.sex)
            .bind(input.birth_date)
            .bind(chip_to_store)
            .bind(chip_code_set)
            .bind(input.sterilized)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await;

        let updated = match result {
            Ok(animal) => animal,
            Err(err) => {
                if is_unique_violation(&err, "uq_animals_chip_code") {
                    // The aborted transaction cannot run further queries;
                    // look up the conflicting owner on a fresh connection.
                    drop(tx);
                    let owner_id: Option<DbId> =
                        sqlx::query_scalar("SELECT id FROM animals WHERE chip_code = $1")
                            .bind(chip_to_store)
                            .fetch_optional(pool)
                            .await?;
                    if let Some(owner_id) = owner_id {
                        return Err(CoreError::ChipCodeInUse { animal_id: owner_id }.into());
                    }
                }
                return Err(err.into());
            }
        };

        Self::insert_log(
            &mut tx,
            animal_id,
            log_events::DATA_UPDATE,
            changed_fields(input, chip_to_store),
            operator,
        )
        .await?;

        tx.commit().await?;
        tracing::debug!(animal_id, "Animal data updated");
        Ok(updated)
    }

    // -- Queries ------------------------------------------------------------

    /// Find an animal by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All entries for an animal, oldest first.
    pub async fn find_entries(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<AnimalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM animal_entries
             WHERE animal_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, AnimalEntry>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// All adoptions for an animal, oldest first.
    pub async fn find_adoptions(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<Adoption>, sqlx::Error> {
        let query = format!(
            "SELECT {ADOPTION_COLUMNS} FROM adoptions
             WHERE animal_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// The event log for an animal, oldest first.
    pub async fn find_logs(pool: &PgPool, animal_id: DbId) -> Result<Vec<AnimalLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM animal_logs WHERE animal_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AnimalLog>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// Filtered, paginated listing of currently present animals: the
    /// current entry joined to species, origin city, and open-adoption
    /// presence. Returns the total match count plus one page.
    pub async fn search(
        pool: &PgPool,
        params: &AnimalSearchQuery,
    ) -> Result<AnimalPage, sqlx::Error> {
        let (where_clause, binds, bind_idx) = build_search_filter(params);

        let from_clause = "\
            FROM animals a \
            JOIN animal_entries e ON e.animal_id = a.id AND e.current \
            JOIN species s ON s.id = a.species_id \
            JOIN cities c ON c.id = e.origin_city_id";

        let count_query = format!("SELECT COUNT(*) {from_clause} {where_clause}");
        let (total,) = bind_search_values(sqlx::query_as::<_, (i64,)>(&count_query), &binds)
            .fetch_one(pool)
            .await?;

        let page_query = format!(
            "SELECT a.id, a.code, a.name, s.name AS species_name, c.name AS city_name, \
                    e.entry_type, e.entry_date, a.chip_code, \
                    EXISTS(SELECT 1 FROM adoptions ad \
                           WHERE ad.entry_id = e.id AND ad.returned_at IS NULL) \
                        AS has_open_adoption \
             {from_clause} {where_clause} \
             ORDER BY a.code \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );
        let items = bind_search_values(sqlx::query_as::<_, AnimalSummary>(&page_query), &binds)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await?;

        Ok(AnimalPage { items, total })
    }

    // -- Reporting ----------------------------------------------------------

    /// Custody days per animal for entries from one city overlapping the
    /// queried range. The day rule matches
    /// `rifugio_core::days::custody_days`.
    pub async fn count_animal_days(
        pool: &PgPool,
        params: &AnimalDaysQuery,
    ) -> Result<AnimalDaysReport, sqlx::Error> {
        let query = format!(
            "SELECT a.id AS animal_id, a.code, a.name, SUM({DAYS_EXPR})::BIGINT AS days
             FROM animals a
             JOIN animal_entries e ON e.animal_id = a.id
             WHERE e.origin_city_id = $1
               AND e.entry_date IS NOT NULL
               AND e.entry_date <= $3
               AND (e.exit_date IS NULL OR e.exit_date >= $2)
             GROUP BY a.id, a.code, a.name
             ORDER BY a.code"
        );
        let items = sqlx::query_as::<_, AnimalDaysRow>(&query)
            .bind(params.city_id)
            .bind(params.from)
            .bind(params.to)
            .fetch_all(pool)
            .await?;

        let total_days = items.iter().map(|row| row.days).sum();
        Ok(AnimalDaysReport { items, total_days })
    }

    /// Animals whose entry date falls within the queried range, optionally
    /// filtered by entry type, joined to readable city names.
    pub async fn count_animal_entries(
        pool: &PgPool,
        params: &AnimalEntriesQuery,
    ) -> Result<Vec<AnimalEntryRow>, sqlx::Error> {
        let base = "\
            SELECT a.id AS animal_id, a.code, a.name, e.entry_type, e.entry_date, \
                   c.name AS city_name \
            FROM animal_entries e \
            JOIN animals a ON a.id = e.animal_id \
            JOIN cities c ON c.id = e.origin_city_id \
            WHERE e.entry_date BETWEEN $1 AND $2";

        match params.entry_type {
            Some(entry_type) => {
                let query = format!("{base} AND e.entry_type = $3 ORDER BY e.entry_date, a.code");
                sqlx::query_as::<_, AnimalEntryRow>(&query)
                    .bind(params.from)
                    .bind(params.to)
                    .bind(entry_type.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("{base} ORDER BY e.entry_date, a.code");
                sqlx::query_as::<_, AnimalEntryRow>(&query)
                    .bind(params.from)
                    .bind(params.to)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    // -- Documents ----------------------------------------------------------

    /// Associate an already-stored document with an animal under a typed
    /// kind and title.
    pub async fn attach_document(
        pool: &PgPool,
        animal_id: DbId,
        document_id: DbId,
        kind_id: DbId,
        title: &str,
    ) -> Result<AnimalDocument, DbError> {
        let mut tx = pool.begin().await?;
        Self::lock_animal(&mut tx, animal_id).await?;

        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM documents WHERE id = $1")
            .bind(document_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(CoreError::NotFound {
                entity: "Document",
                id: document_id,
            }
            .into());
        }

        let link_id: DbId = sqlx::query_scalar(
            "INSERT INTO animal_documents (animal_id, document_id, kind_id, title)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(animal_id)
        .bind(document_id)
        .bind(kind_id)
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        let row = Self::fetch_animal_document(&mut tx, link_id).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Documents attached to an animal, newest first.
    pub async fn list_documents(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<AnimalDocument>, sqlx::Error> {
        sqlx::query_as::<_, AnimalDocument>(
            "SELECT ad.id, ad.animal_id, ad.document_id, k.code AS kind_code,
                    k.title AS kind_title, ad.title, d.filename, d.mime_type,
                    d.size_bytes, d.uploaded, ad.created_at
             FROM animal_documents ad
             JOIN documents d ON d.id = ad.document_id
             JOIN document_kinds k ON k.id = ad.kind_id
             WHERE ad.animal_id = $1
             ORDER BY ad.created_at DESC, ad.id DESC",
        )
        .bind(animal_id)
        .fetch_all(pool)
        .await
    }

    async fn fetch_animal_document(
        conn: &mut PgConnection,
        link_id: DbId,
    ) -> Result<AnimalDocument, sqlx::Error> {
        sqlx::query_as::<_, AnimalDocument>(
            "SELECT ad.id, ad.animal_id, ad.document_id, k.code AS kind_code,
                    k.title AS kind_title, ad.title, d.filename, d.mime_type,
                    d.size_bytes, d.uploaded, ad.created_at
             FROM animal_documents ad
             JOIN documents d ON d.id = ad.document_id
             JOIN document_kinds k ON k.id = ad.kind_id
             WHERE ad.id = $1",
        )
        .bind(link_id)
        .fetch_one(&mut *conn)
        .await
    }

    // -- Internal helpers ---------------------------------------------------

    /// Fetch the animal row with a row lock, serializing lifecycle
    /// operations on the same animal within their transactions.
    async fn lock_animal(conn: &mut PgConnection, animal_id: DbId) -> Result<Animal, DbError> {
        let query = format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals
             WHERE id = $1 AND deleted_at IS NULL
             FOR UPDATE"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(animal_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "Animal",
                    id: animal_id,
                }
                .into(),
            )
    }

    /// The animal's current entry, locked for update.
    async fn current_entry(
        conn: &mut PgConnection,
        animal_id: DbId,
    ) -> Result<Option<AnimalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM animal_entries
             WHERE animal_id = $1 AND current
             FOR UPDATE"
        );
        sqlx::query_as::<_, AnimalEntry>(&query)
            .bind(animal_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Append a log row. Log rows are never updated or deleted.
    async fn insert_log(
        conn: &mut PgConnection,
        animal_id: DbId,
        event: &str,
        payload: serde_json::Value,
        operator: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO animal_logs (animal_id, event, payload, operator)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(animal_id)
        .bind(event)
        .bind(payload)
        .bind(operator)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Log payload helpers
// ---------------------------------------------------------------------------

/// JSON snapshot of a triggering request for the log payload.
fn snapshot<T: serde::Serialize>(input: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(input).map_err(|e| CoreError::Internal(e.to_string()).into())
}

/// Snapshot of only the fields an update actually applied. `chip_stored`
/// is the chip value after the write-once rule, so a dropped chip code
/// does not appear as a change.
fn changed_fields(input: &UpdateAnimal, chip_stored: Option<&str>) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    if let Some(ref name) = input.name {
        fields.insert("name".into(), name.as_str().into());
    }
    if let Some(breed_id) = input.breed_id {
        fields.insert("breed_id".into(), breed_id.into());
    }
    if let Some(ref sex) = input.sex {
        fields.insert("sex".into(), sex.as_str().into());
    }
    if let Some(birth_date) = input.birth_date {
        fields.insert("birth_date".into(), birth_date.to_string().into());
    }
    if let Some(chip) = chip_stored {
        fields.insert("chip_code".into(), chip.into());
    }
    if let Some(sterilized) = input.sterilized {
        fields.insert("sterilized".into(), sterilized.into());
    }
    if let Some(ref notes) = input.notes {
        fields.insert("notes".into(), notes.as_str().into());
    }
    serde_json::Value::Object(fields)
}

// ---------------------------------------------------------------------------
// Search filter building
// ---------------------------------------------------------------------------

/// Typed bind value for the dynamically-built search query.
enum BindValue {
    BigInt(DbId),
    Text(String),
}

/// Build a WHERE clause and bind values from the search filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause
/// always starts with the presence conditions (not deleted, not exited).
fn build_search_filter(params: &AnimalSearchQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions =
        vec!["a.deleted_at IS NULL".to_string(), "e.exit_date IS NULL".to_string()];
    let mut bind_idx = 1u32;
    let mut binds: Vec<BindValue> = Vec::new();

    if let Some(ref name) = params.name {
        conditions.push(format!("a.name ILIKE ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::Text(format!("%{name}%")));
    }

    if let Some(species_id) = params.species_id {
        conditions.push(format!("a.species_id = ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::BigInt(species_id));
    }

    if let Some(city_id) = params.origin_city_id {
        conditions.push(format!("e.origin_city_id = ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::BigInt(city_id));
    }

    if let Some(entry_type) = params.entry_type {
        conditions.push(format!("e.entry_type = ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::Text(entry_type.as_str().to_string()));
    }

    (format!("WHERE {}", conditions.join(" AND ")), binds, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_search_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in binds {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
