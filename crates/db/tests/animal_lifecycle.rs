//! Integration tests for the animal lifecycle: registration, entry
//! completion, exit, re-entry, adoptions, chip write-once, and the
//! append-only event log.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;

use rifugio_core::error::CoreError;
use rifugio_core::lifecycle::{log_events, EntryType, ExitType};
use rifugio_core::types::{Date, DbId};
use rifugio_db::error::DbError;
use rifugio_db::models::adopter::CreateAdopter;
use rifugio_db::models::animal::{
    CompleteEntry, CreateAnimal, ExitAnimal, NewEntry, UpdateAnimal,
};
use rifugio_db::repositories::{AdopterRepo, AnimalRepo, CityRepo, SpeciesRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> Date {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn dog_species_id(pool: &PgPool) -> DbId {
    SpeciesRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.code == "C")
        .unwrap()
        .id
}

async fn city_id(pool: &PgPool, code: &str) -> DbId {
    CityRepo::find_by_code(pool, code).await.unwrap().unwrap().id
}

async fn new_animal(pool: &PgPool, rescue_date: Date) -> CreateAnimal {
    CreateAnimal {
        species_id: dog_species_id(pool).await,
        breed_id: None,
        name: Some("Rex".to_string()),
        entry_type: EntryType::Rescue,
        origin_city_id: city_id(pool, "H501").await,
        rescue_date,
        notes: None,
    }
}

fn new_adopter(fiscal_code: &str) -> CreateAdopter {
    CreateAdopter {
        fiscal_code: fiscal_code.to_string(),
        first_name: "Maria".to_string(),
        last_name: "Bianchi".to_string(),
        address: None,
        city_id: None,
        phone: None,
        email: None,
    }
}

fn default_update() -> UpdateAnimal {
    UpdateAnimal {
        name: None,
        breed_id: None,
        sex: None,
        birth_date: None,
        chip_code: None,
        sterilized: None,
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_generates_code_and_opens_entry(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, Some("anna")).await.unwrap();

    assert_eq!(animal.code, "CH50120030701");
    assert!(!animal.chip_code_set);

    let entries = AnimalRepo::find_entries(&pool, animal.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].current);
    assert_eq!(entries[0].entry_type, "rescue");
    assert!(entries[0].entry_date.is_none());
    assert!(entries[0].exit_date.is_none());

    let logs = AnimalRepo::find_logs(&pool, animal.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].event, log_events::CREATE);
    assert_eq!(logs[0].operator.as_deref(), Some("anna"));
    assert!(logs[0].payload.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_rejects_unknown_species(pool: PgPool) {
    let mut input = new_animal(&pool, date(2020, 3, 7)).await;
    input.species_id = 999_999;

    let err = AnimalRepo::create(&pool, &input, None).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Species", .. })
    );
}

// ---------------------------------------------------------------------------
// Entry completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn complete_entry_records_date_once(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let entry = AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 8) },
        None,
    )
    .await
    .unwrap();
    assert_eq!(entry.entry_date, Some(date(2020, 3, 8)));

    // A second completion has no unset entry left to fill.
    let err = AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 9) },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidState(_)));
}

// ---------------------------------------------------------------------------
// Exit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn exit_requires_completed_entry(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let err = AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 4, 1),
            exit_type: ExitType::Death,
            adopter_id: None,
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::EntryNotComplete { .. }));
}

#[sqlx::test(migrations = "../../migrations")]
async fn exit_rejects_date_before_entry(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();
    AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();

    let err = AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 3, 9),
            exit_type: ExitType::Death,
            adopter_id: None,
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::ExitNotValid { .. }));
}

#[sqlx::test(migrations = "../../migrations")]
async fn exit_twice_is_rejected(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();
    AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();

    let exit = ExitAnimal {
        exit_date: date(2020, 4, 1),
        exit_type: ExitType::ReturnToOwner,
        adopter_id: None,
    };
    let entry = AnimalRepo::exit(&pool, animal.id, &exit, None).await.unwrap();
    assert_eq!(entry.exit_date, Some(date(2020, 4, 1)));
    assert_eq!(entry.exit_type.as_deref(), Some("return_to_owner"));

    let err = AnimalRepo::exit(&pool, animal.id, &exit, None).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidState(_)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn adoption_exit_creates_adoption_row(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();
    AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();

    let adopter = AdopterRepo::create(&pool, &new_adopter("BNCMRA80A41H501X"))
        .await
        .unwrap();

    // Without an adopter the adoption exit is rejected.
    let err = AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 5, 1),
            exit_type: ExitType::Adoption,
            adopter_id: None,
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 5, 1),
            exit_type: ExitType::Adoption,
            adopter_id: Some(adopter.id),
        },
        None,
    )
    .await
    .unwrap();

    let adoptions = AnimalRepo::find_adoptions(&pool, animal.id).await.unwrap();
    assert_eq!(adoptions.len(), 1);
    assert_eq!(adoptions[0].adopter_id, adopter.id);
    assert!(adoptions[0].completed_at.is_some());
    assert!(adoptions[0].returned_at.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn exit_rejects_entry_with_open_adoption(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();
    AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();

    let adopter = AdopterRepo::create(&pool, &new_adopter("BNCMRA80A41H501X"))
        .await
        .unwrap();
    let entry_id = AnimalRepo::find_entries(&pool, animal.id).await.unwrap()[0].id;

    // Seed an open adoption out of band; the exit must refuse to open a
    // second one for the same entry.
    sqlx::query("INSERT INTO adoptions (animal_id, adopter_id, entry_id) VALUES ($1, $2, $3)")
        .bind(animal.id)
        .bind(adopter.id)
        .bind(entry_id)
        .execute(&pool)
        .await
        .unwrap();

    let err = AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 5, 1),
            exit_type: ExitType::Adoption,
            adopter_id: Some(adopter.id),
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::ExistingAdoption { .. }));
}

// ---------------------------------------------------------------------------
// Re-entry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn reentry_supersedes_exited_entry_and_closes_adoption(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();
    AnimalRepo::complete_entry(
        &pool,
        animal.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();

    let adopter = AdopterRepo::create(&pool, &new_adopter("BNCMRA80A41H501X"))
        .await
        .unwrap();
    AnimalRepo::exit(
        &pool,
        animal.id,
        &ExitAnimal {
            exit_date: date(2020, 5, 1),
            exit_type: ExitType::Adoption,
            adopter_id: Some(adopter.id),
        },
        None,
    )
    .await
    .unwrap();

    let new_entry = AnimalRepo::add_entry(
        &pool,
        animal.id,
        &NewEntry {
            entry_type: EntryType::Surrender,
            origin_city_id: city_id(&pool, "F205").await,
        },
        Some("anna"),
    )
    .await
    .unwrap();
    assert!(new_entry.current);
    assert!(new_entry.entry_date.is_none());

    let entries = AnimalRepo::find_entries(&pool, animal.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(!entries[0].current);
    assert!(entries[1].current);

    // The adoption tied to the superseded entry is closed.
    let adoptions = AnimalRepo::find_adoptions(&pool, animal.id).await.unwrap();
    assert_eq!(adoptions.len(), 1);
    assert!(adoptions[0].returned_at.is_some());

    let events: Vec<String> = AnimalRepo::find_logs(&pool, animal.id)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.event)
        .collect();
    assert_eq!(
        events,
        vec![
            log_events::CREATE,
            log_events::ENTRY_COMPLETE,
            log_events::EXIT,
            log_events::NEW_ENTRY,
        ]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn reentry_rejected_while_entry_is_active(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let err = AnimalRepo::add_entry(
        &pool,
        animal.id,
        &NewEntry {
            entry_type: EntryType::Rescue,
            origin_city_id: input.origin_city_id,
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidState(_)));
}

// ---------------------------------------------------------------------------
// Data update and chip write-once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_applies_partial_fields(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let updated = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            name: Some("Fido".to_string()),
            sterilized: Some(true),
            ..default_update()
        },
        Some("anna"),
    )
    .await
    .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Fido"));
    assert!(updated.sterilized);

    let logs = AnimalRepo::find_logs(&pool, animal.id).await.unwrap();
    let last = logs.last().unwrap();
    assert_eq!(last.event, log_events::DATA_UPDATE);
    let payload = last.payload.as_ref().unwrap();
    assert_eq!(payload["name"], "Fido");
    assert_eq!(payload["sterilized"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn chip_code_is_write_once(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let animal = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let first = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            chip_code: Some("380260000000001".to_string()),
            ..default_update()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(first.chip_code.as_deref(), Some("380260000000001"));
    assert!(first.chip_code_set);

    // A later value is silently dropped, not an error.
    let second = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            chip_code: Some("380260000000002".to_string()),
            ..default_update()
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(second.chip_code.as_deref(), Some("380260000000001"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_chip_code_names_the_owning_animal(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let first = AnimalRepo::create(&pool, &input, None).await.unwrap();
    let second = AnimalRepo::create(&pool, &input, None).await.unwrap();

    AnimalRepo::update(
        &pool,
        first.id,
        &UpdateAnimal {
            chip_code: Some("380260000000001".to_string()),
            ..default_update()
        },
        None,
    )
    .await
    .unwrap();

    let err = AnimalRepo::update(
        &pool,
        second.id,
        &UpdateAnimal {
            chip_code: Some("380260000000001".to_string()),
            ..default_update()
        },
        None,
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::ChipCodeInUse { animal_id }) if animal_id == first.id
    );
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn search_lists_only_present_animals(pool: PgPool) {
    let input = new_animal(&pool, date(2020, 3, 7)).await;
    let present = AnimalRepo::create(&pool, &input, None).await.unwrap();
    let exited = AnimalRepo::create(&pool, &input, None).await.unwrap();

    AnimalRepo::complete_entry(
        &pool,
        exited.id,
        &CompleteEntry { entry_date: date(2020, 3, 10) },
        None,
    )
    .await
    .unwrap();
    AnimalRepo::exit(
        &pool,
        exited.id,
        &ExitAnimal {
            exit_date: date(2020, 4, 1),
            exit_type: ExitType::Death,
            adopter_id: None,
        },
        None,
    )
    .await
    .unwrap();

    let page = AnimalRepo::search(&pool, &Default::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, present.id);
    assert_eq!(page.items[0].species_name, "Dog");
    assert!(!page.items[0].has_open_adoption);
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_filters_by_name_and_entry_type(pool: PgPool) {
    let mut input = new_animal(&pool, date(2020, 3, 7)).await;
    AnimalRepo::create(&pool, &input, None).await.unwrap();

    input.name = Some("Luna".to_string());
    input.entry_type = EntryType::Confiscation;
    let luna = AnimalRepo::create(&pool, &input, None).await.unwrap();

    let by_name = AnimalRepo::search(
        &pool,
        &rifugio_db::models::animal::AnimalSearchQuery {
            name: Some("lun".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_name.total, 1);
    assert_eq!(by_name.items[0].id, luna.id);

    let by_type = AnimalRepo::search(
        &pool,
        &rifugio_db::models::animal::AnimalSearchQuery {
            entry_type: Some(EntryType::Confiscation),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_type.total, 1);
    assert_eq!(by_type.items[0].entry_type, "confiscation");
}
