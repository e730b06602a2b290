//! Integration tests for the time-entry repository: the one-running-
//! timer index and the duration rollup.

use sqlx::PgPool;

use castworks_core::timeclock::total_hours;
use castworks_db::models::customer::{ContactInfoInput, CreateCustomer};
use castworks_db::models::project::{CreateProject, SpecificationsInput};
use castworks_db::models::user::CreateUser;
use castworks_db::repositories::{CustomerRepo, ProjectRepo, TimeEntryRepo, UserRepo};

async fn seed_project(pool: &PgPool) -> (i64, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            role: "designer".to_string(),
            phone: None,
        },
        "dana@example.com",
    )
    .await
    .unwrap();

    let customer = CustomerRepo::create(
        pool,
        &CreateCustomer {
            name: "Acme Precast".to_string(),
            contact_info: ContactInfoInput {
                email: "acme@example.com".to_string(),
                phone: "(303) 555-0100".to_string(),
                address: None,
            },
            preferences: None,
        },
        "acme@example.com",
    )
    .await
    .unwrap();

    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            customer_id: customer.id,
            project_number: None,
            project_name: None,
            start_date: None,
            product_type: "storm".to_string(),
            specifications: SpecificationsInput {
                length: 8.0,
                width: 10.0,
                height: 12.0,
                wall_thickness: None,
                custom_notes: None,
            },
            structures: None,
        },
        "PRJ-2025-001",
        "Acme Precast",
        user.id,
    )
    .await
    .unwrap();

    (project.id, user.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_creates_running_entry(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool).await;

    let entry = TimeEntryRepo::start(&pool, project_id, user_id, "layout work")
        .await
        .unwrap();
    assert!(entry.is_running);
    assert_eq!(entry.duration_minutes, 0);
    assert!(entry.end_time.is_none());
    assert_eq!(entry.notes, "layout work");

    let running = TimeEntryRepo::find_running(&pool, project_id, user_id)
        .await
        .unwrap();
    assert_eq!(running.map(|e| e.id), Some(entry.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_running_entry_rejected_by_index(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool).await;

    TimeEntryRepo::start(&pool, project_id, user_id, "")
        .await
        .unwrap();
    let err = TimeEntryRepo::start(&pool, project_id, user_id, "")
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_time_entries_running"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn finished_entry_allows_a_new_start(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool).await;

    let first = TimeEntryRepo::start(&pool, project_id, user_id, "")
        .await
        .unwrap();
    let finished = TimeEntryRepo::finish(&pool, first.id, chrono::Utc::now(), 30, None)
        .await
        .unwrap();
    assert!(!finished.is_running);
    assert_eq!(finished.duration_minutes, 30);
    assert!(finished.end_time.is_some());

    // The partial index only covers running entries.
    TimeEntryRepo::start(&pool, project_id, user_id, "")
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sum_minutes_feeds_total_hours(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool).await;

    // Three entries of 30, 45, and 15 minutes.
    for minutes in [30i64, 45, 15] {
        let entry = TimeEntryRepo::start(&pool, project_id, user_id, "")
            .await
            .unwrap();
        TimeEntryRepo::finish(&pool, entry.id, chrono::Utc::now(), minutes, None)
            .await
            .unwrap();
    }

    let total_minutes = TimeEntryRepo::sum_minutes(&pool, project_id).await.unwrap();
    assert_eq!(total_minutes, 90);
    assert_eq!(total_hours(total_minutes), 1.5);

    ProjectRepo::set_total_hours(&pool, project_id, total_hours(total_minutes))
        .await
        .unwrap();
    let project = ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.total_hours, 1.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_replaced_only_when_provided(pool: PgPool) {
    let (project_id, user_id) = seed_project(&pool).await;

    let entry = TimeEntryRepo::start(&pool, project_id, user_id, "original")
        .await
        .unwrap();
    let kept = TimeEntryRepo::finish(&pool, entry.id, chrono::Utc::now(), 5, None)
        .await
        .unwrap();
    assert_eq!(kept.notes, "original");

    let entry = TimeEntryRepo::start(&pool, project_id, user_id, "original")
        .await
        .unwrap();
    let replaced =
        TimeEntryRepo::finish(&pool, entry.id, chrono::Utc::now(), 5, Some("amended"))
            .await
            .unwrap();
    assert_eq!(replaced.notes, "amended");
}
