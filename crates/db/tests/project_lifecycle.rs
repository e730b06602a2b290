//! Integration tests for the project lifecycle at the repository layer:
//! sequence lookups, customer counter reconciliation, and the
//! unique-number backstop.

use sqlx::PgPool;

use castworks_core::numbering;
use castworks_db::models::customer::{ContactInfoInput, CreateCustomer};
use castworks_db::models::project::{CreateProject, SpecificationsInput};
use castworks_db::models::user::CreateUser;
use castworks_db::repositories::{CustomerRepo, ProjectRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_customer(name: &str, email: &str) -> CreateCustomer {
    CreateCustomer {
        name: name.to_string(),
        contact_info: ContactInfoInput {
            email: email.to_string(),
            phone: "(303) 555-0100".to_string(),
            address: None,
        },
        preferences: None,
    }
}

fn new_project(customer_id: i64) -> CreateProject {
    CreateProject {
        customer_id,
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
    }
}

async fn seed_user(pool: &PgPool) -> i64 {
    let input = CreateUser {
        name: "Dana Reyes".to_string(),
        email: "dana@example.com".to_string(),
        role: "engineer".to_string(),
        phone: None,
    };
    UserRepo::create(pool, &input, "dana@example.com")
        .await
        .unwrap()
        .id
}

async fn seed_customer(pool: &PgPool) -> i64 {
    CustomerRepo::create(pool, &new_customer("Acme Precast", "acme@example.com"), "acme@example.com")
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Sequence lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_number_for_empty_year_is_none(pool: PgPool) {
    assert_eq!(
        ProjectRepo::last_number_for_year(&pool, 2025).await.unwrap(),
        None
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_number_picks_highest_sequence(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    for seq in 1..=10u32 {
        let number = numbering::format_project_number(2025, seq);
        ProjectRepo::create(&pool, &new_project(customer_id), &number, "Acme Precast", user_id)
            .await
            .unwrap();
    }

    let last = ProjectRepo::last_number_for_year(&pool, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last, "PRJ-2025-010");
    assert_eq!(
        numbering::next_project_number(2025, Some(&last)),
        "PRJ-2025-011"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_number_ignores_other_years(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2024-099", "Acme Precast", user_id)
        .await
        .unwrap();

    assert_eq!(
        ProjectRepo::last_number_for_year(&pool, 2025).await.unwrap(),
        None
    );
}

// ---------------------------------------------------------------------------
// Unique-number backstop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_project_number_is_rejected(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
        .await
        .unwrap();

    let err = ProjectRepo::create(
        &pool,
        &new_project(customer_id),
        "PRJ-2025-001",
        "Acme Precast",
        user_id,
    )
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_projects_project_number"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // Exactly one row persisted.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

// ---------------------------------------------------------------------------
// Customer counter reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn record_project_created_bumps_counters_and_recents(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let project =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
            .await
            .unwrap();
    CustomerRepo::record_project_created(&pool, customer_id, project.id)
        .await
        .unwrap();

    let customer = CustomerRepo::find_by_id(&pool, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_projects, 1);
    assert_eq!(customer.active_projects, 1);
    assert_eq!(customer.recent_project_ids, vec![project.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_project_ids_keep_newest_five(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let mut ids = Vec::new();
    for seq in 1..=7u32 {
        let number = numbering::format_project_number(2025, seq);
        let project =
            ProjectRepo::create(&pool, &new_project(customer_id), &number, "Acme Precast", user_id)
                .await
                .unwrap();
        CustomerRepo::record_project_created(&pool, customer_id, project.id)
            .await
            .unwrap();
        ids.push(project.id);
    }

    let customer = CustomerRepo::find_by_id(&pool, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_projects, 7);

    // Newest first, truncated to five.
    let expected: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(customer.recent_project_ids, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_active_project_drops_both_counters(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let project =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
            .await
            .unwrap();
    CustomerRepo::record_project_created(&pool, customer_id, project.id)
        .await
        .unwrap();

    CustomerRepo::record_project_deleted(&pool, customer_id, true)
        .await
        .unwrap();
    ProjectRepo::delete(&pool, project.id).await.unwrap();

    let customer = CustomerRepo::find_by_id(&pool, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_projects, 0);
    assert_eq!(customer.active_projects, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_production_project_leaves_active_count(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    // Two projects; one goes to production (active drops to 1).
    let kept =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
            .await
            .unwrap();
    CustomerRepo::record_project_created(&pool, customer_id, kept.id)
        .await
        .unwrap();
    let shipped =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-002", "Acme Precast", user_id)
            .await
            .unwrap();
    CustomerRepo::record_project_created(&pool, customer_id, shipped.id)
        .await
        .unwrap();

    ProjectRepo::set_status(&pool, shipped.id, "production", false)
        .await
        .unwrap();
    CustomerRepo::adjust_active_projects(&pool, customer_id, -1)
        .await
        .unwrap();

    // Deleting the production project drops the total only.
    CustomerRepo::record_project_deleted(&pool, customer_id, false)
        .await
        .unwrap();
    ProjectRepo::delete(&pool, shipped.id).await.unwrap();

    let customer = CustomerRepo::find_by_id(&pool, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_projects, 1);
    assert_eq!(customer.active_projects, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn counter_decrements_clamp_at_zero(pool: PgPool) {
    let customer_id = seed_customer(&pool).await;

    // Decrement a fresh customer: nothing to remove, counters stay 0.
    CustomerRepo::record_project_deleted(&pool, customer_id, true)
        .await
        .unwrap();
    CustomerRepo::adjust_active_projects(&pool, customer_id, -1)
        .await
        .unwrap();

    let customer = CustomerRepo::find_by_id(&pool, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.total_projects, 0);
    assert_eq!(customer.active_projects, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_name_snapshot_survives_rename(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let project =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
            .await
            .unwrap();

    sqlx::query("UPDATE customers SET name = 'Acme Industries' WHERE id = $1")
        .bind(customer_id)
        .execute(&pool)
        .await
        .unwrap();

    let reloaded = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.customer_name, "Acme Precast");
}

// ---------------------------------------------------------------------------
// Status side effects at the repository level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_status_can_clear_handoff_flags(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let customer_id = seed_customer(&pool).await;

    let project =
        ProjectRepo::create(&pool, &new_project(customer_id), "PRJ-2025-001", "Acme Precast", user_id)
            .await
            .unwrap();

    let sent = ProjectRepo::send_to_production(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sent.status, "production");
    assert!(sent.sent_to_production);
    assert!(sent.handoff_date.is_some());

    let back = ProjectRepo::set_status(&pool, project.id, "review", true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(back.status, "review");
    assert!(!back.sent_to_production);
    assert!(back.handoff_date.is_none());
}
