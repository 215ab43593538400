//! End-to-end tests: ServiceLog wired to the SQLite record store.

use std::sync::Arc;

use chrono::NaiveDate;
use mileage_core::application::{MatchKey, RecordRequest, ServiceLog};
use mileage_core::domain::{Catalog, DueStatus, ServiceCategory, TaskDefinition};
use mileage_core::port::time_provider::FixedTimeProvider;
use mileage_core::port::RecordStore;
use mileage_core::AppError;
use mileage_infra_sqlite::{create_pool, run_migrations, SqliteRecordStore};
use sqlx::SqlitePool;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 14).unwrap()
}

async fn open(database_url: &str) -> (SqlitePool, ServiceLog) {
    let pool = create_pool(database_url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let log = ServiceLog::new(
        Arc::new(SqliteRecordStore::new(pool.clone())),
        Arc::new(Catalog::standard()),
        Arc::new(FixedTimeProvider(today())),
    );
    (pool, log)
}

#[tokio::test]
async fn test_fresh_vehicle_needs_nothing() {
    let (_pool, log) = open("sqlite::memory:").await;

    let report = log.check(0).await.unwrap();
    assert!(report.is_empty());
    assert!(log.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oil_change_cycle() {
    let (_pool, log) = open("sqlite::memory:").await;

    // 13 500 is the inclusive edge of the 15 000 km band
    assert!(!log.check(13_499).await.unwrap().contains("Engine oil change"));
    let report = log.check(13_500).await.unwrap();
    let entry = report.get("Engine oil change").unwrap();
    assert_eq!(report.status_of(entry), DueStatus::Upcoming);

    let report = log.check(15_200).await.unwrap();
    let entry = report.get("Engine oil change").unwrap();
    assert_eq!(report.status_of(entry), DueStatus::DueNow);

    log.record(RecordRequest::scheduled(15_200, 0)).await.unwrap();

    let report = log.check(15_200).await.unwrap();
    assert!(!report.contains("Engine oil change"));
    // Oil filter was not replaced
    assert!(report.contains("Oil filter replacement"));

    let report = log.check(28_700).await.unwrap();
    let entry = report.get("Engine oil change").unwrap();
    assert_eq!(entry.last_service_mileage, 15_200);
    assert_eq!(entry.next_due_mileage, 30_200);
}

#[tokio::test]
async fn test_brake_discs_upcoming_scenario() {
    let (_pool, log) = open("sqlite::memory:").await;
    log.record(RecordRequest::scheduled(40_000, 2)).await.unwrap();

    let report = log.check(139_999).await.unwrap();
    let entry = report.get("Brake disc replacement").unwrap();

    assert_eq!(entry.last_service_mileage, 40_000);
    assert_eq!(entry.next_due_mileage, 140_000);
    assert_eq!(report.status_of(entry), DueStatus::Upcoming);
}

#[tokio::test]
async fn test_brake_discs_not_flagged_before_band() {
    let (_pool, log) = open("sqlite::memory:").await;
    log.record(RecordRequest::scheduled(50_000, 2)).await.unwrap();

    // 50 000 + 100 000 - 10 000 = 140 000
    assert!(!log.check(139_999).await.unwrap().contains("Brake disc replacement"));
    assert!(log.check(140_000).await.unwrap().contains("Brake disc replacement"));
}

#[tokio::test]
async fn test_repairs_never_reset_schedule() {
    let (_pool, log) = open("sqlite::memory:").await;
    log.record(RecordRequest::repair(19_000, "Engine oil change"))
        .await
        .unwrap();

    let report = log.check(19_000).await.unwrap();
    assert_eq!(report.get("Engine oil change").unwrap().last_service_mileage, 0);

    let history = log.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].category, ServiceCategory::UnscheduledRepair);
    assert_eq!(history[0].task_id, None);
}

#[tokio::test]
async fn test_persistence_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("service_log.db");
    let db_path = db_path.to_str().unwrap();

    {
        let (pool, log) = open(db_path).await;
        log.record(RecordRequest::scheduled(40_000, 7)).await.unwrap();
        log.record(RecordRequest::repair(41_000, "Replaced wiper blades"))
            .await
            .unwrap();
        pool.close().await;
    }

    let (_pool, log) = open(db_path).await;
    let history = log.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].description, "Brake fluid replacement");
    assert_eq!(history[0].display_date(), "14.09.2024");
    assert!(history[1].id > history[0].id);

    let report = log.check(75_000).await.unwrap();
    assert!(!report.contains("Brake fluid replacement"));
}

#[tokio::test]
async fn test_unavailable_store_fails_whole_check() {
    let (pool, log) = open("sqlite::memory:").await;
    log.record(RecordRequest::scheduled(10_000, 0)).await.unwrap();

    sqlx::query("DROP TABLE service_records")
        .execute(&pool)
        .await
        .unwrap();

    let result = log.check(200_000).await;
    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_invalid_record_is_not_stored() {
    let (_pool, log) = open("sqlite::memory:").await;

    let negative = log.record(RecordRequest::repair(-100, "Fixed mirror")).await;
    assert!(matches!(negative, Err(AppError::Validation(_))));

    let empty = log.record(RecordRequest::repair(100, "")).await;
    assert!(matches!(empty, Err(AppError::Validation(_))));

    assert!(log.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_catalog_with_description_matching() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let store = Arc::new(SqliteRecordStore::new(pool.clone()));

    // Row written without a task link
    sqlx::query(
        "INSERT INTO service_records (mileage, date, category, description) VALUES (?, ?, ?, ?)",
    )
    .bind(100_000_i64)
    .bind("2023-04-01")
    .bind("scheduled maintenance")
    .bind("Timing belt")
    .execute(&pool)
    .await
    .unwrap();

    let catalog = Catalog::new(vec![
        TaskDefinition::new(1, "Timing belt", 120_000),
        TaskDefinition::new(2, "Tire rotation", 10_000),
    ])
    .unwrap();

    let log = ServiceLog::new(
        store.clone(),
        Arc::new(catalog),
        Arc::new(FixedTimeProvider(today())),
    )
    .with_match_key(MatchKey::Description);

    let report = log.check(200_000).await.unwrap();
    assert!(!report.contains("Timing belt"));
    assert!(report.contains("Tire rotation"));

    let report = log.check(208_000).await.unwrap();
    assert_eq!(report.get("Timing belt").unwrap().next_due_mileage, 220_000);

    assert_eq!(store.find_latest_by_task(1).await.unwrap(), None);
}
