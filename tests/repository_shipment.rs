mod common;

use chrono::NaiveDate;
use shipment_exceptions::domain::entities::{NewShipment, UpsertOutcome};
use shipment_exceptions::domain::repositories::ShipmentRepository;
use shipment_exceptions::infrastructure::persistence::{ConnectionProvider, PgShipmentRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn repository(pool: PgPool) -> PgShipmentRepository {
    PgShipmentRepository::new(ConnectionProvider::new(Arc::new(pool)))
}

#[sqlx::test]
async fn test_upsert_batch_inserts_each_row(pool: PgPool) {
    let repo = repository(pool.clone());

    let results = repo
        .upsert_batch(vec![
            NewShipment::new("SH-1", "Rotterdam", "Hamburg"),
            NewShipment::new("SH-2", "Rotterdam", "Antwerp"),
            NewShipment::new("SH-3", "Gdansk", "Hamburg"),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(
        results
            .iter()
            .all(|r| matches!(r, Ok(UpsertOutcome::Inserted)))
    );
    assert_eq!(common::count_shipments(&pool).await, 3);
}

#[sqlx::test]
async fn test_upsert_batch_overwrites_existing(pool: PgPool) {
    let repo = repository(pool.clone());

    let mut first = NewShipment::new("SH-1", "Rotterdam", "Hamburg");
    first.status = Some("IN_TRANSIT".to_string());
    first.carrier = Some("DHL".to_string());
    repo.upsert_batch(vec![first]).await.unwrap();

    let mut second = NewShipment::new("SH-1", "Antwerp", "Hamburg");
    second.status = Some("DELIVERED".to_string());

    let results = repo.upsert_batch(vec![second]).await.unwrap();
    assert!(matches!(results[0], Ok(UpsertOutcome::Updated)));

    let stored = repo.find_by_ref("SH-1").await.unwrap().unwrap();
    assert_eq!(stored.origin.as_deref(), Some("Antwerp"));
    assert_eq!(stored.status.as_deref(), Some("DELIVERED"));
    assert_eq!(stored.carrier, None);
    assert_eq!(common::count_shipments(&pool).await, 1);
}

#[sqlx::test]
async fn test_upsert_batch_same_ref_within_batch(pool: PgPool) {
    let repo = repository(pool.clone());

    let mut late = NewShipment::new("SH-1", "Rotterdam", "Hamburg");
    late.status = Some("DELAYED".to_string());

    let results = repo
        .upsert_batch(vec![NewShipment::new("SH-1", "Rotterdam", "Hamburg"), late])
        .await
        .unwrap();

    assert!(matches!(results[0], Ok(UpsertOutcome::Inserted)));
    assert!(matches!(results[1], Ok(UpsertOutcome::Updated)));
    assert_eq!(
        common::shipment_status(&pool, "SH-1").await.as_deref(),
        Some("DELAYED")
    );
}

#[sqlx::test]
async fn test_upsert_batch_row_failure_does_not_stop_batch(pool: PgPool) {
    let repo = repository(pool.clone());

    let mut broken = NewShipment::new("SH-2", "Rotterdam", "Hamburg");
    broken.carrier = Some("nul\0byte".to_string());

    let results = repo
        .upsert_batch(vec![
            NewShipment::new("SH-1", "Rotterdam", "Hamburg"),
            broken,
            NewShipment::new("SH-3", "Rotterdam", "Hamburg"),
        ])
        .await
        .unwrap();

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
    assert_eq!(common::count_shipments(&pool).await, 2);
}

#[sqlx::test]
async fn test_find_by_ref_with_timestamps(pool: PgPool) {
    let repo = repository(pool);

    let mut shipment = NewShipment::new("SH-1", "Rotterdam", "Hamburg");
    shipment.planned_arrival = NaiveDate::from_ymd_opt(2026, 1, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0);
    repo.upsert_batch(vec![shipment.clone()]).await.unwrap();

    let stored = repo.find_by_ref("SH-1").await.unwrap().unwrap();

    assert_eq!(stored.shipment_ref, "SH-1");
    assert_eq!(stored.planned_arrival, shipment.planned_arrival);
    assert_eq!(stored.actual_arrival, None);
}

#[sqlx::test]
async fn test_find_by_ref_not_found(pool: PgPool) {
    let repo = repository(pool);

    assert!(repo.find_by_ref("SH-404").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_ids_by_refs(pool: PgPool) {
    let first = common::create_test_shipment(&pool, "SH-1").await;
    let second = common::create_test_shipment(&pool, "SH-2").await;
    let repo = repository(pool);

    let ids = repo
        .find_ids_by_refs(vec![
            "SH-1".to_string(),
            "SH-2".to_string(),
            "SH-404".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(ids["SH-1"], first);
    assert_eq!(ids["SH-2"], second);
}

#[sqlx::test]
async fn test_count(pool: PgPool) {
    common::create_test_shipment(&pool, "SH-1").await;
    common::create_test_shipment(&pool, "SH-2").await;
    let repo = repository(pool);

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_upsert_batch_unreachable_store() {
    let state = common::unreachable_state();
    let repo = PgShipmentRepository::new(state.connections.clone());

    let result = repo
        .upsert_batch(vec![NewShipment::new("SH-1", "A", "B")])
        .await;

    assert!(result.unwrap_err().is_connection());
}
