//! End-to-end zone and bootstrap flows over the storage boundary

mod support;

use patrol_engine::store::ZoneStore;
use patrol_engine::{AppError, BootstrapService, ZoneService};
use shared::LatLon;

use support::{clustered_points, harness_with_points, square_ring};

/// A submitted ring survives plan, commit, and re-fetch unchanged, vertex
/// order and coordinates included.
#[tokio::test]
async fn test_zone_ring_roundtrip() {
    let h = harness_with_points(clustered_points()).await;
    let service = ZoneService::new(h.state.clone());

    let submitted = square_ring();
    let zone = service
        .create(&h.owner, "north", submitted.clone())
        .await
        .unwrap();

    let fetched = h
        .state
        .zones
        .find_by_id(&h.owner, &zone.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.ring, submitted);
}

/// Planning inside a zone with no eligible points points the operator at
/// bootstrapping first.
#[tokio::test]
async fn test_plan_without_points_is_rejected() {
    let h = harness_with_points(vec![]).await;
    let service = ZoneService::new(h.state.clone());

    let err = service.plan(&square_ring()).await.unwrap_err();
    match err {
        AppError::BusinessRule(msg) => {
            assert!(msg.contains("no sampling positions"), "got: {msg}")
        }
        other => panic!("expected BusinessRule, got {other:?}"),
    }
    // Nothing was created or synced.
    assert!(h.registry.area_names().is_empty());
}

/// Stale points outside the retention window are not coverage sources.
#[tokio::test]
async fn test_stale_points_are_ignored() {
    let now = chrono::Utc::now();
    let stale = clustered_points()
        .into_iter()
        .map(|p| (p, now - chrono::Duration::days(31)))
        .collect();
    let registry = support::MockRegistry::default();
    let addr = support::start_mock(registry.clone()).await;
    let config = patrol_engine::Config::with_overrides(
        format!("http://{addr}"),
        ["", "", ""],
        "",
    );
    let state = patrol_engine::EngineState::initialize(
        config,
        std::sync::Arc::new(patrol_engine::store::MemoryZoneStore::new()),
        std::sync::Arc::new(patrol_engine::store::MemoryBootstrapStore::new()),
        std::sync::Arc::new(patrol_engine::store::MemoryAccountStore::new()),
        std::sync::Arc::new(patrol_engine::store::MemoryPointSource::new(stale)),
    )
    .unwrap();

    let service = ZoneService::new(state);
    let err = service.plan(&square_ring()).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

/// Degenerate polygons are rejected before any planning work.
#[tokio::test]
async fn test_invalid_polygon_is_rejected() {
    let h = harness_with_points(clustered_points()).await;
    let service = ZoneService::new(h.state.clone());

    let line = vec![LatLon::new(48.0, 9.0), LatLon::new(48.0, 9.01)];
    let err = service.create(&h.owner, "north", line).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .create(&h.owner, "   ", square_ring())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

/// Deleting a zone tears down its external area and the local record.
#[tokio::test]
async fn test_delete_zone_removes_external_area() {
    let h = harness_with_points(clustered_points()).await;
    let service = ZoneService::new(h.state.clone());

    let zone = service
        .create(&h.owner, "north", square_ring())
        .await
        .unwrap();
    assert_eq!(h.registry.area_names(), vec!["42_north".to_string()]);

    assert!(service.delete(&h.owner, &zone.id).await.unwrap());
    assert!(h.registry.area_names().is_empty());
    assert!(h
        .state
        .zones
        .find_by_id(&h.owner, &zone.id)
        .await
        .unwrap()
        .is_none());
}

/// A provisional zone over the area ceiling is rejected with the measured
/// size in the reason.
#[tokio::test]
async fn test_bootstrap_area_ceiling() {
    let h = harness_with_points(vec![]).await;
    let service = BootstrapService::new(h.state.clone());

    // ~0.05 x 0.05 degrees is roughly 20 km² at this latitude.
    let huge = vec![
        LatLon::new(48.70, 9.10),
        LatLon::new(48.70, 9.15),
        LatLon::new(48.75, 9.15),
        LatLon::new(48.75, 9.10),
        LatLon::new(48.70, 9.10),
    ];
    let err = service.sync(&h.owner, huge).await.unwrap_err();
    match err {
        AppError::BusinessRule(msg) => assert!(msg.contains("exceeds the maximum"), "got: {msg}"),
        other => panic!("expected BusinessRule, got {other:?}"),
    }
    assert!(h.registry.area_names().is_empty());
}

/// Manually clearing the bootstrap tour keeps the polygon and does not touch
/// the external area.
#[tokio::test]
async fn test_manual_tour_clear_keeps_polygon_and_area() {
    let h = harness_with_points(vec![]).await;
    let service = BootstrapService::new(h.state.clone());

    service.sync(&h.owner, square_ring()).await.unwrap();
    service.clear_tour(&h.owner).await.unwrap();

    let stored = service.find(&h.owner).await.unwrap().unwrap();
    assert!(stored.tour.is_none());
    assert_eq!(stored.ring, square_ring());
    assert_eq!(h.registry.area_names(), vec!["42_bootstrap".to_string()]);
}

/// Re-syncing a bootstrap refreshes the tour and the sync timestamp.
#[tokio::test]
async fn test_bootstrap_resync_refreshes_ttl() {
    let h = harness_with_points(vec![]).await;
    let service = BootstrapService::new(h.state.clone());

    let first = service.sync(&h.owner, square_ring()).await.unwrap();
    service.clear_tour(&h.owner).await.unwrap();
    let second = service.sync(&h.owner, square_ring()).await.unwrap();

    assert!(second.tour.is_some());
    assert!(second.synced_at >= first.synced_at);
    assert_eq!(h.registry.area_names(), vec!["42_bootstrap".to_string()]);
}
