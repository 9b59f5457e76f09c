//! Integration tests for the overlay pipeline.
//!
//! These tests exercise the complete compose path:
//! - Catalogue → culling → projection → classification → ranking
//! - Budget enforcement across performance modes
//! - Route waypoint reservation under tight budgets
//!
//! Run with: `cargo test --test overlay_pipeline`

use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waylens::catalogue::StaticCatalogue;
use waylens::overlay::SizeClass;
use waylens::performance::SharedPerformanceMode;
use waylens::{
    ArElement, Catalogue, Category, GeoPoint, OverlayComposer, OverlayConfig, OverlayEngine,
    PerformanceMode, Pose, PoseTracker, Viewport, WorldObject,
};

// ============================================================================
// Helper Functions
// ============================================================================

const VIEWPORT: Viewport = Viewport::new(1080.0, 1920.0);

/// Observer at the origin facing north.
fn origin_pose() -> Pose {
    Pose::new(GeoPoint::new(0.0, 0.0), 0.0)
}

/// Random objects of one category scattered around the origin (±~550 m).
fn scatter(rng: &mut StdRng, category: Category, count: usize) -> Vec<WorldObject> {
    (0..count)
        .map(|i| {
            let position = GeoPoint::new(
                rng.random_range(-0.005..0.005),
                rng.random_range(-0.005..0.005),
            );
            WorldObject::new(format!("{}-{}", category, i), category, position, "object")
                .with_base_priority(rng.random_range(-5..5))
        })
        .collect()
}

fn random_catalogue(seed: u64, venues: usize, waypoints: usize, deals: usize) -> Catalogue {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut catalogue = Catalogue::new();
    catalogue.venues = scatter(&mut rng, Category::Venue, venues);
    catalogue.route_waypoints = scatter(&mut rng, Category::RouteWaypoint, waypoints);
    catalogue.deals = scatter(&mut rng, Category::Deal, deals);
    catalogue
}

fn assert_ranked(elements: &[ArElement]) {
    for pair in elements.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority > b.priority
                || (a.priority == b.priority && a.distance_meters <= b.distance_meters),
            "{} ({}, {:.1}m) ranked before {} ({}, {:.1}m)",
            a.id,
            a.priority,
            a.distance_meters,
            b.id,
            b.priority,
            b.distance_meters
        );
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_venue_due_north_is_medium_and_centered() {
    let catalogue = Catalogue::from_objects(vec![WorldObject::new(
        "north",
        Category::Venue,
        GeoPoint::new(0.001, 0.0),
        "North venue",
    )]);

    let elements = OverlayComposer::with_defaults().compose(
        &origin_pose(),
        &catalogue,
        PerformanceMode::Balanced,
        VIEWPORT,
    );

    assert_eq!(elements.len(), 1);
    assert!(elements[0].relative_bearing_degrees.abs() < 1e-6);
    assert!((elements[0].distance_meters - 111.0).abs() < 1.0);
    assert_eq!(elements[0].size_class, SizeClass::Medium);
}

#[test]
fn test_venue_due_east_is_outside_cone() {
    let catalogue = Catalogue::from_objects(vec![WorldObject::new(
        "east",
        Category::Venue,
        GeoPoint::new(0.0, 0.001),
        "East venue",
    )]);

    let elements = OverlayComposer::with_defaults().compose(
        &origin_pose(),
        &catalogue,
        PerformanceMode::High,
        VIEWPORT,
    );

    assert!(elements.is_empty());
}

#[test]
fn test_battery_mode_returns_five_nearest_of_fifty() {
    // 50 venues straight ahead at 8 m spacing, all within range and cone
    let venues: Vec<_> = (0..50)
        .map(|i| {
            WorldObject::new(
                format!("venue-{:02}", i),
                Category::Venue,
                GeoPoint::new(0.0001 + 0.00007 * i as f64, 0.0),
                "venue",
            )
        })
        .collect();
    let catalogue = Catalogue::from_objects(venues);

    let elements = OverlayComposer::with_defaults().compose(
        &origin_pose(),
        &catalogue,
        PerformanceMode::Battery,
        VIEWPORT,
    );

    let ids: Vec<_> = elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["venue-00", "venue-01", "venue-02", "venue-03", "venue-04"]
    );
    assert_ranked(&elements);
}

// ============================================================================
// Budget and ranking
// ============================================================================

#[test]
fn test_budget_holds_for_huge_catalogue() {
    let catalogue = random_catalogue(42, 5_000, 50, 2_000);
    let composer = OverlayComposer::with_defaults();

    for mode in PerformanceMode::ALL {
        let frame = composer.compose_frame(&origin_pose(), &catalogue, mode, VIEWPORT);
        let budget = composer.settings_for(mode);
        assert!(
            frame.elements.len() <= budget.max_elements,
            "{} emitted {} > {}",
            mode,
            frame.elements.len(),
            budget.max_elements
        );
        assert!(frame.stats.pre_limited > 0);
        assert_ranked(&frame.elements);
    }
}

#[test]
fn test_route_waypoints_survive_every_mode() {
    let mut catalogue = random_catalogue(7, 300, 0, 300);
    catalogue.route_waypoints.push(WorldObject::new(
        "turn-left",
        Category::RouteWaypoint,
        GeoPoint::new(0.008, 0.0),
        "Turn left",
    ));
    let composer = OverlayComposer::with_defaults();

    for mode in PerformanceMode::ALL {
        let elements = composer.compose(&origin_pose(), &catalogue, mode, VIEWPORT);
        assert!(
            elements.iter().any(|e| e.id == "turn-left"),
            "waypoint missing in {} mode",
            mode
        );
        assert_eq!(elements[0].id, "turn-left");
    }
}

#[test]
fn test_emitted_elements_respect_category_cones() {
    let catalogue = random_catalogue(99, 400, 40, 400);
    let config = OverlayConfig::default();
    let composer = OverlayComposer::new(config.clone()).unwrap();

    let elements = composer.compose(&origin_pose(), &catalogue, PerformanceMode::High, VIEWPORT);
    assert!(!elements.is_empty());

    for element in &elements {
        let category = config.category(element.category);
        assert!(element.distance_meters <= category.max_range_meters);
        assert!(element.relative_bearing_degrees.abs() <= category.fov_degrees / 2.0);
        assert!(element.screen_position.x >= 0.0 && element.screen_position.x <= VIEWPORT.width);
        assert!(element.screen_position.y >= 0.0 && element.screen_position.y <= VIEWPORT.height);
    }
}

#[test]
fn test_compose_is_deterministic() {
    let catalogue = random_catalogue(3, 200, 10, 200);
    let composer = OverlayComposer::with_defaults();

    let first = composer.compose(&origin_pose(), &catalogue, PerformanceMode::Balanced, VIEWPORT);
    let second = composer.compose(&origin_pose(), &catalogue, PerformanceMode::Balanced, VIEWPORT);
    assert_eq!(first, second);
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn test_engine_tracks_pose_and_mode() {
    let tracker = Arc::new(PoseTracker::new());
    let mode = Arc::new(SharedPerformanceMode::new(PerformanceMode::High));
    let engine = OverlayEngine::new(
        OverlayComposer::with_defaults(),
        tracker.clone(),
        Arc::new(StaticCatalogue::new(random_catalogue(11, 500, 5, 500))),
        Arc::clone(&mode),
    );

    assert!(engine.tick(VIEWPORT).elements.is_empty());

    tracker.update(origin_pose());
    let high = engine.tick(VIEWPORT);
    assert!(high.stats.pose_available);
    assert!(high.elements.len() <= 15);

    mode.set(PerformanceMode::Battery);
    let battery = engine.tick(VIEWPORT);
    assert!(battery.elements.len() <= 5);
    assert_eq!(battery.stats.mode, PerformanceMode::Battery);

    tracker.mark_unavailable();
    assert!(engine.tick(VIEWPORT).elements.is_empty());

    let snapshot = engine.metrics_snapshot();
    assert_eq!(snapshot.frames_composed, 4);
    assert_eq!(snapshot.frames_without_pose, 2);
}

// ============================================================================
// Properties
// ============================================================================

fn mode() -> impl Strategy<Value = PerformanceMode> {
    prop_oneof![
        Just(PerformanceMode::High),
        Just(PerformanceMode::Balanced),
        Just(PerformanceMode::Battery),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_budget_and_order_hold(
        seed in any::<u64>(),
        venues in 0usize..400,
        waypoints in 0usize..12,
        deals in 0usize..400,
        heading in 0.0..360.0_f64,
        mode in mode(),
    ) {
        let catalogue = random_catalogue(seed, venues, waypoints, deals);
        let composer = OverlayComposer::with_defaults();
        let pose = Pose::new(GeoPoint::new(0.0, 0.0), heading);

        let elements = composer.compose(&pose, &catalogue, mode, VIEWPORT);

        prop_assert!(elements.len() <= composer.settings_for(mode).max_elements);
        for pair in elements.windows(2) {
            prop_assert!(
                pair[0].priority > pair[1].priority
                    || (pair[0].priority == pair[1].priority
                        && pair[0].distance_meters <= pair[1].distance_meters)
            );
        }
    }

    #[test]
    fn prop_surviving_waypoint_always_emitted(
        seed in any::<u64>(),
        clutter in 0usize..300,
        distance_fraction in 0.0..0.0089_f64,
        mode in mode(),
    ) {
        let mut catalogue = random_catalogue(seed, clutter, 0, clutter);
        catalogue.route_waypoints.push(WorldObject::new(
            "wp",
            Category::RouteWaypoint,
            GeoPoint::new(distance_fraction, 0.0),
            "waypoint",
        ));

        let elements = OverlayComposer::with_defaults()
            .compose(&origin_pose(), &catalogue, mode, VIEWPORT);

        prop_assert!(elements.iter().any(|e| e.id == "wp"));
    }
}
