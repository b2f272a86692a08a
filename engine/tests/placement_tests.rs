//! Placement Tests - Picking, Snapping, Collision and Room Bounds
//!
//! End-to-end checks of the placement pipeline: a ray picks a block face,
//! the snap resolves a position, and collision plus room bounds decide
//! whether the block may go there.

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use brock_engine::builder::{
    HoverTarget, PlacementContext, calculate_floor_snap, calculate_snap, preview_hover, stacked_y, validate_placement,
};
use brock_engine::geometry::{BlockType, GeoKey, GeometryConfig, Rotation};
use brock_engine::physics::{
    CollisionChecker, SpatialHash, SurfaceHit, check_collision, check_room_bounds, footprint, footprint_fits,
    raycast_blocks, raycast_floor,
};
use brock_engine::world::{BlockId, PlacedBlock, RoomSize, SnapMode};

fn block(id: u128, block_type: BlockType, position: Vec3) -> PlacedBlock {
    PlacedBlock::new(BlockId::from_u128(id), block_type, position, Rotation::IDENTITY, 0)
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

// ============================================================================
// Pick -> snap -> validate
// ============================================================================

#[test]
fn test_connector_on_base_edge_round_trip() {
    let blocks = vec![block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
    let config = GeometryConfig::new();

    // Straight down onto the top face, near the +X edge
    let hit = raycast_blocks(Vec3::new(0.9, 5.0, 0.5), Vec3::NEG_Y, &blocks).expect("ray should hit the base");
    assert_eq!(hit.block_id, BlockId::from_u128(1));
    assert!(approx(hit.hit.point, Vec3::new(0.9, 1.0, 0.5)));
    assert!(approx(hit.hit.normal, Vec3::Y));

    let snapped = calculate_snap(&hit.hit, &blocks[0], BlockType::Conn1D, Rotation::IDENTITY, SnapMode::Grid).unwrap();
    assert!(approx(snapped, Vec3::new(1.0, 1.0, 0.5)), "got {snapped:?}");

    // The connector sinks half a unit into the base without colliding
    assert!(!check_collision(snapped, &blocks, BlockType::Conn1D, Rotation::IDENTITY, &HashSet::new(), &config));

    let ctx = PlacementContext::new(&blocks, RoomSize::Niche2M, &config);
    assert!(validate_placement(snapped, BlockType::Conn1D, Rotation::IDENTITY, &ctx));
}

#[test]
fn test_interlock_height_on_floor_level_base() {
    let target = block(1, BlockType::Base, Vec3::ZERO);
    // 0 + 0.5 + 0.5 - 0.5
    assert!((stacked_y(&target, BlockType::Conn2D, Rotation::IDENTITY) - 0.5).abs() < 1e-6);
    // Same class stacks flush
    assert!((stacked_y(&target, BlockType::Base, Rotation::IDENTITY) - 1.0).abs() < 1e-6);
    // Terminal counts as connector-class
    assert!((stacked_y(&target, BlockType::Terminal, Rotation::IDENTITY) - 0.5).abs() < 1e-6);
}

#[test]
fn test_side_face_grid_snap() {
    let target = block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5));
    let hit = SurfaceHit::new(Vec3::new(1.0, 0.6, 0.3), Vec3::X);
    let snapped = calculate_snap(&hit, &target, BlockType::Base, Rotation::IDENTITY, SnapMode::Grid).unwrap();
    assert!(approx(snapped, Vec3::new(1.5, 0.5, 0.5)));

    // Bottom faces do not snap in grid mode
    let below = SurfaceHit::new(Vec3::new(0.5, 0.0, 0.5), Vec3::NEG_Y);
    assert!(calculate_snap(&below, &target, BlockType::Base, Rotation::IDENTITY, SnapMode::Grid).is_none());
}

#[test]
fn test_floor_pick_and_precision_snap() {
    let hit = raycast_floor(Vec3::new(1.234, 10.0, 2.34), Vec3::NEG_Y).unwrap();
    let snapped = calculate_floor_snap(hit.point, BlockType::Base, Rotation::IDENTITY, SnapMode::Precision).unwrap();
    assert!(approx(snapped, Vec3::new(1.2, 0.5, 2.3)), "got {snapped:?}");

    let coarse = calculate_floor_snap(hit.point, BlockType::Double, Rotation::IDENTITY, SnapMode::Grid).unwrap();
    assert!(approx(coarse, Vec3::new(1.0, 1.0, 2.5)), "got {coarse:?}");
}

#[test]
fn test_preview_marks_overlap_invalid() {
    let blocks = vec![block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
    let config = GeometryConfig::new();
    let ctx = PlacementContext::new(&blocks, RoomSize::Unlimited, &config);

    let on_top = preview_hover(
        HoverTarget::Floor { point: Vec3::new(0.4, 0.0, 0.6) },
        BlockType::Base,
        Rotation::IDENTITY,
        SnapMode::Grid,
        None,
        &ctx,
    )
    .unwrap();
    assert!(approx(on_top.position, Vec3::new(0.5, 0.5, 0.5)));
    assert!(!on_top.valid);

    let beside = preview_hover(
        HoverTarget::Floor { point: Vec3::new(1.6, 0.0, 0.4) },
        BlockType::Base,
        Rotation::IDENTITY,
        SnapMode::Grid,
        None,
        &ctx,
    )
    .unwrap();
    assert!(beside.valid);
}

// ============================================================================
// Collision
// ============================================================================

#[test]
fn test_identical_and_distant_blocks() {
    let config = GeometryConfig::new();
    let blocks = vec![block(1, BlockType::Conn4D, Vec3::new(1.0, 0.5, 1.0))];
    let none = HashSet::new();

    assert!(check_collision(Vec3::new(1.0, 0.5, 1.0), &blocks, BlockType::Conn4D, Rotation::IDENTITY, &none, &config));
    assert!(!check_collision(Vec3::new(8.0, 0.5, 8.0), &blocks, BlockType::Conn4D, Rotation::IDENTITY, &none, &config));

    // Moving a block onto its own old spot is allowed when it is ignored
    let ignore: HashSet<_> = [BlockId::from_u128(1)].into();
    assert!(!check_collision(Vec3::new(1.0, 0.5, 1.0), &blocks, BlockType::Conn4D, Rotation::IDENTITY, &ignore, &config));
}

#[test]
fn test_spatial_hash_agrees_with_distance_cull() {
    let config = GeometryConfig::new();
    let blocks: Vec<PlacedBlock> = (0..10)
        .map(|i| block(i as u128 + 1, BlockType::Base, Vec3::new(i as f32 + 0.5, 0.5, 0.5)))
        .collect();
    let hashed = CollisionChecker::with_broad_phase(&config, SpatialHash::build(&blocks));
    let culled = CollisionChecker::new(&config);
    let none = HashSet::new();

    for position in [
        Vec3::new(4.5, 0.5, 0.5),
        Vec3::new(4.5, 0.5, 1.5),
        Vec3::new(4.0, 0.5, 0.5),
        Vec3::new(20.5, 0.5, 0.5),
    ] {
        assert_eq!(
            hashed.check(position, &blocks, BlockType::Base, Rotation::IDENTITY, &none),
            culled.check(position, &blocks, BlockType::Base, Rotation::IDENTITY, &none),
            "broad phases disagree at {position:?}"
        );
    }
}

#[test]
fn test_tuning_changes_collision_live() {
    let config = GeometryConfig::shared();
    let blocks = vec![block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
    let none = HashSet::new();
    let candidate = Vec3::new(1.48, 0.5, 0.5);

    assert!(!check_collision(candidate, &blocks, BlockType::Base, Rotation::IDENTITY, &none, &config));
    config.set(GeoKey::ColHShrink, 0.0).unwrap();
    assert!(check_collision(candidate, &blocks, BlockType::Base, Rotation::IDENTITY, &none, &config));
}

// ============================================================================
// Room bounds
// ============================================================================

#[test]
fn test_footprint_in_one_unit_room() {
    let (min, max) = footprint(Vec3::new(0.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY);
    assert!(footprint_fits(min, max, 1.0, 1.0));

    let (min, max) = footprint(Vec3::new(0.57, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY);
    assert!(!footprint_fits(min, max, 1.0, 1.0));
    assert!(approx(max.extend(0.0), Vec2::new(1.07, 1.0).extend(0.0)));
}

#[test]
fn test_quarter_turn_swaps_footprint() {
    // CONN_3D is 2 x 1.5; turned about Y it becomes 1.5 x 2
    let (min, max) = footprint(Vec3::new(1.0, 0.5, 1.0), BlockType::Conn3D, Rotation::new(0, 1, 0));
    assert!(approx((max - min).extend(0.0), Vec2::new(1.5, 2.0).extend(0.0)));
}

#[test]
fn test_unlimited_room_accepts_anything() {
    assert!(check_room_bounds(Vec3::new(-500.0, 0.5, 900.0), BlockType::Double, Rotation::IDENTITY, RoomSize::Unlimited));
    assert!(!check_room_bounds(Vec3::new(-0.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY, RoomSize::Niche2M));
}
