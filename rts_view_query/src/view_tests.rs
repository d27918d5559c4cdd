use super::*;
use crate::world::{LosStatus, LosTable, TeamRoster, Unit};

fn geometry() -> ViewGeometry {
    ViewGeometry::new(800, 600, 0, 0)
}

// 200×200 minimap in the bottom-left corner over a 2048² map
fn minimap() -> Minimap {
    Minimap::new(0, 0, 200, 200, 2048.0, 2048.0)
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_window_pixel_flips_y() {
    let view = ViewGeometry::new(800, 600, 10, 20);
    assert_eq!(view.window_pixel(0, 0), (10, 579));
    assert_eq!(view.window_pixel(100, 579), (110, 0));
}

#[test]
fn test_view_contains_is_half_open() {
    let view = geometry();
    assert!(view.contains(0, 0));
    assert!(view.contains(799, 599));
    assert!(!view.contains(800, 10));
    assert!(!view.contains(-1, 10));
}

// ============================================================================
// Minimap
// ============================================================================

#[test]
fn test_minimap_projection_corners() {
    let view = geometry();
    let minimap = minimap();

    // top-left pixel of the minimap: window row 400
    assert_eq!(minimap.map_position(0, 400, &view), Vec2::new(0.0, 0.0));
    // centre
    assert_eq!(minimap.map_position(100, 500, &view), Vec2::new(1024.0, 1024.0));
    // beyond the right edge clamps
    assert_eq!(minimap.map_position(400, 500, &view).x, 2048.0);
}

#[test]
fn test_is_above_minimap() {
    let state = ViewState::with_config(geometry(), ViewConfig::default());
    assert_eq!(state.is_above_minimap(10, 10), None);

    let mut state = state.with_minimap(minimap());
    assert_eq!(state.is_above_minimap(10, 10), Some(true));
    assert_eq!(state.is_above_minimap(199, 199), Some(true));
    assert_eq!(state.is_above_minimap(200, 10), Some(false));

    state.hide_interface = true;
    assert_eq!(state.is_above_minimap(10, 10), Some(false));

    state.hide_interface = false;
    if let Some(minimap) = state.minimap.as_mut() {
        minimap.minimized = true;
    }
    assert_eq!(state.is_above_minimap(10, 10), Some(false));
}

#[test]
fn test_is_above_minimap_applies_view_offset() {
    let state = ViewState::with_config(ViewGeometry::new(800, 600, 50, 0), ViewConfig::default())
        .with_minimap(Minimap::new(60, 0, 100, 100, 1024.0, 1024.0));
    assert_eq!(state.is_above_minimap(5, 10), Some(false));
    assert_eq!(state.is_above_minimap(10, 10), Some(true));
}

#[test]
fn test_select_unit_picks_nearest_visible() {
    let mut world = World::new(2048.0, 2048.0, 128.0, TeamRoster::new(vec![0, 1]));
    let los = LosTable::new().with(0, LosStatus::IN_LOS);
    world.insert_unit(Unit::new(UnitId(1), 1, 1, Vec3::new(1000.0, 0.0, 1000.0), 8.0).with_los(los.clone()));
    world.insert_unit(Unit::new(UnitId(2), 1, 1, Vec3::new(1030.0, 0.0, 1000.0), 8.0).with_los(los.clone()));
    // closest, but the reader cannot see it
    world.insert_unit(Unit::new(UnitId(3), 1, 1, Vec3::new(1024.0, 0.0, 1024.0), 8.0));

    let access = ReadAccess::player(0, 0);
    let pos = Vec3::new(1024.0, 0.0, 1020.0);
    assert_eq!(minimap().select_unit(&world, &access, pos, 64.0), Some(UnitId(2)));
    assert_eq!(minimap().select_unit(&world, &ReadAccess::full_view(0), pos, 64.0), Some(UnitId(3)));
    assert_eq!(minimap().select_unit(&world, &access, Vec3::new(100.0, 0.0, 100.0), 64.0), None);
}
