//! Integration tests for screen rays through the script callouts
//!
//! Uses a heightmap with a water plane above the terrain and a 1024×768
//! view with a minimap in the bottom-left corner.
//!
//! Run with: cargo test --test screen_ray_integration_tests

use rts_view_query::glam::{Mat4, Vec3};
use rts_view_query::viewquery::camera::{Camera, Viewport};
use rts_view_query::viewquery::decal::DecalBackend;
use rts_view_query::viewquery::query::{ReadAccess, VisibilityEngine};
use rts_view_query::viewquery::ray::{Heightmap, RayHit};
use rts_view_query::viewquery::view::{Minimap, ViewGeometry, ViewState};
use rts_view_query::viewquery::world::{
    Feature, FeatureId, LosStatus, LosTable, TeamRoster, Unit, UnitId, World,
};
use rts_view_query::viewquery::{Arg, UnsyncedRead, ViewConfig};

// ============================================================================
// SCENE
// ============================================================================

const CENTER: (i32, i32) = (512, 384);

struct Scene {
    world: World,
    camera: Camera,
    view: ViewState,
    terrain: Heightmap,
    decals: DecalBackend,
    visibility: VisibilityEngine,
}

impl Scene {
    fn reader(&mut self) -> UnsyncedRead<'_> {
        UnsyncedRead::new(
            &self.world,
            &self.camera,
            &self.view,
            &self.terrain,
            &self.decals,
            ReadAccess::player(0, 0),
            &mut self.visibility,
        )
    }
}

fn camera(eye: Vec3, target: Vec3, up: Vec3) -> Camera {
    Camera::new(
        Mat4::look_at_rh(eye, target, up),
        Mat4::perspective_rh(60f32.to_radians(), 4.0 / 3.0, 1.0, 20000.0),
        Viewport::new(0.0, 0.0, 1024.0, 768.0),
    )
}

fn scene(camera: Camera) -> Scene {
    let seen = LosTable::new().with(0, LosStatus::IN_LOS);
    let mut world = World::new(2048.0, 2048.0, 128.0, TeamRoster::new(vec![0, 1]));
    world.insert_unit(Unit::new(UnitId(10), 0, 0, Vec3::new(1000.0, 0.0, 1000.0), 24.0).with_los(seen.clone()));
    world.insert_feature(Feature::new(FeatureId(5), 0, 0, Vec3::new(1024.0, -20.0, 1024.0), 40.0).with_los(seen));

    let config = ViewConfig::default();
    // Sea floor 50 below the water plane
    let terrain = Heightmap::flat(16, 16, 128.0, -50.0).map(|map| map.with_config(&config));
    let view = ViewState::with_config(ViewGeometry::new(1024, 768, 0, 0), config)
        .with_minimap(Minimap::new(0, 0, 256, 192, 2048.0, 2048.0));

    Scene {
        world,
        camera,
        view,
        terrain: terrain.unwrap(),
        decals: DecalBackend::Legacy,
        visibility: VisibilityEngine::new(),
    }
}

fn overhead() -> Scene {
    scene(camera(Vec3::new(1024.0, 1500.0, 1024.0), Vec3::new(1024.0, 0.0, 1024.0), Vec3::NEG_Z))
}

fn args(values: &[Arg]) -> Vec<Arg> {
    let mut all = vec![Arg::Number(CENTER.0 as f64), Arg::Number(CENTER.1 as f64)];
    all.extend_from_slice(values);
    all
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn test_integration_feature_under_cursor() {
    let mut scene = overhead();
    let reader = scene.reader();

    let hit = reader.trace_screen_ray(&args(&[])).unwrap();
    assert_eq!(hit, Some(RayHit::Feature(FeatureId(5))));
}

#[test]
fn test_integration_water_and_sea_floor() {
    let mut scene = overhead();
    let reader = scene.reader();

    let wet = reader.trace_screen_ray(&args(&[true.into()])).unwrap().unwrap();
    assert_eq!(wet.kind(), "ground");
    assert!(wet.coords().unwrap().trace.y.abs() < 0.1);

    let dry_flags = [true.into(), false.into(), false.into(), true.into()];
    let dry = reader.trace_screen_ray(&args(&dry_flags)).unwrap().unwrap();
    assert_eq!(dry.kind(), "ground");
    assert!((dry.coords().unwrap().trace.y + 50.0).abs() < 0.1);
}

#[test]
fn test_integration_minimap_click_selects_unit() {
    let mut scene = overhead();
    let reader = scene.reader();

    // (128, 96) lands at about (1024, 1013) on the map
    let click = [Arg::Number(128.0), Arg::Number(96.0), false.into(), true.into()];
    assert_eq!(reader.trace_screen_ray(&click), Ok(Some(RayHit::Unit(UnitId(10)))));
    assert_eq!(reader.is_above_minimap(&[Arg::Number(128.0), Arg::Number(96.0)]), Ok(Some(true)));

    // without the minimap switch the 3D ray is used
    let click = [Arg::Number(128.0), Arg::Number(96.0), true.into()];
    let hit = reader.trace_screen_ray(&click).unwrap().unwrap();
    assert!(hit.coords().unwrap().plane.is_some());
}

#[test]
fn test_integration_horizon_is_sky() {
    let mut scene = scene(camera(Vec3::new(1024.0, 100.0, 1024.0), Vec3::new(1024.0, 100.0, 0.0), Vec3::Y));
    let reader = scene.reader();

    assert_eq!(reader.trace_screen_ray(&args(&[])), Ok(None));

    let sky = [false.into(), false.into(), true.into()];
    let hit = reader.trace_screen_ray(&args(&sky)).unwrap().unwrap();
    assert_eq!(hit.kind(), "sky");
}
