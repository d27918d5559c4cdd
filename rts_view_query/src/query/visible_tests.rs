use glam::{Mat4, Vec3};
use super::*;
use crate::camera::Viewport;
use crate::world::{Feature, LosStatus, LosTable, Projectile, TeamRoster, Unit};

// Looking straight down at (256, 0, 256); the ground footprint is roughly
// x, z in [-12, 524], so the far corner of the 1024² map is out of view.
fn create_test_camera() -> Camera {
    let view = Mat4::look_at_rh(Vec3::new(256.0, 1000.0, 256.0), Vec3::new(256.0, 0.0, 256.0), Vec3::NEG_Z);
    let proj = Mat4::perspective_rh(30f32.to_radians(), 1.0, 1.0, 5000.0);
    Camera::new(view, proj, Viewport::new(0.0, 0.0, 800.0, 800.0))
}

fn seen_by_all() -> LosTable {
    LosTable::new().with(0, LosStatus::IN_LOS).with(1, LosStatus::IN_LOS)
}

// Teams 0 and 1 are allied (ally-team 0), team 2 is alone (ally-team 1).
fn create_test_world() -> World {
    let mut world = World::new(1024.0, 1024.0, 128.0, TeamRoster::new(vec![0, 0, 1]));
    let units = [
        (1, 0, 0, Vec3::new(200.0, 0.0, 200.0)),
        (2, 1, 0, Vec3::new(300.0, 0.0, 250.0)),
        (3, 2, 1, Vec3::new(256.0, 0.0, 256.0)),
        (4, 2, 1, Vec3::new(900.0, 0.0, 900.0)),
    ];
    for (id, team, ally_team, pos) in units {
        let unit = Unit::new(UnitId(id), team, ally_team, pos, 20.0).with_los(seen_by_all());
        world.insert_unit(unit).unwrap();
    }
    world
}

fn player() -> ReadAccess {
    ReadAccess::player(0, 0)
}

fn units(engine: &mut VisibilityEngine, world: &World, access: &ReadAccess, selector: UnitSelector) -> Vec<UnitId> {
    let query = UnitQuery { selector, ..UnitQuery::default() };
    engine.get_visible_units(world, &create_test_camera(), access, &query).sorted()
}

// ============================================================================
// Units
// ============================================================================

#[test]
fn test_units_in_view_only() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();
    assert_eq!(
        units(&mut engine, &world, &player(), UnitSelector::All),
        vec![UnitId(1), UnitId(2), UnitId(3)]
    );
}

#[test]
fn test_straddling_unit_listed_once() {
    let world = create_test_world();
    // unit 3 sits on a quad corner and is listed in four quads
    let key = world.units().key_of(UnitId(3)).unwrap();
    assert_eq!(world.quads().unit_quad_count(key), 4);

    let mut engine = VisibilityEngine::new();
    let ids = engine.get_visible_units(&world, &create_test_camera(), &player(), &UnitQuery::default());
    assert_eq!(ids.iter().filter(|&&id| id == UnitId(3)).count(), 1);
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_repeated_queries_agree() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();

    let first = units(&mut engine, &world, &player(), UnitSelector::All);
    let second = units(&mut engine, &world, &player(), UnitSelector::All);

    assert_eq!(first, second);
    assert_eq!(engine.query_count(), 2);
}

#[test]
fn test_allegiance_partition() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();
    let access = player();

    let mine = units(&mut engine, &world, &access, UnitSelector::Mine);
    let ally = units(&mut engine, &world, &access, UnitSelector::Ally);
    let enemy = units(&mut engine, &world, &access, UnitSelector::Enemy);
    let all = units(&mut engine, &world, &access, UnitSelector::All);

    assert_eq!(mine, vec![UnitId(1)]);
    assert_eq!(ally, vec![UnitId(2)]);
    assert_eq!(enemy, vec![UnitId(3)]);

    let mut union: Vec<UnitId> = mine.into_iter().chain(ally).chain(enemy).collect();
    union.sort();
    assert_eq!(union, all);
}

#[test]
fn test_fog_hides_radar_only_units() {
    let mut world = create_test_world();
    world.update_unit(UnitId(3), |unit| unit.los = LosTable::new().with(0, LosStatus::IN_RADAR));

    let mut engine = VisibilityEngine::new();
    let seen = units(&mut engine, &world, &player(), UnitSelector::All);
    assert!(!seen.contains(&UnitId(3)));

    let seen = units(&mut engine, &world, &ReadAccess::full_view(0), UnitSelector::All);
    assert!(seen.contains(&UnitId(3)));
}

#[test]
fn test_no_draw_units_never_returned() {
    let mut world = create_test_world();
    world.update_unit(UnitId(2), |unit| unit.no_draw = true);

    let mut engine = VisibilityEngine::new();
    let seen = units(&mut engine, &world, &ReadAccess::full_view(0), UnitSelector::All);
    assert_eq!(seen, vec![UnitId(1), UnitId(3)]);
}

#[test]
fn test_icons_excluded_on_request() {
    let mut world = create_test_world();
    world.update_unit(UnitId(1), |unit| unit.is_icon = true);

    let mut engine = VisibilityEngine::new();
    let query = UnitQuery { include_icons: false, ..UnitQuery::default() };
    let seen = engine.get_visible_units(&world, &create_test_camera(), &player(), &query);
    assert!(!seen.contains(UnitId(1)));
    assert!(seen.contains(UnitId(2)));
}

#[test]
fn test_specific_team_reads_through_its_ally_team() {
    let mut world = create_test_world();
    // only ally-team 1 sees unit 3
    world.update_unit(UnitId(3), |unit| unit.los = LosTable::new().with(1, LosStatus::IN_LOS));

    let mut engine = VisibilityEngine::new();
    assert_eq!(units(&mut engine, &world, &player(), UnitSelector::Team(2)), vec![UnitId(3)]);
    assert_eq!(units(&mut engine, &world, &player(), UnitSelector::Team(0)), vec![UnitId(1)]);
}

#[test]
fn test_invalid_team_yields_nothing() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();
    assert!(units(&mut engine, &world, &ReadAccess::full_view(0), UnitSelector::Team(7)).is_empty());
}

#[test]
fn test_reader_without_ally_team_sees_nothing() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();
    assert!(units(&mut engine, &world, &ReadAccess::none(0), UnitSelector::All).is_empty());
}

#[test]
fn test_mine_without_team_means_all() {
    let world = create_test_world();
    let mut engine = VisibilityEngine::new();
    assert_eq!(
        units(&mut engine, &world, &ReadAccess::full_view(0), UnitSelector::Mine),
        vec![UnitId(1), UnitId(2), UnitId(3)]
    );
}

#[test]
fn test_unit_selector_from_team_arg() {
    assert_eq!(UnitSelector::from_team_arg(-1), UnitSelector::All);
    assert_eq!(UnitSelector::from_team_arg(-2), UnitSelector::Mine);
    assert_eq!(UnitSelector::from_team_arg(-3), UnitSelector::Ally);
    assert_eq!(UnitSelector::from_team_arg(-4), UnitSelector::Enemy);
    assert_eq!(UnitSelector::from_team_arg(-9), UnitSelector::All);
    assert_eq!(UnitSelector::from_team_arg(5), UnitSelector::Team(5));
}

// ============================================================================
// Features
// ============================================================================

fn world_with_features() -> World {
    let mut world = World::new(1024.0, 1024.0, 128.0, TeamRoster::new(vec![0, 1]));
    let mut tree = Feature::new(FeatureId(10), 0, 0, Vec3::new(256.0, 0.0, 256.0), 10.0)
        .with_los(seen_by_all());
    tree.draw_radius = 10.0;
    world.insert_feature(tree).unwrap();

    let mut vent = Feature::new(FeatureId(11), 0, 0, Vec3::new(100.0, 0.0, 100.0), 30.0)
        .with_los(LosTable::new().with(1, LosStatus::IN_LOS));
    vent.geo_thermal = true;
    world.insert_feature(vent).unwrap();
    world
}

#[test]
fn test_features_follow_fog_and_geo_flags() {
    let world = world_with_features();
    let camera = create_test_camera();
    let mut engine = VisibilityEngine::new();

    let own = engine.get_visible_features(&world, &camera, &ReadAccess::player(0, 0), &FeatureQuery::default());
    assert_eq!(own.sorted(), vec![FeatureId(10)]);

    let all = engine.get_visible_features(&world, &camera, &ReadAccess::full_view(0), &FeatureQuery::default());
    assert_eq!(all.sorted(), vec![FeatureId(10), FeatureId(11)]);

    let no_geos = FeatureQuery { include_geothermal: false, ..FeatureQuery::default() };
    let all = engine.get_visible_features(&world, &camera, &ReadAccess::full_view(0), &no_geos);
    assert_eq!(all.sorted(), vec![FeatureId(10)]);
}

#[test]
fn test_features_explicit_ally_team() {
    let world = world_with_features();
    let camera = create_test_camera();
    let mut engine = VisibilityEngine::new();

    let query = FeatureQuery { ally_team: Some(1), ..FeatureQuery::default() };
    let seen = engine.get_visible_features(&world, &camera, &ReadAccess::player(0, 0), &query);
    assert_eq!(seen.sorted(), vec![FeatureId(10), FeatureId(11)]);

    let query = FeatureQuery { ally_team: Some(5), ..FeatureQuery::default() };
    assert!(engine.get_visible_features(&world, &camera, &ReadAccess::full_view(0), &query).is_empty());
}

// ============================================================================
// Projectiles
// ============================================================================

#[test]
fn test_projectiles_synced_and_radar() {
    let mut world = World::new(1024.0, 1024.0, 128.0, TeamRoster::new(vec![0, 1]));
    let radar = LosTable::new().with(0, LosStatus::IN_RADAR);

    world.insert_projectile(
        Projectile::new(ProjectileId(1), 1, 1, Vec3::new(256.0, 50.0, 256.0), 3.0).with_los(radar.clone()),
    );
    let mut unsynced = Projectile::new(ProjectileId(2), 1, 1, Vec3::new(250.0, 50.0, 250.0), 3.0).with_los(radar.clone());
    unsynced.synced = false;
    world.insert_projectile(unsynced);
    let mut piece = Projectile::new(ProjectileId(3), 1, 1, Vec3::new(260.0, 50.0, 260.0), 3.0).with_los(radar);
    piece.weapon = false;
    piece.piece = true;
    world.insert_projectile(piece);

    let camera = create_test_camera();
    let mut engine = VisibilityEngine::new();

    let seen = engine.get_visible_projectiles(&world, &camera, &player(), &ProjectileQuery::default());
    assert_eq!(seen.sorted(), vec![ProjectileId(1), ProjectileId(3)]);

    let no_pieces = ProjectileQuery { include_pieces: false, ..ProjectileQuery::default() };
    let seen = engine.get_visible_projectiles(&world, &camera, &player(), &no_pieces);
    assert_eq!(seen.into_vec(), vec![ProjectileId(1)]);
}
