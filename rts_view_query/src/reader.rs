/// Script-callable surface of the view query layer.
///
/// Binds the world, camera, view state, ground, decal backend and the
/// caller's read access, and exposes one method per callout. Each method
/// validates its positional arguments, then forwards to the typed API.
///
/// Return conventions:
/// - `Err(..)`: bad arguments or an unsupported backend (also logged)
/// - `Ok(None)` / empty `Vec`: nothing visible, unknown id or no permission

use glam::{Vec2, Vec3};
use crate::args::{self, Arg};
use crate::camera::Camera;
use crate::decal::DecalBackend;
use crate::error::Result;
use crate::query::{
    FeatureQuery, ObjectReader, ProjectileQuery, ReadAccess, UnitQuery, UnitSelector,
    VisibilityEngine,
};
use crate::ray::{Ground, RayHit, ScreenRayCaster, ScreenRayOptions};
use crate::view::{Minimap, ViewGeometry, ViewState};
use crate::world::{FeatureId, ProjectileId, UnitId, World};

const SOURCE: &str = "viewquery::UnsyncedRead";

/// Script callouts for one reader.
pub struct UnsyncedRead<'a> {
    world: &'a World,
    camera: &'a Camera,
    view: &'a ViewState,
    ground: &'a dyn Ground,
    decals: &'a DecalBackend,
    access: ReadAccess,
    visibility: &'a mut VisibilityEngine,
}

impl<'a> UnsyncedRead<'a> {
    pub fn new(
        world: &'a World,
        camera: &'a Camera,
        view: &'a ViewState,
        ground: &'a dyn Ground,
        decals: &'a DecalBackend,
        access: ReadAccess,
        visibility: &'a mut VisibilityEngine,
    ) -> Self {
        Self { world, camera, view, ground, decals, access, visibility }
    }

    pub fn access(&self) -> &ReadAccess {
        &self.access
    }

    fn objects(&self) -> ObjectReader<'_> {
        ObjectReader::new(self.world, &self.access)
    }

    // ===== VIEW & CAMERA =====

    /// `GetViewGeometry()`
    pub fn get_view_geometry(&self) -> ViewGeometry {
        self.view.geometry
    }

    /// `GetMiniMapGeometry()`: `None` without a minimap.
    pub fn get_minimap_geometry(&self) -> Option<&Minimap> {
        self.view.minimap.as_ref()
    }

    /// `IsAboveMiniMap(x, y)`
    pub fn is_above_minimap(&self, args: &[Arg]) -> Result<Option<bool>> {
        const F: &str = "IsAboveMiniMap";
        let Some(minimap) = self.view.minimap.as_ref() else {
            return Ok(None);
        };
        if minimap.minimized || self.view.hide_interface {
            return Ok(Some(false));
        }
        let x = logged(F, args::check_int(args, F, 1))?;
        let y = logged(F, args::check_int(args, F, 2))?;
        Ok(self.view.is_above_minimap(clamp_i32(x), clamp_i32(y)))
    }

    /// `GetCameraPosition()`
    pub fn get_camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    /// `GetCameraDirection()`
    pub fn get_camera_direction(&self) -> Vec3 {
        self.camera.direction()
    }

    /// `IsSphereInView(x, y, z [, radius])`
    pub fn is_sphere_in_view(&self, args: &[Arg]) -> Result<bool> {
        const F: &str = "IsSphereInView";
        let pos = logged(F, check_vec3(args, F, 1))?;
        let radius = args::raw_number(args, 4).unwrap_or(0.0) as f32;
        Ok(self.camera.in_view_sphere(pos, radius))
    }

    /// `IsAABBInView(minx, miny, minz, maxx, maxy, maxz)`
    pub fn is_aabb_in_view(&self, args: &[Arg]) -> Result<bool> {
        const F: &str = "IsAABBInView";
        let mins = logged(F, check_vec3(args, F, 1))?;
        let maxs = logged(F, check_vec3(args, F, 4))?;
        Ok(self.camera.in_view_aabb(mins, maxs))
    }

    /// `WorldToScreenCoords(x, y, z)`
    pub fn world_to_screen_coords(&self, args: &[Arg]) -> Result<Vec3> {
        const F: &str = "WorldToScreenCoords";
        let pos = logged(F, check_vec3(args, F, 1))?;
        Ok(self.camera.world_to_screen(pos))
    }

    /// `GetPixelDir(x, y)` in window pixels.
    pub fn get_pixel_dir(&self, args: &[Arg]) -> Result<Vec3> {
        const F: &str = "GetPixelDir";
        let x = logged(F, args::check_int(args, F, 1))?;
        let y = logged(F, args::check_int(args, F, 2))?;
        Ok(self.camera.pixel_dir(x as f32, y as f32))
    }

    /// `TraceScreenRay(mx, my [, planeHeight], onlyCoords, useMinimap,
    /// includeSky, ignoreWater [, planeHeight])`
    ///
    /// When argument 3 is a number it is the plane height and the option
    /// block starts at 4; otherwise the options start at 3 and the plane
    /// height is argument 7.
    pub fn trace_screen_ray(&self, args: &[Arg]) -> Result<Option<RayHit>> {
        const F: &str = "TraceScreenRay";
        let mx = logged(F, args::check_int(args, F, 1))?;
        let my = logged(F, args::check_int(args, F, 2))?;

        let (opt_idx, plane_idx) = if args::is_number(args, 3) { (4, 3) } else { (3, 7) };
        let options = ScreenRayOptions {
            only_coords: logged(F, args::opt_bool(args, F, opt_idx, false))?,
            use_minimap: logged(F, args::opt_bool(args, F, opt_idx + 1, false))?,
            include_sky: logged(F, args::opt_bool(args, F, opt_idx + 2, false))?,
            ignore_water: logged(F, args::opt_bool(args, F, opt_idx + 3, false))?,
            plane_height: logged(F, args::opt_float(args, F, plane_idx, 0.0))?,
        };

        let caster = ScreenRayCaster {
            world: self.world,
            camera: self.camera,
            view: self.view,
            ground: self.ground,
            access: &self.access,
        };
        Ok(caster.trace_screen_ray(clamp_i32(mx), clamp_i32(my), &options))
    }

    // ===== VISIBILITY QUERIES =====

    /// `GetVisibleUnits([teamID [, radius [, icons]]])`
    pub fn get_visible_units(&mut self, args: &[Arg]) -> Result<Vec<UnitId>> {
        const F: &str = "GetVisibleUnits";
        let team = logged(F, args::opt_int(args, F, 1, UnitSelector::ALL))?;
        let query = UnitQuery {
            selector: UnitSelector::from_team_arg(team),
            radius: args::raw_number(args, 2).map(|n| n as f32),
            include_icons: logged(F, args::opt_bool(args, F, 3, true))?,
        };
        Ok(self
            .visibility
            .get_visible_units(self.world, self.camera, &self.access, &query)
            .into_vec())
    }

    /// `GetVisibleFeatures([allyTeamID [, radius [, icons [, geos]]]])`
    pub fn get_visible_features(&mut self, args: &[Arg]) -> Result<Vec<FeatureId>> {
        const F: &str = "GetVisibleFeatures";
        let ally_team = logged(F, args::opt_int(args, F, 1, -1))?;
        let query = FeatureQuery {
            ally_team: (ally_team >= 0).then_some(ally_team),
            radius: args::raw_number(args, 2).map(|n| n as f32),
            include_icons: logged(F, args::opt_bool(args, F, 3, true))?,
            include_geothermal: logged(F, args::opt_bool(args, F, 4, true))?,
        };
        Ok(self
            .visibility
            .get_visible_features(self.world, self.camera, &self.access, &query)
            .into_vec())
    }

    /// `GetVisibleProjectiles([allyTeamID [, synced [, weapons [, pieces]]]])`
    ///
    /// Only synced projectiles are ever returned; the `synced` switch is
    /// validated and otherwise ignored.
    pub fn get_visible_projectiles(&mut self, args: &[Arg]) -> Result<Vec<ProjectileId>> {
        const F: &str = "GetVisibleProjectiles";
        let ally_team = logged(F, args::opt_int(args, F, 1, -1))?;
        logged(F, args::opt_bool(args, F, 2, true))?;
        let query = ProjectileQuery {
            ally_team: (ally_team >= 0).then_some(ally_team),
            include_weapons: logged(F, args::opt_bool(args, F, 3, true))?,
            include_pieces: logged(F, args::opt_bool(args, F, 4, true))?,
        };
        Ok(self
            .visibility
            .get_visible_projectiles(self.world, self.camera, &self.access, &query)
            .into_vec())
    }

    // ===== UNIT CHECKS =====

    /// `IsUnitAllied(unitID)`
    pub fn is_unit_allied(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "IsUnitAllied")?;
        Ok(id.and_then(|id| self.objects().is_unit_allied(id)))
    }

    /// `IsUnitInView(unitID)`
    pub fn is_unit_in_view(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "IsUnitInView")?;
        Ok(id.and_then(|id| self.objects().is_unit_in_view(self.camera, id)))
    }

    /// `IsUnitVisible(unitID [, radius [, checkIcon]])`
    pub fn is_unit_visible(&self, args: &[Arg]) -> Result<Option<bool>> {
        const F: &str = "IsUnitVisible";
        let Some(id) = unit_id(args, F)? else {
            return Ok(None);
        };
        let radius = match args.get(1) {
            None | Some(Arg::Nil) => None,
            Some(_) => Some(logged(F, args::check_float(args, F, 2))?),
        };
        let check_icon = args::to_bool(args, 3);
        Ok(self.objects().is_unit_visible(self.camera, id, radius, check_icon))
    }

    /// `IsUnitIcon(unitID)`
    pub fn is_unit_icon(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "IsUnitIcon")?;
        Ok(id.and_then(|id| self.objects().is_unit_icon(id)))
    }

    /// `GetUnitNoDraw(unitID)`
    pub fn get_unit_no_draw(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "GetUnitNoDraw")?;
        Ok(id.and_then(|id| self.objects().unit_no_draw(id)))
    }

    /// `GetUnitNoSelect(unitID)`
    pub fn get_unit_no_select(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "GetUnitNoSelect")?;
        Ok(id.and_then(|id| self.objects().unit_no_select(id)))
    }

    /// `GetUnitNoMinimap(unitID)`
    pub fn get_unit_no_minimap(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "GetUnitNoMinimap")?;
        Ok(id.and_then(|id| self.objects().unit_no_minimap(id)))
    }

    /// `GetUnitLuaDraw(unitID)`
    pub fn get_unit_lua_draw(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = unit_id(args, "GetUnitLuaDraw")?;
        Ok(id.and_then(|id| self.objects().unit_lua_draw(id)))
    }

    /// `GetFeatureNoDraw(featureID)`
    pub fn get_feature_no_draw(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = feature_id(args, "GetFeatureNoDraw")?;
        Ok(id.and_then(|id| self.objects().feature_no_draw(id)))
    }

    /// `GetFeatureLuaDraw(featureID)`
    pub fn get_feature_lua_draw(&self, args: &[Arg]) -> Result<Option<bool>> {
        let id = feature_id(args, "GetFeatureLuaDraw")?;
        Ok(id.and_then(|id| self.objects().feature_lua_draw(id)))
    }

    // ===== DECALS =====

    /// `GetAllDecals()`
    pub fn get_all_decals(&self) -> Result<Vec<u32>> {
        logged("GetAllDecals", self.decals.all_decals())
    }

    /// `GetDecalPos(idx)`
    pub fn get_decal_pos(&self, args: &[Arg]) -> Result<Option<Vec3>> {
        const F: &str = "GetDecalPos";
        self.with_decal(args, F, |decals, idx| decals.decal_pos(idx))
    }

    /// `GetDecalSize(idx)`
    pub fn get_decal_size(&self, args: &[Arg]) -> Result<Option<Vec2>> {
        const F: &str = "GetDecalSize";
        self.with_decal(args, F, |decals, idx| decals.decal_size(idx))
    }

    /// `GetDecalRotation(idx)`
    pub fn get_decal_rotation(&self, args: &[Arg]) -> Result<Option<f32>> {
        const F: &str = "GetDecalRotation";
        self.with_decal(args, F, |decals, idx| decals.decal_rotation(idx))
    }

    /// `GetDecalTexture(idx)`
    pub fn get_decal_texture(&self, args: &[Arg]) -> Result<Option<String>> {
        const F: &str = "GetDecalTexture";
        self.with_decal(args, F, |decals, idx| decals.decal_texture(idx))
    }

    /// `GetDecalAlpha(idx)`
    pub fn get_decal_alpha(&self, args: &[Arg]) -> Result<Option<f32>> {
        const F: &str = "GetDecalAlpha";
        self.with_decal(args, F, |decals, idx| decals.decal_alpha(idx))
    }

    /// `GetDecalOwner(idx)`
    pub fn get_decal_owner(&self, args: &[Arg]) -> Result<Option<UnitId>> {
        const F: &str = "GetDecalOwner";
        let world = self.world;
        self.with_decal(args, F, |decals, idx| decals.decal_owner(world, idx))
    }

    /// `GetDecalType(idx)`
    pub fn get_decal_type(&self, args: &[Arg]) -> Result<Option<&'static str>> {
        const F: &str = "GetDecalType";
        self.with_decal(args, F, |decals, idx| decals.decal_type(idx))
    }

    // Argument errors take precedence over backend errors.
    fn with_decal<T>(
        &self,
        args: &[Arg],
        function: &'static str,
        query: impl FnOnce(&DecalBackend, u32) -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        let idx = logged(function, args::check_int(args, function, 1))?;
        let result = match u32::try_from(idx) {
            Ok(idx) => query(self.decals, idx),
            // no decal has a negative index, but the backend must still support the call
            Err(_) => self.decals.all_decals().map(|_| None),
        };
        logged(function, result)
    }
}

// ===== HELPERS =====

/// Log a failed call before handing the error back.
fn logged<T>(function: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        crate::view_error!(SOURCE, "{}() failed: {}", function, err);
    }
    result
}

fn check_vec3(args: &[Arg], function: &'static str, first: usize) -> Result<Vec3> {
    Ok(Vec3::new(
        args::check_float(args, function, first)?,
        args::check_float(args, function, first + 1)?,
        args::check_float(args, function, first + 2)?,
    ))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Unit id argument; ids outside the id range resolve to nothing.
fn unit_id(args: &[Arg], function: &'static str) -> Result<Option<UnitId>> {
    let raw = logged(function, args::check_int(args, function, 1))?;
    Ok(u32::try_from(raw).ok().map(UnitId))
}

fn feature_id(args: &[Arg], function: &'static str) -> Result<Option<FeatureId>> {
    let raw = logged(function, args::check_int(args, function, 1))?;
    Ok(u32::try_from(raw).ok().map(FeatureId))
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
