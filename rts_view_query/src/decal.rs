/// Ground decal introspection.
///
/// Only the GL4 decal backend keeps decals in a form that can be queried.
/// The backend is a tagged enum; asking the legacy backend anything is an
/// `Error::Unsupported`, while an unknown index on GL4 is simply `None`.

use glam::{Vec2, Vec3};
use crate::error::{Error, Result};
use crate::world::{UnitId, World};

/// Origin of a decal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecalKind {
    Explosion,
    Building,
    Lua,
    #[default]
    Unknown,
}

impl DecalKind {
    pub fn name(&self) -> &'static str {
        match self {
            DecalKind::Explosion => "explosion",
            DecalKind::Building => "building",
            DecalKind::Lua => "lua",
            DecalKind::Unknown => "unknown",
        }
    }
}

/// One ground decal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decal {
    /// Slot index (assigned by the store)
    pub idx: u32,
    pub pos: Vec3,
    /// Footprint on the ground; a zero size marks a free slot
    pub size: Vec2,
    /// Rotation around the up axis, in radians
    pub rot: f32,
    pub texture: String,
    pub alpha: f32,
    /// Unit that created the decal (building decals)
    pub owner: Option<UnitId>,
    pub kind: DecalKind,
}

impl Decal {
    pub fn new(pos: Vec3, size: Vec2, kind: DecalKind) -> Self {
        Self { pos, size, alpha: 1.0, kind, ..Self::default() }
    }

    pub fn is_valid(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }
}

/// Slot storage of the GL4 backend.
#[derive(Debug, Clone, Default)]
pub struct DecalStore {
    decals: Vec<Decal>,
}

impl DecalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decal in the first free slot. Returns its index.
    pub fn add(&mut self, mut decal: Decal) -> u32 {
        let slot = self.decals.iter().position(|d| !d.is_valid());
        let idx = slot.unwrap_or(self.decals.len());
        decal.idx = idx as u32;
        match slot {
            Some(i) => self.decals[i] = decal,
            None => self.decals.push(decal),
        }
        idx as u32
    }

    /// Free a slot. Returns false if it held no decal.
    pub fn free(&mut self, idx: u32) -> bool {
        match self.decals.get_mut(idx as usize) {
            Some(decal) if decal.is_valid() => {
                *decal = Decal { idx, ..Decal::default() };
                true
            }
            _ => false,
        }
    }

    /// Live decal at `idx`.
    pub fn get(&self, idx: u32) -> Option<&Decal> {
        self.decals.get(idx as usize).filter(|d| d.is_valid())
    }

    /// Indices of live decals, ascending.
    pub fn valid_indices(&self) -> Vec<u32> {
        self.decals.iter().filter(|d| d.is_valid()).map(|d| d.idx).collect()
    }
}

/// Active ground decal renderer.
#[derive(Debug, Clone)]
pub enum DecalBackend {
    /// Fixed-function renderer: no introspection
    Legacy,
    Gl4(DecalStore),
}

impl DecalBackend {
    fn store(&self) -> Result<&DecalStore> {
        match self {
            DecalBackend::Gl4(store) => Ok(store),
            DecalBackend::Legacy => Err(Error::Unsupported(
                "decal queries need the GL4 decal renderer".to_string(),
            )),
        }
    }

    fn decal(&self, idx: u32) -> Result<Option<&Decal>> {
        Ok(self.store()?.get(idx))
    }

    pub fn all_decals(&self) -> Result<Vec<u32>> {
        Ok(self.store()?.valid_indices())
    }

    pub fn decal_pos(&self, idx: u32) -> Result<Option<Vec3>> {
        Ok(self.decal(idx)?.map(|d| d.pos))
    }

    pub fn decal_size(&self, idx: u32) -> Result<Option<Vec2>> {
        Ok(self.decal(idx)?.map(|d| d.size))
    }

    pub fn decal_rotation(&self, idx: u32) -> Result<Option<f32>> {
        Ok(self.decal(idx)?.map(|d| d.rot))
    }

    pub fn decal_texture(&self, idx: u32) -> Result<Option<String>> {
        Ok(self.decal(idx)?.map(|d| d.texture.clone()))
    }

    pub fn decal_alpha(&self, idx: u32) -> Result<Option<f32>> {
        Ok(self.decal(idx)?.map(|d| d.alpha))
    }

    /// Owner id, if the owner is still alive.
    pub fn decal_owner(&self, world: &World, idx: u32) -> Result<Option<UnitId>> {
        Ok(self
            .decal(idx)?
            .and_then(|d| d.owner)
            .filter(|&id| world.units().by_id(id).is_some()))
    }

    pub fn decal_type(&self, idx: u32) -> Result<Option<&'static str>> {
        Ok(self.decal(idx)?.map(|d| d.kind.name()))
    }
}
