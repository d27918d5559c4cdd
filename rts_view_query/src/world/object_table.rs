/// ObjectTable - arena of one object variant.
///
/// Objects live in a `SlotMap`; quads refer to them by key. A side map
/// resolves the script-visible id to the key.

use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use super::object::WorldObject;

/// Arena of objects of one variant, addressable by key or by id.
pub struct ObjectTable<K: Key, T: WorldObject> {
    objects: SlotMap<K, T>,
    ids: FxHashMap<T::Id, K>,
}

impl<K: Key, T: WorldObject> ObjectTable<K, T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            ids: FxHashMap::default(),
        }
    }

    /// Insert an object. Returns `None` if its id is already taken.
    pub fn insert(&mut self, object: T) -> Option<K> {
        let id = object.id();
        if self.ids.contains_key(&id) {
            return None;
        }
        let key = self.objects.insert(object);
        self.ids.insert(id, key);
        Some(key)
    }

    /// Remove an object by key.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let object = self.objects.remove(key)?;
        self.ids.remove(&object.id());
        Some(object)
    }

    /// Object by key.
    pub fn get(&self, key: K) -> Option<&T> {
        self.objects.get(key)
    }

    /// Mutable object by key.
    ///
    /// Changing the id through this reference breaks id lookup; the
    /// simulation only mutates positions and flags.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.objects.get_mut(key)
    }

    /// Key for a script-visible id.
    pub fn key_of(&self, id: T::Id) -> Option<K> {
        self.ids.get(&id).copied()
    }

    /// Object for a script-visible id.
    pub fn by_id(&self, id: T::Id) -> Option<&T> {
        self.key_of(id).and_then(|key| self.objects.get(key))
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.objects.contains_key(key)
    }

    /// Iterate over all objects (arena order).
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<K: Key, T: WorldObject> Default for ObjectTable<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
