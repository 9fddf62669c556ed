// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Internal object storage and id management.

use crate::object::GameObject;
use tessera_core::ObjectId;

/// The state of one arena slot.
enum Slot {
    /// No object; the slot's index sits in the free list.
    Vacant,
    /// The object is stored here.
    Occupied(Box<dyn GameObject>),
    /// The object is temporarily lent out while one of its hooks runs.
    CheckedOut,
}

/// Internal arena of game objects addressed by generational [`ObjectId`]s.
///
/// The `ObjectStore` maintains a dense list of slots. Releasing a slot bumps its
/// generation immediately, so every id issued for the old occupant stops
/// resolving before the index is recycled through the free list.
pub(crate) struct ObjectStore {
    /// Every slot ever created, paired with the id its current (or next) occupant uses.
    entries: Vec<(ObjectId, Slot)>,
    /// Indices available for reuse.
    freed: Vec<u32>,
}

impl ObjectStore {
    /// Creates a new, empty `ObjectStore`.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            freed: Vec::new(),
        }
    }

    /// Stores an object in a recycled or fresh slot and returns its id.
    pub fn insert(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        if let Some(index) = self.freed.pop() {
            let (id, slot) = &mut self.entries[index as usize];
            *slot = Slot::Occupied(object);
            *id
        } else {
            let id = ObjectId::new(self.entries.len() as u32, 0);
            self.entries.push((id, Slot::Occupied(object)));
            id
        }
    }

    /// Returns `true` if `id` names a stored or checked-out object.
    pub fn contains(&self, id: ObjectId) -> bool {
        matches!(
            self.entries.get(id.index as usize),
            Some((slot_id, Slot::Occupied(_) | Slot::CheckedOut)) if *slot_id == id
        )
    }

    /// Returns the object if it is stored (not checked out) under `id`.
    pub fn get(&self, id: ObjectId) -> Option<&dyn GameObject> {
        match self.entries.get(id.index as usize) {
            Some((slot_id, Slot::Occupied(object))) if *slot_id == id => Some(&**object),
            _ => None,
        }
    }

    /// Returns the object mutably if it is stored (not checked out) under `id`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn GameObject + 'static)> {
        match self.entries.get_mut(id.index as usize) {
            Some((slot_id, Slot::Occupied(object))) if *slot_id == id => Some(&mut **object),
            _ => None,
        }
    }

    /// Lends the object out of its slot, leaving a `CheckedOut` marker.
    pub fn check_out(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        let (slot_id, slot) = self.entries.get_mut(id.index as usize)?;
        if *slot_id != id || !matches!(slot, Slot::Occupied(_)) {
            return None;
        }
        match std::mem::replace(slot, Slot::CheckedOut) {
            Slot::Occupied(object) => Some(object),
            _ => None,
        }
    }

    /// Returns a checked-out object to its slot.
    ///
    /// If the slot was released in the meantime the object is dropped.
    pub fn check_in(&mut self, id: ObjectId, object: Box<dyn GameObject>) {
        match self.entries.get_mut(id.index as usize) {
            Some((slot_id, slot @ Slot::CheckedOut)) if *slot_id == id => {
                *slot = Slot::Occupied(object);
            }
            _ => {
                log::warn!("Object {id} was released while checked out; dropping it.");
            }
        }
    }

    /// Drops the object stored under `id` and recycles its slot.
    ///
    /// Returns `false` if `id` is stale.
    pub fn release(&mut self, id: ObjectId) -> bool {
        let Some((slot_id, slot)) = self.entries.get_mut(id.index as usize) else {
            return false;
        };
        if *slot_id != id || matches!(slot, Slot::Vacant) {
            return false;
        }
        *slot = Slot::Vacant;
        slot_id.generation += 1;
        self.freed.push(id.index);
        true
    }

    /// Returns the number of slots holding an object (stored or checked out).
    pub fn len(&self) -> usize {
        self.entries.len() - self.freed.len()
    }
}
