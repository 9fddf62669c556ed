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

//! The game object capability model.
//!
//! A [`GameObject`] has no required shape. Every optional capability
//! ([`Transform`], [`Behaviour`], [`Collider`]) is queried at runtime through
//! a method that returns `None` by default, so a type only opts into what it
//! supports.

use crate::collider::Collider;
use crate::scene::Scene;
use std::any::Any;
use tessera_core::{ObjectId, Transform};

/// Type-erasure helper giving every game object access to `Any`.
///
/// Implemented automatically for every `'static` type.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Any entity that can live in a [`Scene`].
pub trait GameObject: AsAny {
    /// Returns the object's position in the hierarchy, if it has one.
    fn transform(&self) -> Option<&dyn Transform> {
        None
    }

    /// Returns the object's lifecycle hooks, if it has any.
    fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
        None
    }

    /// Returns the object's collider for read-only queries.
    ///
    /// Implement together with [`GameObject::collider_mut`], returning the same
    /// collider from both. Objects for which both return `Some` when added are
    /// registered for the collision sweep; an object exposing only one of them
    /// is not registered and a warning is logged.
    fn collider(&self) -> Option<&dyn Collider> {
        None
    }

    /// Returns the object's collider for the collision sweep.
    ///
    /// See [`GameObject::collider`].
    fn collider_mut(&mut self) -> Option<&mut dyn Collider> {
        None
    }

    /// A human-readable label used in logs.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<'a> dyn GameObject + 'a {
    /// Returns the object as `&T` if it is of that concrete type.
    pub fn downcast_ref<T: GameObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns the object as `&mut T` if it is of that concrete type.
    pub fn downcast_mut<T: GameObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Per-object lifecycle hooks driven by the scene.
///
/// Each hook receives the scene and the object's own id. While a hook runs the
/// object is checked out of the scene, so `scene.get(id)` returns `None` for it.
pub trait Behaviour {
    /// Called once when the scene starts.
    fn start(&mut self, _scene: &mut Scene, _id: ObjectId) {}

    /// Called every frame after compaction and the collision sweep.
    fn update(&mut self, _scene: &mut Scene, _id: ObjectId) {}

    /// Called synchronously when the object is removed from the scene.
    fn on_destroy(&mut self, _scene: &mut Scene, _id: ObjectId) {}
}
