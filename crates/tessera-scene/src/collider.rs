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

//! Overlap detection between game objects.
//!
//! The scene sweeps every pair of registered colliders once per frame and asks
//! the first one to [`Collider::collide`] with the second. Only the receiving
//! collider's state changes and only its listeners fire.

use std::fmt;
use std::rc::Rc;
use tessera_core::event::{EventListener, EventListenerList};
use tessera_core::math::{Point, Rectangle};
use tessera_core::{transform_ref, ObjectId, Transform, TransformRef};

/// Payload of collision enter/exit notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    /// The scene object on the other side of the transition.
    pub other: ObjectId,
}

/// The capability of taking part in the collision sweep.
pub trait Collider {
    /// Tests this collider against `other` and fires transition events on this
    /// collider's listeners.
    ///
    /// `other_id` is the scene id of the object owning `other`. Without it
    /// (the collider is not a registered scene object) the call is a no-op.
    fn collide(&mut self, other: &dyn Collider, other_id: Option<ObjectId>);

    /// Returns the axis-aligned bounds if this is a box-shaped collider.
    ///
    /// Box colliders ignore every collider that returns `None` here.
    fn bounds(&self) -> Option<Rectangle> {
        None
    }
}

/// An axis-aligned rectangular collider. Scale and rotation are not considered.
///
/// The collider keeps a single "currently colliding" latch rather than one per
/// partner: `on_enter` fires when the latch goes from clear to set, `on_exit`
/// when it goes from set to clear. With several partners, the latch reflects
/// whichever pair was tested last.
pub struct BoxCollider {
    has_collided: bool,
    transform: Option<TransformRef>,
    /// Width of the collision area.
    pub width: i32,
    /// Height of the collision area.
    pub height: i32,
    /// Notified when another object starts overlapping this collider.
    pub on_enter: EventListenerList<CollisionEvent>,
    /// Notified when the overlap ends.
    pub on_exit: EventListenerList<CollisionEvent>,
}

impl BoxCollider {
    /// Creates a collider that follows `transform`, or sits at the origin without one.
    pub fn new(transform: Option<TransformRef>, width: i32, height: i32) -> Self {
        Self {
            has_collided: false,
            transform,
            width,
            height,
            on_enter: EventListenerList::new(),
            on_exit: EventListenerList::new(),
        }
    }

    /// Creates a collider following a shared transform without owning it.
    pub fn attached<T: Transform + 'static>(transform: &Rc<T>, width: i32, height: i32) -> Self {
        Self::new(Some(transform_ref(transform)), width, height)
    }

    /// Rebinds the transform the collider follows.
    pub fn set_transform(&mut self, transform: Option<TransformRef>) {
        self.transform = transform;
    }

    /// Returns `true` while the latch is set.
    pub fn is_colliding(&self) -> bool {
        self.has_collided
    }

    /// The collision rectangle at the transform's current absolute position.
    pub fn box_bounds(&self) -> Rectangle {
        let origin = self
            .transform
            .as_ref()
            .and_then(|t| t.upgrade())
            .map(|t| t.position())
            .unwrap_or(Point::ZERO);
        Rectangle::from_origin_size(origin.x, origin.y, self.width, self.height)
    }
}

impl Collider for BoxCollider {
    fn collide(&mut self, other: &dyn Collider, other_id: Option<ObjectId>) {
        let Some(other_bounds) = other.bounds() else {
            return;
        };
        let Some(other) = other_id else {
            return;
        };

        if self.box_bounds().overlaps(&other_bounds) {
            if !self.has_collided {
                self.has_collided = true;
                log::trace!("Collision enter with {other}");
                self.on_enter.notify(&CollisionEvent { other });
            }
        } else if self.has_collided {
            self.has_collided = false;
            log::trace!("Collision exit with {other}");
            self.on_exit.notify(&CollisionEvent { other });
        }
    }

    fn bounds(&self) -> Option<Rectangle> {
        Some(self.box_bounds())
    }
}

impl fmt::Debug for BoxCollider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxCollider")
            .field("bounds", &self.box_bounds())
            .field("has_collided", &self.has_collided)
            .finish()
    }
}
