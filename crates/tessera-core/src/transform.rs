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

//! Positional nodes arranged in a parent-relative hierarchy.
//!
//! A [`Transform`] reports an absolute position computed from its local
//! offset plus its parent's absolute position. Parents are held through a
//! [`TransformRef`] (a `Weak`), so linking a child never keeps the parent
//! alive. A parent that has been dropped reads as "no parent".
//!
//! The hierarchy is not checked for cycles. Keeping parent chains acyclic is
//! the caller's responsibility; a cycle recurses without bound.

use crate::math::Point;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// A non-owning reference to a transform, used for parent links and colliders.
pub type TransformRef = Weak<dyn Transform>;

/// The capability of having a position in a parent-relative hierarchy.
pub trait Transform {
    /// Returns the parent transform, if it is set and still alive.
    fn parent(&self) -> Option<Rc<dyn Transform>>;

    /// Returns the offset relative to the parent (or to the world origin).
    fn local_position(&self) -> Point;

    /// Returns the absolute position: the local offset plus the parent's
    /// absolute position, or the local offset alone without a parent.
    fn position(&self) -> Point {
        let local = self.local_position();
        match self.parent() {
            Some(parent) => local + parent.position(),
            None => local,
        }
    }
}

/// Downgrades a shared transform into a [`TransformRef`].
pub fn transform_ref<T: Transform + 'static>(transform: &Rc<T>) -> TransformRef {
    let weak: Weak<T> = Rc::downgrade(transform);
    weak
}

/// The standard [`Transform`] implementation.
///
/// Nodes are meant to be shared through `Rc<Node>` between a game object,
/// its collider and any children, so mutation goes through `&self`.
#[derive(Default)]
pub struct Node {
    local: Cell<Point>,
    parent: RefCell<Option<TransformRef>>,
}

impl Node {
    /// Creates a root node at the given local offset.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            local: Cell::new(Point::new(x, y)),
            parent: RefCell::new(None),
        }
    }

    /// Creates a shared root node at the given local offset.
    pub fn shared(x: i32, y: i32) -> Rc<Self> {
        Rc::new(Self::new(x, y))
    }

    /// Returns the local offset.
    pub fn local(&self) -> Point {
        self.local.get()
    }

    /// Replaces the local offset.
    pub fn set_local(&self, local: Point) {
        self.local.set(local);
    }

    /// Moves the node by `delta` relative to its current local offset.
    pub fn translate(&self, delta: Point) {
        self.local.set(self.local.get() + delta);
    }

    /// Rebinds the parent link. Ownership of either side is unaffected.
    pub fn set_parent(&self, parent: Option<TransformRef>) {
        *self.parent.borrow_mut() = parent;
    }
}

impl Transform for Node {
    fn parent(&self) -> Option<Rc<dyn Transform>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn local_position(&self) -> Point {
        self.local.get()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("local", &self.local.get())
            .field("has_parent", &self.parent().is_some())
            .finish()
    }
}
