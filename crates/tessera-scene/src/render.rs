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

//! Contracts for drawing a scene, plus the simple implementations the engine ships.
//!
//! Pixel output is entirely up to the [`Renderer`] implementation; the scene
//! only tells it which object to draw and through which [`Camera`].

use crate::object::GameObject;
use std::rc::Rc;
use tessera_core::math::Rectangle;
use tessera_core::{Node, ObjectId, Transform};

/// Projects world-space rectangles into view space.
pub trait Camera {
    /// Maps `rect` into view coordinates.
    ///
    /// Returns `None` when the rectangle is entirely outside the view or fails
    /// the mapping's validity checks. Partially visible rectangles are clipped.
    fn map(&self, rect: Rectangle) -> Option<Rectangle>;
}

/// Draws game objects.
pub trait Renderer {
    /// Draws one object using the given camera (the scene's main camera, if set).
    fn render(&mut self, camera: Option<&dyn Camera>, id: ObjectId, object: &dyn GameObject);
}

/// Fans every render call out to several renderers, in insertion order.
#[derive(Default)]
pub struct MultiRenderer {
    renderers: Vec<Box<dyn Renderer>>,
}

impl MultiRenderer {
    /// Creates an empty fan-out renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a renderer.
    pub fn push(&mut self, renderer: impl Renderer + 'static) {
        self.renderers.push(Box::new(renderer));
    }

    /// Returns the number of wrapped renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Returns `true` if no renderer is wrapped.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Renderer for MultiRenderer {
    fn render(&mut self, camera: Option<&dyn Camera>, id: ObjectId, object: &dyn GameObject) {
        for renderer in &mut self.renderers {
            renderer.render(camera, id, object);
        }
    }
}

/// A camera with a position in the transform hierarchy and a fixed view size.
#[derive(Debug)]
pub struct SimpleCamera {
    node: Rc<Node>,
    width: i32,
    height: i32,
}

impl SimpleCamera {
    /// Creates a camera at the origin with a `width` x `height` view.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            node: Rc::new(Node::default()),
            width,
            height,
        }
    }

    /// The camera's transform node. Move it (or parent it) to scroll the view.
    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }

    /// Returns the view width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the view height.
    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Camera for SimpleCamera {
    fn map(&self, rect: Rectangle) -> Option<Rectangle> {
        let cam = self.node.position();

        let to = Rectangle {
            x0: (rect.x0 - cam.x).max(0),
            y0: (rect.y0 - cam.y).max(0),
            x1: (rect.x1 - cam.x).min(self.width),
            y1: (rect.y1 - cam.y).min(self.height),
        };

        let x_ok = to.x0 <= to.x1
            && to.x0 >= 0
            && to.x0 < cam.x + self.width
            && to.width() <= self.width;
        let y_ok = to.y0 <= to.y1
            && to.y0 >= 0
            && to.y0 < cam.y + self.height
            && to.height() <= self.height;

        (x_ok && y_ok).then_some(to)
    }
}
