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

//! Ready-made game objects.
//!
//! These are plain data holders with a transform node. Drawing them is left to
//! whatever [`Renderer`](tessera_scene::Renderer) the scene uses, which can
//! downcast to the concrete types.

use std::rc::Rc;
use tessera_core::event::{EventListener, EventListenerList};
use tessera_core::{Node, Transform};
use tessera_scene::{Behaviour, GameObject};

/// A positioned object with empty behaviour hooks.
#[derive(Debug, Default)]
pub struct SimpleObject {
    node: Rc<Node>,
}

impl SimpleObject {
    /// Creates an object at the given local position.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            node: Node::shared(x, y),
        }
    }

    /// The object's transform node, shareable as a parent for other transforms.
    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }
}

impl Behaviour for SimpleObject {}

impl GameObject for SimpleObject {
    fn transform(&self) -> Option<&dyn Transform> {
        Some(&*self.node)
    }

    fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
        Some(self)
    }
}

/// A pushable button.
#[derive(Debug, Default)]
pub struct Button {
    node: Rc<Node>,
    /// Notified every time the button is pushed.
    pub on_push: EventListenerList<()>,
}

impl Button {
    /// Creates a button at the given local position.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            node: Node::shared(x, y),
            on_push: EventListenerList::new(),
        }
    }

    /// The button's transform node.
    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }

    /// Pushes the button, notifying every `on_push` listener.
    pub fn push(&self) {
        self.on_push.notify(&());
    }
}

impl GameObject for Button {
    fn transform(&self) -> Option<&dyn Transform> {
        Some(&*self.node)
    }

    fn label(&self) -> &str {
        "Button"
    }
}

/// A text label.
#[derive(Debug, Default)]
pub struct Text {
    node: Rc<Node>,
    /// The string to display.
    pub text: String,
}

impl Text {
    /// Creates a label at the given local position.
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        Self {
            node: Node::shared(x, y),
            text: text.into(),
        }
    }

    /// The label's transform node.
    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }
}

impl GameObject for Text {
    fn transform(&self) -> Option<&dyn Transform> {
        Some(&*self.node)
    }

    fn label(&self) -> &str {
        "Text"
    }
}
