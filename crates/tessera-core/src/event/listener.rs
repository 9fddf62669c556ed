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

use std::fmt;

/// Receives notifications about an event of type `E`.
///
/// Any `Fn(&E)` closure is a listener, so most callers never implement this
/// trait by hand. Listeners take `&self`; a listener that needs to mutate
/// state should capture a `Cell`/`RefCell`.
pub trait EventListener<E: ?Sized> {
    /// Tells the listener that the event happened.
    fn notify(&self, event: &E);
}

impl<E: ?Sized, F: Fn(&E)> EventListener<E> for F {
    fn notify(&self, event: &E) {
        self(event)
    }
}

/// An ordered collection of listeners that is itself a listener.
///
/// Notifying the list notifies every registered listener in registration order.
/// An empty list is a valid no-op.
pub struct EventListenerList<E: ?Sized> {
    listeners: Vec<Box<dyn EventListener<E>>>,
}

impl<E: ?Sized> EventListenerList<E> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Appends a listener. It will be called after every listener added before it.
    pub fn add(&mut self, listener: impl EventListener<E> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<E: ?Sized> EventListener<E> for EventListenerList<E> {
    fn notify(&self, event: &E) {
        for listener in &self.listeners {
            listener.notify(event);
        }
    }
}

impl<E: ?Sized> Default for EventListenerList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for EventListenerList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerList")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
