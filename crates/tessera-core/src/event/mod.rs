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

//! Provides foundational primitives for event-driven communication.
//!
//! Scenes, colliders and the game loop never call game-specific code directly.
//! They broadcast through [`EventListenerList`]s that game code fills with
//! [`EventListener`]s, usually plain closures.
//!
//! Listeners are generic over the event payload, which keeps `tessera-core`
//! decoupled from the concrete event types defined in higher-level crates.

mod listener;

pub use self::listener::{EventListener, EventListenerList};
