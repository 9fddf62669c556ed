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

//! # Tessera Scene
//!
//! The game object capability model and the [`Scene`] that drives objects
//! through compaction, collision, update and render, one frame at a time.

#![warn(missing_docs)]

pub mod collider;
pub mod input;
pub mod object;
pub mod render;
pub mod scene;
mod store;

pub use collider::{BoxCollider, Collider, CollisionEvent};
pub use input::{InputCode, InputState};
pub use object::{AsAny, Behaviour, GameObject};
pub use render::{Camera, MultiRenderer, Renderer, SimpleCamera};
pub use scene::Scene;
