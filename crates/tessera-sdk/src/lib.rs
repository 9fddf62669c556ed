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

//! The public-facing Software Development Kit (SDK) for Tessera.
//! This crate provides the game loop and the ready-made pieces game developers
//! need to build and run a game.

#![warn(missing_docs)]

pub mod config;
pub mod game;
pub mod objects;
pub mod pacer;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameEvents, SceneFactory};
pub use objects::{Button, SimpleObject, Text};
pub use pacer::FramePacer;
pub use tessera_telemetry::{init_logging, init_logging_with};

/// Everything a typical game needs in one import.
pub mod prelude {
    pub use crate::{Button, Game, GameConfig, SceneFactory, SimpleObject, Text};
    pub use tessera_core::event::{EventListener, EventListenerList};
    pub use tessera_core::math::{Point, Rectangle};
    pub use tessera_core::{transform_ref, Node, ObjectId, Transform};
    pub use tessera_scene::{
        Behaviour, BoxCollider, Camera, Collider, CollisionEvent, GameObject, InputCode,
        InputState, MultiRenderer, Renderer, Scene, SimpleCamera,
    };
}
