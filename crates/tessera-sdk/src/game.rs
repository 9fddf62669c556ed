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

//! The game loop driver and scene switching.

use crate::config::{ConfigError, GameConfig};
use crate::pacer::FramePacer;
use anyhow::{bail, Result};
use std::fmt;
use std::time::Instant;
use tessera_core::event::{EventListener, EventListenerList};
use tessera_scene::Scene;
use tessera_telemetry::FrameTelemetry;

/// Builds a fresh scene on demand.
///
/// Any `Fn() -> Scene` closure is a factory.
pub trait SceneFactory {
    /// Creates a new scene instance.
    fn create(&self) -> Scene;
}

impl<F: Fn() -> Scene> SceneFactory for F {
    fn create(&self) -> Scene {
        self()
    }
}

/// Listeners notified around each phase of the game loop.
///
/// Every event carries the current scene. Phases without a scene (see
/// [`Game::change_scene`]) notify nobody.
#[derive(Debug, Default)]
pub struct GameEvents {
    /// After a scene change produced a new scene.
    pub on_change_scene: EventListenerList<Scene>,
    /// Before a scene started by the loop runs its start hooks.
    pub before_start: EventListenerList<Scene>,
    /// After a scene started by the loop ran its start hooks.
    pub after_start: EventListenerList<Scene>,
    /// Before every scene update.
    pub before_update: EventListenerList<Scene>,
    /// After every scene update.
    pub after_update: EventListenerList<Scene>,
    /// Before every scene render.
    pub before_render: EventListenerList<Scene>,
    /// After every scene render.
    pub after_render: EventListenerList<Scene>,
}

/// Drives scenes frame by frame at a target frame rate.
pub struct Game {
    /// Lifecycle listeners.
    pub events: GameEvents,
    factories: Vec<Box<dyn SceneFactory>>,
    current: usize,
    scene: Option<Scene>,
    config: GameConfig,
    pacer: FramePacer,
    telemetry: FrameTelemetry,
}

impl Game {
    /// Creates a game targeting `fps` frames per second, with no scene.
    ///
    /// An `fps` of zero runs the loop unpaced.
    pub fn new(fps: u32) -> Self {
        Self::from_config(GameConfig {
            fps,
            ..GameConfig::default()
        })
    }

    /// Creates a game from a configuration, rejecting invalid ones.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: GameConfig) -> Self {
        Self {
            events: GameEvents::default(),
            factories: Vec::new(),
            current: 0,
            scene: None,
            pacer: FramePacer::new(config.frame_budget(), config.max_catch_up_frames),
            telemetry: FrameTelemetry::new(config.frame_budget(), config.telemetry_interval()),
            config,
        }
    }

    /// Registers a scene factory and returns its index.
    pub fn add_scene(&mut self, factory: impl SceneFactory + 'static) -> usize {
        self.factories.push(Box::new(factory));
        self.factories.len() - 1
    }

    /// Builder-style [`Game::add_scene`].
    pub fn with_scene(mut self, factory: impl SceneFactory + 'static) -> Self {
        self.add_scene(factory);
        self
    }

    /// Returns the number of registered scene factories.
    pub fn scene_count(&self) -> usize {
        self.factories.len()
    }

    /// Returns the index of the current scene.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the configuration the game runs with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the current scene, creating it from its factory on first access.
    ///
    /// `None` when the current index is the one-past-the-end sentinel.
    pub fn scene(&mut self) -> Option<&mut Scene> {
        self.ensure_scene();
        self.scene.as_mut()
    }

    fn ensure_scene(&mut self) {
        if self.scene.is_none() {
            if let Some(factory) = self.factories.get(self.current) {
                self.scene = Some(factory.create());
            }
        }
    }

    /// Switches to scene `index`, discarding the current scene instance.
    ///
    /// An index past the end leaves everything unchanged and returns `None`.
    /// The index exactly one past the end is accepted and selects no scene.
    /// When a new scene is created, `on_change_scene` is notified with it.
    pub fn change_scene(&mut self, index: usize) -> Option<&mut Scene> {
        let count = self.factories.len();
        if index > count {
            log::warn!("Ignoring change to scene {index}: only {count} scene(s) registered");
            return None;
        }

        self.current = index;
        self.scene = None;
        self.ensure_scene();

        match self.scene.as_mut() {
            Some(scene) => {
                log::info!("Changed to scene {index}");
                self.events.on_change_scene.notify(scene);
                Some(scene)
            }
            None => {
                log::info!("Changed to scene {index}, which has no factory; no scene is active");
                None
            }
        }
    }

    /// Selects the initial scene and runs its start phase.
    ///
    /// Fails if no scene factory is registered.
    pub fn begin(&mut self) -> Result<()> {
        if self.change_scene(0).is_none() {
            bail!("Cannot start the game: no scene factory registered");
        }
        log::info!(
            "Starting game with {} scene(s) at {} fps",
            self.factories.len(),
            self.config.fps
        );

        self.start_scene();
        self.apply_requested_scene_change();

        self.telemetry.reset();
        self.pacer.start(Instant::now());
        Ok(())
    }

    /// Runs one iteration of the loop: update, render, scene change, pacing.
    pub fn frame(&mut self) {
        self.telemetry.begin_frame();
        self.ensure_scene();

        if let Some(scene) = self.scene.as_mut() {
            let events = &self.events;
            events.before_update.notify(scene);
            scene.update();
            events.after_update.notify(scene);

            events.before_render.notify(scene);
            scene.render();
            events.after_render.notify(scene);
        }
        self.apply_requested_scene_change();

        self.telemetry.end_frame();
        self.telemetry.tick();
        self.pacer.pace();
    }

    /// Starts the game and runs a bounded number of frames.
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        self.begin()?;
        for _ in 0..frames {
            self.frame();
        }
        Ok(())
    }

    /// Starts the game and runs frames until the process ends.
    ///
    /// Only returns if the game cannot start.
    pub fn start(&mut self) -> Result<()> {
        self.begin()?;
        loop {
            self.frame();
        }
    }

    /// Runs the current scene's start phase between the start broadcasts.
    fn start_scene(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            self.events.before_start.notify(scene);
            scene.start();
            self.events.after_start.notify(scene);
        }
    }

    /// Applies a change requested by the scene during the frame, starting the new scene.
    fn apply_requested_scene_change(&mut self) {
        let Some(index) = self.scene.as_mut().and_then(Scene::take_scene_change) else {
            return;
        };
        if self.change_scene(index).is_some() {
            self.start_scene();
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_config(GameConfig::default())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("scenes", &self.factories.len())
            .field("current", &self.current)
            .field("scene", &self.scene)
            .field("config", &self.config)
            .finish()
    }
}
