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

// Tessera Sandbox
// Pushes a crate into a wall with simulated input and logs what the renderer sees.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tessera_sdk::prelude::*;

const KEY_RIGHT: InputCode = 1;
const KEY_LEFT: InputCode = 2;
const FRAMES: u64 = 240;

/// A crate moved by the arrow keys.
struct Player {
    node: Rc<Node>,
    collider: BoxCollider,
    reset_button: Option<ObjectId>,
}

impl GameObject for Player {
    fn transform(&self) -> Option<&dyn Transform> {
        Some(&*self.node)
    }

    fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
        Some(self)
    }

    fn collider(&self) -> Option<&dyn Collider> {
        Some(&self.collider)
    }

    fn collider_mut(&mut self) -> Option<&mut dyn Collider> {
        Some(&mut self.collider)
    }

    fn label(&self) -> &str {
        "Player"
    }
}

impl Behaviour for Player {
    fn start(&mut self, _scene: &mut Scene, id: ObjectId) {
        log::info!("Player {id} spawned at {:?}", self.node.position());
    }

    fn update(&mut self, scene: &mut Scene, _id: ObjectId) {
        if scene.input(KEY_RIGHT) {
            self.node.translate(Point::new(2, 0));
        }
        if scene.input(KEY_LEFT) {
            self.node.translate(Point::new(-2, 0));
        }

        if self.collider.is_colliding() {
            if let Some(button) = self.reset_button.and_then(|id| scene.get_as::<Button>(id)) {
                button.push();
            }
        }
    }
}

/// An immovable crate.
struct Wall {
    node: Rc<Node>,
    collider: BoxCollider,
}

impl GameObject for Wall {
    fn transform(&self) -> Option<&dyn Transform> {
        Some(&*self.node)
    }

    fn collider(&self) -> Option<&dyn Collider> {
        Some(&self.collider)
    }

    fn collider_mut(&mut self) -> Option<&mut dyn Collider> {
        Some(&mut self.collider)
    }

    fn label(&self) -> &str {
        "Wall"
    }
}

/// Keeps the score label in sync with the bump counter.
struct Scoreboard {
    text: ObjectId,
    bumps: Rc<Cell<u32>>,
}

impl GameObject for Scoreboard {
    fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
        Some(self)
    }
}

impl Behaviour for Scoreboard {
    fn update(&mut self, scene: &mut Scene, _id: ObjectId) {
        if let Some(text) = scene.get_as_mut::<Text>(self.text) {
            text.text = format!("Bumps: {}", self.bumps.get());
        }
    }

    fn on_destroy(&mut self, _scene: &mut Scene, id: ObjectId) {
        log::info!("Scoreboard {id} destroyed");
    }
}

/// Logs every visible object instead of drawing it.
struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, camera: Option<&dyn Camera>, id: ObjectId, object: &dyn GameObject) {
        let Some(transform) = object.transform() else {
            return;
        };
        let position = transform.position();
        let world = object
            .collider()
            .and_then(|c| c.bounds())
            .unwrap_or_else(|| Rectangle::from_origin_size(position.x, position.y, 1, 1));

        let view = match camera {
            Some(camera) => camera.map(world),
            None => Some(world),
        };

        match (view, object.downcast_ref::<Text>()) {
            (Some(view), Some(text)) => log::debug!("{id} \"{}\" at {view:?}", text.text),
            (Some(view), None) => log::debug!("{id} {} at {view:?}", object.label()),
            (None, _) => log::debug!("{id} {} is off screen", object.label()),
        }
    }
}

fn build_stage() -> Scene {
    let mut scene = Scene::new()
        .with_camera(SimpleCamera::new(320, 240))
        .with_renderer(LogRenderer);

    let bumps = Rc::new(Cell::new(0));

    let mut reset = Button::new(300, 10);
    let player_node = Node::shared(10, 100);
    let home = player_node.clone();
    reset.on_push.add(move |_: &()| home.set_local(Point::new(10, 100)));
    let reset = scene.add(reset);

    let mut collider = BoxCollider::attached(&player_node, 16, 16);
    let counter = bumps.clone();
    collider.on_enter.add(move |e: &CollisionEvent| {
        counter.set(counter.get() + 1);
        log::info!("Player bumped into {}", e.other);
    });
    collider
        .on_exit
        .add(|e: &CollisionEvent| log::info!("Player left {}", e.other));
    scene.add(Player {
        node: player_node,
        collider,
        reset_button: Some(reset),
    });

    let wall_node = Node::shared(200, 90);
    let collider = BoxCollider::attached(&wall_node, 20, 40);
    scene.add(Wall {
        node: wall_node,
        collider,
    });

    let label = scene.add(Text::new(10, 10, "Bumps: 0"));
    scene.add(Scoreboard { text: label, bumps });
    scene
}

fn main() -> Result<()> {
    tessera_sdk::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut game = Game::with_config(config)?.with_scene(build_stage);
    game.events
        .after_start
        .add(|scene: &Scene| log::info!("Stage ready with {} objects", scene.len()));

    game.begin()?;
    let input = game
        .scene()
        .map(|scene| scene.input_handle())
        .ok_or_else(|| anyhow::anyhow!("The stage scene was not created"))?;

    // Holds the right arrow for two seconds, then the left one.
    let producer = thread::spawn(move || {
        input.set(KEY_RIGHT);
        thread::sleep(Duration::from_secs(2));
        input.unset(KEY_RIGHT);
        input.set(KEY_LEFT);
    });

    for _ in 0..FRAMES {
        game.frame();
    }
    if producer.join().is_err() {
        log::warn!("Input thread panicked");
    }

    if let Some(scene) = game.scene() {
        log::info!("Final scene state: {scene:?}");
    }
    Ok(())
}
