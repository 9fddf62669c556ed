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

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tessera_sdk::prelude::*;

type Journal = Rc<RefCell<Vec<String>>>;

/// Counts its own updates and asks for the next scene after `switch_after` of them.
struct Ticker {
    journal: Journal,
    updates: u32,
    switch_after: Option<(u32, usize)>,
}

impl GameObject for Ticker {
    fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
        Some(self)
    }
}

impl Behaviour for Ticker {
    fn start(&mut self, _scene: &mut Scene, _id: ObjectId) {
        self.journal.borrow_mut().push("start".into());
    }

    fn update(&mut self, scene: &mut Scene, _id: ObjectId) {
        self.updates += 1;
        self.journal.borrow_mut().push(format!("update {}", self.updates));
        if let Some((after, next)) = self.switch_after {
            if self.updates == after {
                scene.request_scene_change(next);
            }
        }
    }
}

struct CountingRenderer {
    journal: Journal,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _camera: Option<&dyn Camera>, id: ObjectId, _object: &dyn GameObject) {
        self.journal.borrow_mut().push(format!("render {id}"));
    }
}

fn record(game: &mut Game, journal: &Journal) {
    let events = &mut game.events;
    let lists = [
        (&mut events.before_start, "before_start"),
        (&mut events.after_start, "after_start"),
        (&mut events.before_update, "before_update"),
        (&mut events.after_update, "after_update"),
        (&mut events.before_render, "before_render"),
        (&mut events.after_render, "after_render"),
        (&mut events.on_change_scene, "change_scene"),
    ];
    for (list, name) in lists {
        let journal = journal.clone();
        list.add(move |_: &Scene| journal.borrow_mut().push(name.to_string()));
    }
}

#[test]
fn test_phase_order_of_one_frame() {
    let journal = Journal::default();
    let scene_journal = journal.clone();

    let mut game = Game::new(0).with_scene(move || {
        let mut scene = Scene::new().with_renderer(CountingRenderer {
            journal: scene_journal.clone(),
        });
        scene.add(Ticker {
            journal: scene_journal.clone(),
            updates: 0,
            switch_after: None,
        });
        scene
    });
    record(&mut game, &journal);

    game.run_frames(1).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec![
            "change_scene",
            "before_start",
            "start",
            "after_start",
            "before_update",
            "update 1",
            "after_update",
            "before_render",
            "render #0v0",
            "after_render",
        ]
    );
}

#[test]
fn test_requested_scene_change_applies_after_render() {
    let journal = Journal::default();

    let mut game = Game::new(0);
    for (index, name) in ["title", "stage"].into_iter().enumerate() {
        let journal = journal.clone();
        game.add_scene(move || {
            journal.borrow_mut().push(format!("create {name}"));
            let mut scene = Scene::new();
            scene.add(Ticker {
                journal: journal.clone(),
                updates: 0,
                switch_after: (index == 0).then_some((2, 1)),
            });
            scene
        });
    }

    game.run_frames(3).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec![
            "create title",
            "start",
            "update 1",
            "update 2",
            "create stage",
            "start",
            "update 1",
        ]
    );
    assert_eq!(game.current_index(), 1);
}

#[test]
fn test_requested_scene_starts_with_start_events() {
    let journal = Journal::default();

    let mut game = Game::new(0);
    for (index, name) in ["title", "stage"].into_iter().enumerate() {
        let journal = journal.clone();
        game.add_scene(move || {
            journal.borrow_mut().push(format!("create {name}"));
            let mut scene = Scene::new();
            scene.add(Ticker {
                journal: journal.clone(),
                updates: 0,
                switch_after: (index == 0).then_some((1, 1)),
            });
            scene
        });
    }
    record(&mut game, &journal);

    game.run_frames(1).unwrap();

    let journal = journal.borrow();
    assert_eq!(
        journal[journal.len() - 10..],
        [
            "before_update",
            "update 1",
            "after_update",
            "before_render",
            "after_render",
            "create stage",
            "change_scene",
            "before_start",
            "start",
            "after_start",
        ]
    );
}

#[test]
fn test_input_from_another_thread() {
    let mut game = Game::new(0).with_scene(Scene::new);
    game.begin().unwrap();

    let input = game.scene().unwrap().input_handle();
    std::thread::spawn(move || input.set(42)).join().unwrap();

    game.frame();
    assert!(game.scene().unwrap().input(42));
}

#[test]
fn test_frames_are_paced() {
    let mut game = Game::new(100).with_scene(Scene::new);

    let started = Instant::now();
    game.run_frames(3).unwrap();

    // Three frames of 10 ms each, minus scheduling slack.
    assert!(started.elapsed() >= Duration::from_millis(25));
}
