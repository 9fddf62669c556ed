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

//! The scene: live object set, deferred removal, collision sweep, update and render.

use crate::input::{InputCode, InputState};
use crate::object::GameObject;
use crate::render::{Camera, Renderer};
use crate::store::ObjectStore;
use std::collections::HashSet;
use std::fmt;
use tessera_core::ObjectId;

/// Which behaviour hook to run on a checked-out object.
#[derive(Debug, Clone, Copy)]
enum Hook {
    Start,
    Update,
    Destroy,
}

/// Owns a set of game objects and drives them through one frame at a time.
///
/// Objects are kept in insertion order, which is also the update and render
/// order. Removal is deferred: [`Scene::remove`] marks an object dead and fires
/// its destroy hook at once, but the object is only dropped by the compaction
/// step at the start of the next [`Scene::update`].
pub struct Scene {
    /// Camera handed to the renderer for every object.
    pub main_camera: Option<Box<dyn Camera>>,
    /// Renderer used by [`Scene::render`]. Rendering is skipped without one.
    pub renderer: Option<Box<dyn Renderer>>,
    store: ObjectStore,
    /// Live sequence in insertion order, including objects pending removal.
    objects: Vec<ObjectId>,
    /// The subset of `objects` registered for the collision sweep.
    colliders: Vec<ObjectId>,
    /// Objects removed since the last compaction.
    deleted: HashSet<ObjectId>,
    /// Objects removed while one of their own hooks was running.
    deferred_destroy: HashSet<ObjectId>,
    input: InputState,
    scene_change: Option<usize>,
}

impl Scene {
    /// Creates an empty scene without camera or renderer.
    pub fn new() -> Self {
        Self {
            main_camera: None,
            renderer: None,
            store: ObjectStore::new(),
            objects: Vec::new(),
            colliders: Vec::new(),
            deleted: HashSet::new(),
            deferred_destroy: HashSet::new(),
            input: InputState::new(),
            scene_change: None,
        }
    }

    /// Sets the main camera, builder style.
    pub fn with_camera(mut self, camera: impl Camera + 'static) -> Self {
        self.main_camera = Some(Box::new(camera));
        self
    }

    /// Sets the renderer, builder style.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Appends an object to the scene and returns its id.
    ///
    /// Objects exposing a collider through both [`GameObject::collider`] and
    /// [`GameObject::collider_mut`] at this point are registered for the
    /// collision sweep.
    pub fn add<T: GameObject>(&mut self, object: T) -> ObjectId {
        self.add_boxed(Box::new(object))
    }

    /// Appends an already boxed object. See [`Scene::add`].
    pub fn add_boxed(&mut self, mut object: Box<dyn GameObject>) -> ObjectId {
        let readable = object.collider().is_some();
        let writable = object.collider_mut().is_some();
        let collidable = readable && writable;
        let label = object.label().to_owned();
        if readable != writable {
            log::warn!(
                "{label} implements only one of collider()/collider_mut(); it takes no part in collisions"
            );
        }
        let id = self.store.insert(object);

        self.objects.push(id);
        if collidable {
            self.colliders.push(id);
        }
        log::debug!("Added {label} as {id} (collider: {collidable})");
        id
    }

    /// Marks an object dead and fires its destroy hook synchronously.
    ///
    /// The object stays in storage, excluded from every phase, until the next
    /// [`Scene::update`] compacts it away. Returns `false` (and does nothing)
    /// if `id` is not a live object of this scene.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.deleted.insert(id);
        log::debug!("Removed {id}");

        if self.store.get(id).is_some() {
            self.run_hook(id, Hook::Destroy);
        } else {
            // One of the object's own hooks is running.
            self.deferred_destroy.insert(id);
        }
        true
    }

    /// Runs the start hook of every live object, in sequence order.
    pub fn start(&mut self) {
        for id in self.objects.clone() {
            if !self.deleted.contains(&id) {
                self.run_hook(id, Hook::Start);
            }
        }
    }

    /// Advances the scene by one frame.
    ///
    /// Compacts pending removals, sweeps every ordered pair of colliders, then
    /// runs the update hook of every live object in sequence order. Objects
    /// added during this call are first updated on the next one.
    pub fn update(&mut self) {
        self.compact();
        self.sweep();

        for id in self.objects.clone() {
            if !self.deleted.contains(&id) {
                self.run_hook(id, Hook::Update);
            }
        }
    }

    /// Hands every live object to the renderer with the main camera.
    pub fn render(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let camera = self.main_camera.as_deref();

        for &id in &self.objects {
            if self.deleted.contains(&id) {
                continue;
            }
            if let Some(object) = self.store.get(id) {
                renderer.render(camera, id, object);
            }
        }
    }

    /// Physically drops every object removed since the last compaction.
    fn compact(&mut self) {
        if self.deleted.is_empty() {
            return;
        }

        let deleted = &self.deleted;
        self.objects.retain(|id| !deleted.contains(id));
        self.colliders.retain(|id| !deleted.contains(id));

        let count = self.deleted.len();
        for id in self.deleted.drain() {
            self.store.release(id);
        }
        log::debug!(
            "Compacted {count} object(s), {} remaining",
            self.objects.len()
        );
    }

    /// Tests every registered collider against every other one.
    fn sweep(&mut self) {
        let colliders = self.colliders.clone();
        let mut lost = Vec::new();

        for &id in &colliders {
            if self.deleted.contains(&id) {
                continue;
            }
            let Some(mut object) = self.store.check_out(id) else {
                continue;
            };

            if let Some(collider) = object.collider_mut() {
                for &other_id in &colliders {
                    if other_id == id || self.deleted.contains(&other_id) {
                        continue;
                    }
                    let other = self.store.get(other_id).and_then(|o| o.collider());
                    if let Some(other) = other {
                        collider.collide(other, Some(other_id));
                    }
                }
            } else {
                log::warn!(
                    "{} ({id}) no longer exposes a collider; unregistering it",
                    object.label()
                );
                lost.push(id);
            }

            self.store.check_in(id, object);
        }

        if !lost.is_empty() {
            self.colliders.retain(|id| !lost.contains(id));
        }
    }

    /// Runs one behaviour hook with the object checked out of its slot.
    fn run_hook(&mut self, id: ObjectId, hook: Hook) {
        let Some(mut object) = self.store.check_out(id) else {
            return;
        };

        if let Some(behaviour) = object.behaviour() {
            match hook {
                Hook::Start => behaviour.start(self, id),
                Hook::Update => behaviour.update(self, id),
                Hook::Destroy => behaviour.on_destroy(self, id),
            }
        }
        self.store.check_in(id, object);

        if self.deferred_destroy.remove(&id) {
            log::trace!("Running deferred destroy hook of {id} after {hook:?}");
            self.run_hook(id, Hook::Destroy);
        }
    }

    /// Marks an input code as active.
    pub fn set_input(&self, code: InputCode) {
        self.input.set(code);
    }

    /// Marks an input code as inactive.
    pub fn unset_input(&self, code: InputCode) {
        self.input.unset(code);
    }

    /// Returns `true` if the input code is active.
    pub fn input(&self, code: InputCode) -> bool {
        self.input.is_set(code)
    }

    /// Deactivates every input code.
    pub fn clear_input(&self) {
        self.input.clear();
    }

    /// A handle to this scene's input set that can be moved to producer threads.
    pub fn input_handle(&self) -> InputState {
        self.input.clone()
    }

    /// Returns the object if it is live and not currently running a hook.
    pub fn get(&self, id: ObjectId) -> Option<&dyn GameObject> {
        if self.deleted.contains(&id) {
            return None;
        }
        self.store.get(id)
    }

    /// Mutable counterpart of [`Scene::get`].
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn GameObject + 'static)> {
        if self.deleted.contains(&id) {
            return None;
        }
        self.store.get_mut(id)
    }

    /// Returns the object as its concrete type.
    pub fn get_as<T: GameObject>(&self, id: ObjectId) -> Option<&T> {
        self.get(id)?.downcast_ref::<T>()
    }

    /// Returns the object mutably as its concrete type.
    pub fn get_as_mut<T: GameObject>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.get_mut(id)?.downcast_mut::<T>()
    }

    /// Returns `true` if `id` names an object of this scene that has not been removed.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.store.contains(id) && !self.deleted.contains(&id)
    }

    /// Returns `true` if the object was removed but not yet compacted away.
    pub fn is_pending_removal(&self, id: ObjectId) -> bool {
        self.deleted.contains(&id)
    }

    /// Iterates over the live objects in sequence order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .copied()
            .filter(|id| !self.deleted.contains(id))
    }

    /// The raw live sequence, including objects pending removal.
    pub fn sequence(&self) -> &[ObjectId] {
        &self.objects
    }

    /// The objects registered for the collision sweep, including those pending removal.
    pub fn collider_ids(&self) -> &[ObjectId] {
        &self.colliders
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len() - self.deleted.len()
    }

    /// Returns `true` if the scene has no live object.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Asks the owning game to switch to scene `index` once the current frame ends.
    ///
    /// The game then starts the new scene, with the same start broadcasts as
    /// the initial one.
    pub fn request_scene_change(&mut self, index: usize) {
        self.scene_change = Some(index);
    }

    /// Takes the pending scene change request, if any.
    pub fn take_scene_change(&mut self) -> Option<usize> {
        self.scene_change.take()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects)
            .field("colliders", &self.colliders)
            .field("deleted", &self.deleted)
            .field("input", &self.input)
            .field("has_camera", &self.main_camera.is_some())
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{BoxCollider, Collider, CollisionEvent};
    use crate::object::Behaviour;
    use tessera_core::math::Rectangle;
    use tessera_core::Node;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Records every hook call into a shared journal.
    struct Actor {
        name: &'static str,
        journal: Journal,
        remove_self_on_update: bool,
        remove_on_update: Option<ObjectId>,
        spawn_on_update: bool,
    }

    impl Actor {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: journal.clone(),
                remove_self_on_update: false,
                remove_on_update: None,
                spawn_on_update: false,
            }
        }

        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{}:{event}", self.name));
        }
    }

    impl GameObject for Actor {
        fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
            Some(self)
        }
    }

    impl Behaviour for Actor {
        fn start(&mut self, _scene: &mut Scene, _id: ObjectId) {
            self.log("start");
        }

        fn update(&mut self, scene: &mut Scene, id: ObjectId) {
            self.log("update");
            if self.remove_self_on_update {
                assert!(scene.remove(id));
                self.log("removed");
            }
            if let Some(peer) = self.remove_on_update.take() {
                assert!(scene.remove(peer));
            }
            if self.spawn_on_update {
                self.spawn_on_update = false;
                scene.add(Actor::new("child", &self.journal));
            }
        }

        fn on_destroy(&mut self, _scene: &mut Scene, _id: ObjectId) {
            self.log("destroy");
        }
    }

    struct Inert;
    impl GameObject for Inert {}

    type Drawn = Rc<RefCell<Vec<(ObjectId, Option<Rectangle>)>>>;

    /// Records each drawn id with what the camera made of a unit square.
    struct Recorder {
        drawn: Drawn,
    }

    impl Renderer for Recorder {
        fn render(&mut self, camera: Option<&dyn Camera>, id: ObjectId, _object: &dyn GameObject) {
            let mapped = camera.and_then(|c| c.map(Rectangle::new(0, 0, 1, 1)));
            self.drawn.borrow_mut().push((id, mapped));
        }
    }

    /// Maps every rectangle to a fixed one.
    struct FixedCamera(Rectangle);

    impl Camera for FixedCamera {
        fn map(&self, _rect: Rectangle) -> Option<Rectangle> {
            Some(self.0)
        }
    }

    /// A box whose collider capability can be configured per accessor.
    struct Crate {
        _node: Rc<Node>,
        collider: BoxCollider,
        readable: bool,
        writable: Rc<std::cell::Cell<bool>>,
    }

    impl Crate {
        fn new(x: i32, readable: bool, writable: bool, enters: &Rc<RefCell<u32>>) -> Self {
            let node = Node::shared(x, 0);
            let mut collider = BoxCollider::attached(&node, 10, 10);
            let counter = enters.clone();
            collider
                .on_enter
                .add(move |_: &CollisionEvent| *counter.borrow_mut() += 1);
            Self {
                _node: node,
                collider,
                readable,
                writable: Rc::new(std::cell::Cell::new(writable)),
            }
        }
    }

    impl GameObject for Crate {
        fn collider(&self) -> Option<&dyn Collider> {
            self.readable.then_some(&self.collider as &dyn Collider)
        }

        fn collider_mut(&mut self) -> Option<&mut dyn Collider> {
            if self.writable.get() {
                Some(&mut self.collider)
            } else {
                None
            }
        }
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.borrow_mut().drain(..).collect()
    }

    #[test]
    fn start_and_update_follow_insertion_order() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        scene.add(Actor::new("a", &journal));
        scene.add(Inert);
        scene.add(Actor::new("b", &journal));

        scene.start();
        scene.update();

        assert_eq!(entries(&journal), ["a:start", "b:start", "a:update", "b:update"]);
    }

    #[test]
    fn remove_fires_destroy_synchronously_and_compacts_on_update() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let a = scene.add(Actor::new("a", &journal));
        let b = scene.add(Actor::new("b", &journal));

        assert!(scene.remove(a));
        assert_eq!(entries(&journal), ["a:destroy"]);
        assert!(scene.is_pending_removal(a));
        assert!(scene.get(a).is_none());
        assert_eq!(scene.sequence(), &[a, b]);
        assert_eq!(scene.len(), 1);

        scene.update();
        assert_eq!(entries(&journal), ["b:update"]);
        assert_eq!(scene.sequence(), &[b]);
        assert!(!scene.is_alive(a));
        assert!(!scene.is_pending_removal(a));
    }

    #[test]
    fn removing_twice_or_unknown_is_a_no_op() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let a = scene.add(Actor::new("a", &journal));

        assert!(scene.remove(a));
        assert!(!scene.remove(a));
        assert!(!scene.remove(ObjectId::new(42, 0)));
        assert_eq!(entries(&journal), ["a:destroy"]);
    }

    #[test]
    fn stale_ids_do_not_resolve_after_slot_reuse() {
        let mut scene = Scene::new();
        let first = scene.add(Inert);
        scene.remove(first);
        scene.update();

        let second = scene.add(Inert);
        assert_eq!(second.index, first.index);
        assert_ne!(second, first);
        assert!(scene.get(first).is_none());
        assert!(scene.get(second).is_some());
        assert!(!scene.remove(first));
    }

    #[test]
    fn removing_self_during_update_defers_destroy_until_hook_returns() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let mut actor = Actor::new("a", &journal);
        actor.remove_self_on_update = true;
        let a = scene.add(actor);

        scene.update();
        assert_eq!(entries(&journal), ["a:update", "a:removed", "a:destroy"]);
        assert!(scene.is_pending_removal(a));

        scene.update();
        assert!(entries(&journal).is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn objects_added_during_update_wait_for_next_frame() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let mut actor = Actor::new("a", &journal);
        actor.spawn_on_update = true;
        scene.add(actor);

        scene.update();
        assert_eq!(entries(&journal), ["a:update"]);
        assert_eq!(scene.len(), 2);

        scene.update();
        assert_eq!(entries(&journal), ["a:update", "child:update"]);
    }

    #[test]
    fn object_is_checked_out_during_its_hook() {
        struct SelfLookup {
            saw_itself: Rc<RefCell<Option<bool>>>,
        }

        impl GameObject for SelfLookup {
            fn behaviour(&mut self) -> Option<&mut dyn Behaviour> {
                Some(self)
            }
        }

        impl Behaviour for SelfLookup {
            fn update(&mut self, scene: &mut Scene, id: ObjectId) {
                *self.saw_itself.borrow_mut() = Some(scene.get(id).is_some());
            }
        }

        let saw_itself = Rc::new(RefCell::new(None));
        let mut scene = Scene::new();
        let id = scene.add(SelfLookup {
            saw_itself: saw_itself.clone(),
        });

        scene.update();
        assert_eq!(*saw_itself.borrow(), Some(false));
        assert!(scene.get(id).is_some());
    }

    #[test]
    fn render_skips_removed_objects_and_needs_a_renderer() {
        let drawn = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new();
        let a = scene.add(Inert);
        let b = scene.add(Inert);

        scene.render();

        scene.renderer = Some(Box::new(Recorder {
            drawn: drawn.clone(),
        }));
        scene.remove(a);
        scene.render();
        assert_eq!(*drawn.borrow(), vec![(b, None)]);
    }

    #[test]
    fn render_forwards_the_main_camera() {
        let drawn = Drawn::default();
        let view = Rectangle::new(7, 7, 9, 9);
        let mut scene = Scene::new()
            .with_camera(FixedCamera(view))
            .with_renderer(Recorder {
                drawn: drawn.clone(),
            });
        let a = scene.add(Inert);

        scene.render();
        assert_eq!(*drawn.borrow(), vec![(a, Some(view))]);
    }

    #[test]
    fn removing_a_peer_that_already_ran_defers_to_compaction() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let b = scene.add(Actor::new("b", &journal));
        let a = scene.add(Actor::new("a", &journal));
        let c = scene.add(Actor::new("c", &journal));
        scene.get_as_mut::<Actor>(a).unwrap().remove_on_update = Some(b);

        scene.update();
        assert_eq!(
            entries(&journal),
            ["b:update", "a:update", "b:destroy", "c:update"]
        );
        assert!(scene.is_pending_removal(b));

        scene.update();
        assert_eq!(entries(&journal), ["a:update", "c:update"]);
        assert_eq!(scene.sequence(), &[a, c]);
    }

    #[test]
    fn earlier_object_removing_later_peer_skips_its_update() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let a = scene.add(Actor::new("a", &journal));
        let b = scene.add(Actor::new("b", &journal));
        scene.get_as_mut::<Actor>(a).unwrap().remove_on_update = Some(b);

        scene.update();
        assert_eq!(entries(&journal), ["a:update", "b:destroy"]);

        scene.update();
        assert_eq!(entries(&journal), ["a:update"]);
        assert!(!scene.is_alive(b));
    }

    #[test]
    fn object_with_one_collider_accessor_is_not_registered() {
        let enters = Rc::new(RefCell::new(0));
        let mut scene = Scene::new();
        scene.add(Crate::new(0, true, false, &enters));
        scene.add(Crate::new(5, true, false, &enters));
        scene.add(Crate::new(5, false, true, &enters));
        assert!(scene.collider_ids().is_empty());

        scene.update();
        assert_eq!(*enters.borrow(), 0);
    }

    #[test]
    fn object_with_both_collider_accessors_collides() {
        let enters = Rc::new(RefCell::new(0));
        let mut scene = Scene::new();
        let a = scene.add(Crate::new(0, true, true, &enters));
        let b = scene.add(Crate::new(5, true, true, &enters));
        assert_eq!(scene.collider_ids(), &[a, b]);

        scene.update();
        assert_eq!(*enters.borrow(), 2);
    }

    #[test]
    fn collider_lost_after_registration_is_unregistered() {
        let enters = Rc::new(RefCell::new(0));
        let mut scene = Scene::new();
        let crate_a = Crate::new(0, true, true, &enters);
        let switch = crate_a.writable.clone();
        let a = scene.add(crate_a);
        let b = scene.add(Crate::new(5, true, true, &enters));

        switch.set(false);
        scene.update();
        assert_eq!(scene.collider_ids(), &[b]);
        // Only `b` could react; `a` stays a valid partner through `collider()`.
        assert_eq!(*enters.borrow(), 1);
        assert!(scene.is_alive(a));
    }

    #[test]
    fn input_operations() {
        let scene = Scene::new();
        scene.set_input(5);
        assert!(scene.input(5));
        scene.unset_input(5);
        assert!(!scene.input(5));

        scene.set_input(1);
        scene.set_input(2);
        scene.clear_input();
        assert!(!scene.input(1));
        assert!(!scene.input(2));

        scene.input_handle().set(9);
        assert!(scene.input(9));
    }

    #[test]
    fn downcasting_to_concrete_types() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let id = scene.add(Actor::new("a", &journal));

        assert!(scene.get_as::<Inert>(id).is_none());
        scene.get_as_mut::<Actor>(id).unwrap().name = "renamed";
        assert_eq!(scene.get_as::<Actor>(id).unwrap().name, "renamed");
    }

    #[test]
    fn scene_change_requests_are_taken_once() {
        let mut scene = Scene::new();
        assert_eq!(scene.take_scene_change(), None);
        scene.request_scene_change(2);
        assert_eq!(scene.take_scene_change(), Some(2));
        assert_eq!(scene.take_scene_change(), None);
    }
}
