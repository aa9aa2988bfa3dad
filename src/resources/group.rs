//! Owning, order-preserving entity container.
//!
//! A [`Group<T>`] owns a sequence of entities implementing [`Updatable`] and
//! drives them once per frame:
//!
//! 1. [`Group::update`] updates every member in insertion order
//! 2. entities handed to a [`Spawner`] during that pass join at the end
//! 3. a back-to-front scan removes every member whose [`Updatable::is_dead`]
//!    returns `true`
//!
//! [`Group::draw`] then draws the survivors in the same order, so entities
//! added later are drawn on top.
//!
//! Killing is cooperative: an entity (or anything holding `&mut` to it through
//! [`Group::for_each`]) flips its own dead flag and the group reclaims it at
//! the end of its next update. Nothing is removed mid-pass.
//!
//! # Spawning from inside the loop
//!
//! Entities cannot reach their owning group while it iterates them. A
//! [`Spawner`] is a weak handle to the group's inbox: it never keeps the group
//! alive, and objects pushed through it are merged after the update pass, so
//! they are not updated in the frame they were spawned.
//!
//! ```ignore
//! let mut circles: Group<Circle> = Group::new();
//! let spawner = circles.spawner();
//! circles.add(Circle::new(10.0, 10.0, &mut rng, Some(spawner)));
//! circles.update(dt);
//! circles.draw(&mut renderer);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::trace;

use crate::resources::renderer::Renderer;

/// Capability required from every entity stored in a [`Group`].
pub trait Updatable {
    /// Whether the entity should be reclaimed by its group.
    fn is_dead(&self) -> bool;
    /// Mark the entity for reclamation.
    fn kill(&mut self);
    /// Advance the entity by `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Issue the entity's draw calls.
    fn draw(&self, renderer: &mut dyn Renderer);
}

impl<T: Updatable + ?Sized> Updatable for Box<T> {
    fn is_dead(&self) -> bool {
        (**self).is_dead()
    }
    fn kill(&mut self) {
        (**self).kill()
    }
    fn update(&mut self, dt: f32) {
        (**self).update(dt)
    }
    fn draw(&self, renderer: &mut dyn Renderer) {
        (**self).draw(renderer)
    }
}

type Inbox<T> = RefCell<Vec<T>>;

/// Insertion-ordered owner of entities.
pub struct Group<T> {
    objects: Vec<T>,
    inbox: Rc<Inbox<T>>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Group {
            objects: Vec::new(),
            inbox: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> std::fmt::Debug for Group<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("len", &self.objects.len())
            .field("spawned", &self.inbox.borrow().len())
            .finish()
    }
}

impl<T: Updatable> Group<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `obj`; it will be updated and drawn after every current member.
    pub fn add(&mut self, obj: T) {
        debug_assert!(!obj.is_dead(), "adding an already dead entity");
        self.objects.push(obj);
    }

    /// Non-owning handle other code can use to add members later.
    pub fn spawner(&self) -> Spawner<T> {
        Spawner {
            inbox: Rc::downgrade(&self.inbox),
        }
    }

    pub fn update(&mut self, dt: f32) {
        for obj in self.objects.iter_mut() {
            obj.update(dt);
        }

        let spawned = std::mem::take(&mut *self.inbox.borrow_mut());
        self.objects.extend(spawned);

        // back to front so removals never shift an unvisited index
        let mut reaped = 0;
        for i in (0..self.objects.len()).rev() {
            if self.objects[i].is_dead() {
                self.objects.remove(i);
                reaped += 1;
            }
        }
        if reaped > 0 {
            trace!("group reaped {} dead entities, {} left", reaped, self.objects.len());
        }
    }

    /// Apply `f` to every member in insertion order. Never removes anything.
    pub fn for_each(&mut self, mut f: impl FnMut(&mut T)) {
        for obj in self.objects.iter_mut() {
            f(obj);
        }
    }

    /// Mark every member dead; they are reclaimed on the next update.
    pub fn kill_all(&mut self) {
        self.for_each(|o| o.kill());
    }

    /// Drop every member and every queued spawn without updating them.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.inbox.borrow_mut().clear();
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for obj in self.objects.iter() {
            obj.draw(renderer);
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.objects.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.objects.get(index)
    }

    /// Entities spawned since the last update, not yet members.
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

/// Weak handle that adds entities to a [`Group`] at its next merge point.
pub struct Spawner<T> {
    inbox: Weak<Inbox<T>>,
}

impl<T> Clone for Spawner<T> {
    fn clone(&self) -> Self {
        Spawner {
            inbox: self.inbox.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Spawner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spawner")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl<T> Spawner<T> {
    /// Queue `obj` for the group. Hands it back if the group no longer exists.
    pub fn spawn(&self, obj: T) -> Result<(), T> {
        match self.inbox.upgrade() {
            Some(inbox) => {
                inbox.borrow_mut().push(obj);
                Ok(())
            }
            None => Err(obj),
        }
    }

    /// Whether the group behind this handle still exists.
    pub fn is_alive(&self) -> bool {
        self.inbox.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::renderer::{CommandRecorder, DrawCommand};

    #[derive(Debug)]
    struct Recorded {
        id: u32,
        dead: bool,
        updates: u32,
    }

    impl Recorded {
        fn new(id: u32) -> Self {
            Recorded {
                id,
                dead: false,
                updates: 0,
            }
        }
    }

    impl Updatable for Recorded {
        fn is_dead(&self) -> bool {
            self.dead
        }
        fn kill(&mut self) {
            self.dead = true;
        }
        fn update(&mut self, _dt: f32) {
            self.updates += 1;
        }
        fn draw(&self, renderer: &mut dyn Renderer) {
            renderer.print(&self.id.to_string(), 0.0, 0.0);
        }
    }

    fn ids(g: &Group<Recorded>) -> Vec<u32> {
        g.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_group_is_noop() {
        let mut g: Group<Recorded> = Group::new();
        g.update(0.016);
        let mut r = CommandRecorder::new();
        g.draw(&mut r);
        assert!(g.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_draw_follows_insertion_order() {
        let mut g = Group::new();
        for id in [3, 1, 2] {
            g.add(Recorded::new(id));
        }
        let mut r = CommandRecorder::new();
        g.draw(&mut r);
        assert_eq!(r.printed().collect::<Vec<_>>(), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_update_removes_dead_and_keeps_order() {
        let mut g = Group::new();
        for id in 0..10 {
            g.add(Recorded::new(id));
        }
        g.for_each(|p| {
            if p.id % 3 == 0 || p.id == 4 {
                p.kill();
            }
        });
        assert_eq!(g.len(), 10, "for_each must not remove");

        g.update(0.0);
        assert_eq!(ids(&g), vec![1, 2, 5, 7, 8]);
    }

    #[test]
    fn test_adjacent_dead_entities_are_all_removed() {
        let mut g = Group::new();
        for id in 0..4 {
            g.add(Recorded::new(id));
        }
        g.for_each(|p| p.dead = p.id == 1 || p.id == 2);
        g.update(0.0);
        assert_eq!(ids(&g), vec![0, 3]);
    }

    #[test]
    fn test_dead_entity_still_gets_final_update() {
        let mut g = Group::new();
        g.add(Recorded::new(0));
        g.kill_all();
        g.update(0.0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_repeated_zero_updates_are_idempotent() {
        let mut g = Group::new();
        for id in 0..5 {
            g.add(Recorded::new(id));
        }
        for _ in 0..4 {
            g.update(0.0);
            assert_eq!(ids(&g), vec![0, 1, 2, 3, 4]);
        }
        assert!(g.iter().all(|p| p.updates == 4));
    }

    #[test]
    fn test_spawned_entities_join_after_update_pass() {
        let mut g = Group::new();
        g.add(Recorded::new(0));
        let spawner = g.spawner();
        assert!(spawner.is_alive());

        assert!(spawner.spawn(Recorded::new(1)).is_ok());
        assert_eq!(g.len(), 1);
        assert_eq!(g.pending(), 1);

        g.update(0.0);
        assert_eq!(ids(&g), vec![0, 1]);
        assert_eq!(g.get(0).map(|p| p.updates), Some(1));
        assert_eq!(g.get(1).map(|p| p.updates), Some(0));
        assert_eq!(g.pending(), 0);
    }

    #[test]
    fn test_spawner_outliving_group_hands_object_back() {
        let g: Group<Recorded> = Group::new();
        let spawner = g.spawner();
        drop(g);
        assert!(!spawner.is_alive());
        let back = spawner.spawn(Recorded::new(7)).unwrap_err();
        assert_eq!(back.id, 7);
    }

    #[test]
    fn test_clear_drops_members_and_queued_spawns() {
        let mut g: Group<Recorded> = Group::new();
        g.add(Recorded::new(1));
        let spawner = g.spawner();
        assert!(spawner.spawn(Recorded::new(2)).is_ok());
        assert_eq!(g.pending(), 1);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.pending(), 0);
        assert!(spawner.is_alive());
        g.update(0.016);
        assert!(g.is_empty());
    }

    #[test]
    fn test_boxed_trait_objects_share_a_group() {
        let mut g: Group<Box<dyn Updatable>> = Group::new();
        g.add(Box::new(Recorded::new(1)));
        g.add(Box::new(Recorded::new(2)));
        g.for_each(|o| o.kill());
        g.update(0.0);
        assert!(g.is_empty());

        g.add(Box::new(Recorded::new(3)));
        let mut r = CommandRecorder::new();
        g.draw(&mut r);
        assert_eq!(
            r.commands,
            vec![DrawCommand::Print {
                text: "3".into(),
                x: 0.0,
                y: 0.0
            }]
        );
    }
}
