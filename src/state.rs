use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eframe::egui;
use parking_lot::RawRwLock;
use parking_lot::RwLock;

use crate::cards::CardContext;

pub type ArcReadGuard<T> = parking_lot::lock_api::ArcRwLockReadGuard<RawRwLock, T>;
pub type ArcWriteGuard<T> = parking_lot::lock_api::ArcRwLockWriteGuard<RawRwLock, T>;

/// Type-erased storage for the values owned by stateful cards.
#[derive(Debug, Default)]
pub struct StateStore {
    states: RwLock<HashMap<egui::Id, Arc<dyn Any + Send + Sync>>>,
    anonymous: AtomicU64,
}

impl StateStore {
    pub(crate) fn get<T: Send + Sync + 'static>(&self, id: egui::Id) -> Option<Arc<RwLock<T>>> {
        let entry = self.states.read().get(&id).cloned()?;
        entry.downcast::<RwLock<T>>().ok()
    }

    /// Stores `init` under a fresh id that no key can collide with.
    pub fn insert<T: Send + Sync + 'static>(&self, init: T) -> StateId<T> {
        let index = self.anonymous.fetch_add(1, Ordering::Relaxed);
        let id = egui::Id::new(("introbook_anonymous_state", index));
        self.states
            .write()
            .insert(id, Arc::new(RwLock::new(init)));
        StateId::new(id)
    }

    /// Returns the state stored under `id`, inserting `init` if there is none yet.
    ///
    /// Panics if `id` already holds a value of a different type.
    pub fn get_or_insert<T: Send + Sync + 'static>(&self, id: egui::Id, init: T) -> StateId<T> {
        let mut states = self.states.write();
        let entry = states
            .entry(id)
            .or_insert_with(|| Arc::new(RwLock::new(init)) as Arc<dyn Any + Send + Sync>);
        if !entry.is::<RwLock<T>>() {
            panic!(
                "state {id:?} already holds a value that is not a {}",
                std::any::type_name::<T>()
            );
        }
        StateId::new(id)
    }

    pub fn contains(&self, id: egui::Id) -> bool {
        self.states.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

/// Typed handle to a value in a [`StateStore`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StateId<T> {
    id: egui::Id,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for StateId<T> {}

impl<T> Clone for StateId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> StateId<T> {
    pub(crate) fn new(id: egui::Id) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(self) -> egui::Id {
        self.id
    }
}

impl<T: Send + Sync + 'static> StateId<T> {
    /// Blocks until the value can be read. Do not call this for the card's own state.
    pub fn read(self, ctx: &CardContext) -> ArcReadGuard<T> {
        self.read_in(ctx.store())
    }

    pub fn try_read(self, ctx: &CardContext) -> Option<ArcReadGuard<T>> {
        self.try_read_in(ctx.store())
    }

    pub fn read_mut(self, ctx: &CardContext) -> ArcWriteGuard<T> {
        self.read_mut_in(ctx.store())
    }

    pub fn try_read_mut(self, ctx: &CardContext) -> Option<ArcWriteGuard<T>> {
        self.try_read_mut_in(ctx.store())
    }

    pub fn read_in(self, store: &StateStore) -> ArcReadGuard<T> {
        self.state_arc_or_panic(store).read_arc()
    }

    pub fn try_read_in(self, store: &StateStore) -> Option<ArcReadGuard<T>> {
        store.get(self.id).and_then(|state| state.try_read_arc())
    }

    pub fn read_mut_in(self, store: &StateStore) -> ArcWriteGuard<T> {
        self.state_arc_or_panic(store).write_arc()
    }

    pub fn try_read_mut_in(self, store: &StateStore) -> Option<ArcWriteGuard<T>> {
        store.get(self.id).and_then(|state| state.try_write_arc())
    }

    fn state_arc_or_panic(self, store: &StateStore) -> Arc<RwLock<T>> {
        store
            .get(self.id)
            .unwrap_or_else(|| panic!("state missing for id {:?}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_returns_same_state() {
        let store = StateStore::default();
        let id = egui::Id::new("age");
        let first = store.get_or_insert(id, 7_u8);
        let second = store.get_or_insert(id, 99_u8);
        assert_eq!(first, second);
        assert_eq!(*second.read_in(&store), 7);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn anonymous_states_do_not_collide() {
        let store = StateStore::default();
        let a = store.insert(String::from("a"));
        let b = store.insert(String::from("b"));
        assert_ne!(a.id(), b.id());
        assert_eq!(*a.read_in(&store), "a");
        assert_eq!(*b.read_in(&store), "b");
    }

    #[test]
    fn writes_are_visible_to_readers() {
        let store = StateStore::default();
        let name = store.insert(String::new());
        name.read_mut_in(&store).push_str("Ada");
        assert_eq!(*name.read_in(&store), "Ada");
    }

    #[test]
    fn try_read_fails_while_written() {
        let store = StateStore::default();
        let value = store.insert(1_i32);
        let guard = value.read_mut_in(&store);
        assert!(value.try_read_in(&store).is_none());
        drop(guard);
        assert!(value.try_read_in(&store).is_some());
    }

    #[test]
    #[should_panic(expected = "already holds a value")]
    fn key_reused_with_other_type_panics() {
        let store = StateStore::default();
        let id = egui::Id::new("language");
        store.get_or_insert(id, 1_u32);
        store.get_or_insert(id, String::new());
    }
}
