//! In-memory user store.
//!
//! The id counter and the collection sit behind one mutex, so every
//! operation is a single critical section: concurrent creates never share
//! or skip an id. Callers get clones, never references into the map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::Fault;
use crate::user::{User, UserId};

type StoreResult<T> = Result<T, Fault>;

#[derive(Debug)]
struct Inner {
    next_id: UserId,
    users: BTreeMap<UserId, User>,
}

/// Process-lifetime owner of every [`User`].
///
/// Keyed by id in a `BTreeMap`; ids only grow, so key order is insertion
/// order. The only failure is a poisoned lock, surfaced as a [`Fault`].
#[derive(Debug)]
pub struct UserStore {
    inner: Mutex<Inner>,
}

impl UserStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { next_id: 1, users: BTreeMap::new() }) }
    }

    /// Stores a new user under the next id and returns that id. Ids start at
    /// 1 and are never reused, even after deletion.
    pub fn insert(&self, email: String, name: String) -> StoreResult<UserId> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.users.insert(id, User { id, email, name });
        Ok(id)
    }

    /// Every user, in ascending id order.
    pub fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    pub fn get(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    pub fn contains(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.lock()?.users.contains_key(&id))
    }

    /// Replaces email and name in place. `None` if `id` is not stored.
    pub fn update(&self, id: UserId, email: String, name: String) -> StoreResult<Option<User>> {
        let mut inner = self.lock()?;
        Ok(inner.users.get_mut(&id).map(|user| {
            user.email = email;
            user.name = name;
            user.clone()
        }))
    }

    /// Deletes `id`; `true` if something was removed.
    pub fn remove(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.users.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| Fault::msg("user store lock poisoned"))
    }
}

impl Default for UserStore {
    fn default() -> Self { Self::new() }
}
