//! In-memory user store.
//!
//! Holds every live user for the lifetime of the process. Nothing is
//! persisted: a restart empties the store and resets the id sequence.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use indexmap::IndexMap;
use roster_core::{IdAllocator, NewUser, User, UserId};
use tracing::debug;

use crate::error::GatewayError;

#[derive(Debug, Default)]
struct Inner {
    ids: IdAllocator,
    users: IndexMap<UserId, User>,
}

/// Thread-safe, insertion-ordered collection of users.
///
/// The id allocator and the collection sit behind one lock, so allocating an
/// id and inserting the record happen as a single step.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<Inner>,
}

impl UserStore {
    /// Create an empty store whose first id will be `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated user and return the record with its assigned id.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread panicked
    /// while holding the write lock).
    pub fn create(&self, new_user: NewUser) -> User {
        let mut inner = self.write();
        let id = inner.ids.allocate();
        let user = User::new(id, new_user, Utc::now());
        inner.users.insert(id, user.clone());
        debug!(user_id = %id, "user created");
        user
    }

    /// All users in creation order.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }

    /// Look up a user by id.
    ///
    /// # Errors
    /// Returns [`GatewayError::UserNotFound`] if no user has this id.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn get_by_id(&self, id: UserId) -> Result<User, GatewayError> {
        self.read()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::UserNotFound(id.to_string()))
    }

    /// Remove a user by id. The id is never handed out again.
    ///
    /// # Errors
    /// Returns [`GatewayError::UserNotFound`] if no user has this id; the
    /// store is left unchanged.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn delete_by_id(&self, id: UserId) -> Result<(), GatewayError> {
        let removed = self.write().users.shift_remove(&id);
        match removed {
            Some(_) => {
                debug!(user_id = %id, "user deleted");
                Ok(())
            }
            None => Err(GatewayError::UserNotFound(id.to_string())),
        }
    }

    /// Number of users currently stored.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().users.len()
    }

    /// Returns `true` if the store holds no users.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("user store read lock poisoned")
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("user store write lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use roster_core::Role;

    fn ann() -> NewUser {
        NewUser { name: "Ann".to_owned(), email: "ann@x.com".to_owned(), role: Role::User }
    }

    #[test]
    fn user_store_create_get_delete_lifecycle() {
        let store = UserStore::new();
        let user = store.create(ann());
        assert_eq!(user.id, UserId::new(1));

        let fetched = match store.get_by_id(user.id) {
            Ok(u) => u,
            Err(e) => panic!("user should exist after create: {e}"),
        };
        assert_eq!(fetched, user);

        assert!(store.delete_by_id(user.id).is_ok(), "delete should succeed for existing user");
        assert!(
            matches!(store.get_by_id(user.id), Err(GatewayError::UserNotFound(_))),
            "user should not exist after delete"
        );
    }

    #[test]
    fn user_store_list_preserves_creation_order() {
        let store = UserStore::new();
        let names = ["Ann", "Bob", "Cy"];
        for name in names {
            store.create(NewUser { name: name.to_owned(), ..ann() });
        }
        let listed: Vec<_> = store.list().into_iter().map(|u| u.name).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn user_store_delete_keeps_order_of_remaining_users() {
        let store = UserStore::new();
        let first = store.create(ann());
        let second = store.create(ann());
        let third = store.create(ann());
        assert!(store.delete_by_id(second.id).is_ok());
        let ids: Vec<_> = store.list().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, [first.id, third.id]);
    }

    #[test]
    fn user_store_never_reuses_deleted_ids() {
        let store = UserStore::new();
        let first = store.create(ann());
        assert!(store.delete_by_id(first.id).is_ok());
        let next = store.create(ann());
        assert_eq!(next.id, UserId::new(2), "deleted id must not be reclaimed");
    }

    #[test]
    fn user_store_delete_unknown_id_leaves_store_unchanged() {
        let store = UserStore::new();
        store.create(ann());
        let before = store.list();
        assert!(matches!(
            store.delete_by_id(UserId::new(99)),
            Err(GatewayError::UserNotFound(_))
        ));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn user_store_empty_list_is_empty() {
        let store = UserStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn user_store_repeated_get_returns_identical_user() {
        let store = UserStore::new();
        let user = store.create(ann());
        let a = store.get_by_id(user.id).ok();
        let b = store.get_by_id(user.id).ok();
        assert_eq!(a, b);
    }

    #[test]
    fn user_store_concurrent_creates_assign_distinct_ids() {
        let store = std::sync::Arc::new(UserStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || (0..50).map(|_| store.create(ann()).id).collect::<Vec<_>>())
            })
            .collect();
        let mut ids: Vec<UserId> = handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(ids) => ids,
                Err(_) => panic!("worker thread panicked"),
            })
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 400, "every concurrent create must get a distinct id");
        assert_eq!(store.len(), 400);
    }

    proptest! {
        #[test]
        fn count_equals_creations_minus_successful_deletions(
            ops in proptest::collection::vec((any::<bool>(), 1u64..20), 0..100)
        ) {
            let store = UserStore::new();
            let mut created = 0usize;
            let mut deleted = 0usize;
            for (is_create, id) in ops {
                if is_create {
                    store.create(ann());
                    created += 1;
                } else if store.delete_by_id(UserId::new(id)).is_ok() {
                    deleted += 1;
                }
            }
            prop_assert_eq!(store.len(), created - deleted);
            prop_assert_eq!(store.list().len(), created - deleted);
        }
    }
}
