//! User directory: the single owner of user records.
//!
//! Records are keyed by id with an explicit email index. Both maps sit behind one
//! `RwLock`, so the uniqueness check, the persisted append and the insert form a
//! single critical section: two concurrent registrations for the same email cannot
//! both succeed.
use std::collections::HashMap;
use std::fmt;

use gatekeeper_common::{UserId, UserProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::storage::{Storage, StorageError};

/// A registered account
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// The outward view of this record
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("user id already exists: {0}")]
    DuplicateId(UserId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Default)]
struct Index {
    by_id: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

impl Index {
    fn check(&self, user: &User) -> Result<(), DirectoryError> {
        if self.by_email.contains_key(&user.email) {
            return Err(DirectoryError::DuplicateEmail);
        }
        if self.by_id.contains_key(&user.id) {
            return Err(DirectoryError::DuplicateId(user.id.clone()));
        }
        Ok(())
    }

    fn put(&mut self, user: User) {
        self.by_email.insert(user.email.clone(), user.id.clone());
        self.by_id.insert(user.id.clone(), user);
    }
}

/// Concurrent-safe user store backed by `S`
pub struct UserDirectory<S> {
    index: RwLock<Index>,
    storage: S,
}

impl<S: Storage> UserDirectory<S> {
    /// An empty directory. Anything already in `storage` is ignored; use [`open`](Self::open)
    /// to replay it.
    pub fn new(storage: S) -> Self {
        Self {
            index: RwLock::new(Index::default()),
            storage,
        }
    }

    /// Rebuild the directory from the records persisted in `storage`
    pub async fn open(storage: S) -> Result<Self, DirectoryError> {
        let mut index = Index::default();
        for user in storage.load_users().await? {
            index.check(&user)?;
            index.put(user);
        }
        tracing::info!(users = index.by_id.len(), "user directory loaded");

        Ok(Self {
            index: RwLock::new(index),
            storage,
        })
    }

    /// Store a new record, rejecting an email that is already taken.
    ///
    /// Nothing is inserted when the backing store refuses the write.
    pub async fn insert(&self, user: User) -> Result<(), DirectoryError> {
        let mut index = self.index.write().await;
        index.check(&user)?;
        self.storage.append_user(&user).await?;
        index.put(user);
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.index.read().await.by_id.get(id).cloned()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let index = self.index.read().await;
        index
            .by_email
            .get(email)
            .and_then(|id| index.by_id.get(id))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
