use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MoodRepository, Store, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::mood::{sort_newest_first, DateRange, MoodChanges, MoodEntry};
use crate::models::user::User;

/// In-process store for development without PostgreSQL and for tests.
/// Data lives as long as the process does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    entries: Arc<RwLock<HashMap<Uuid, MoodEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_identity(user: &User, username: &str, email: &str) -> bool {
    user.username.eq_ignore_ascii_case(username) || user.email.eq_ignore_ascii_case(email)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| same_identity(u, &user.username, &user.email))
        {
            return Err(AppError::Conflict(
                "Username or email already registered".into(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn identity_taken(&self, username: &str, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| same_identity(u, username, email)))
    }
}

#[async_trait]
impl MoodRepository for MemoryStore {
    async fn insert_entry(&self, entry: &MoodEntry) -> AppResult<MoodEntry> {
        self.entries
            .write()
            .await
            .insert(entry.id, entry.clone());
        Ok(entry.clone())
    }

    async fn list_entries(&self, owner: Uuid, range: DateRange) -> AppResult<Vec<MoodEntry>> {
        let entries = self.entries.read().await;
        let mut owned: Vec<MoodEntry> = entries
            .values()
            .filter(|e| e.is_owned_by(owner) && range.contains(e.date))
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    async fn find_entry(&self, id: Uuid) -> AppResult<Option<MoodEntry>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn update_entry(&self, id: Uuid, changes: &MoodChanges) -> AppResult<Option<MoodEntry>> {
        let mut entries = self.entries.write().await;
        Ok(entries.get_mut(&id).map(|entry| {
            entry.apply(changes);
            entry.clone()
        }))
    }

    async fn delete_entry(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.entries.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
