//! Persistence ports and their back ends.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::mood::{DateRange, MoodChanges, MoodEntry};
use crate::models::user::User;

pub mod memory;
pub mod pool;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> AppResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// True when either the username or the email already belongs to a user.
    async fn identity_taken(&self, username: &str, email: &str) -> AppResult<bool>;
}

/// Entry lookups by id are deliberately unscoped; callers check ownership.
#[async_trait]
pub trait MoodRepository: Send + Sync {
    async fn insert_entry(&self, entry: &MoodEntry) -> AppResult<MoodEntry>;

    /// The owner's entries inside `range`, newest date first.
    async fn list_entries(&self, owner: Uuid, range: DateRange) -> AppResult<Vec<MoodEntry>>;

    async fn find_entry(&self, id: Uuid) -> AppResult<Option<MoodEntry>>;

    /// Returns `None` if the entry vanished in the meantime.
    async fn update_entry(&self, id: Uuid, changes: &MoodChanges) -> AppResult<Option<MoodEntry>>;

    /// Returns whether a row was removed.
    async fn delete_entry(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait Store: UserRepository + MoodRepository {
    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> AppResult<()>;
}
