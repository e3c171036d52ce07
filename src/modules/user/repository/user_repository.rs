use crate::error::Result;
use crate::modules::user::domain::{UpdateUserRequest, User};
use async_trait::async_trait;

/// Storage for user rows.
///
/// Writes return the number of affected rows. Callers decide whether zero
/// is an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Rows whose id matches: zero or one with a primary key in place.
    async fn find_by_id(&self, id: i32) -> Result<Vec<User>>;
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn insert(&self, user: &User) -> Result<()>;
    async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<u64>;
    async fn delete(&self, id: i32) -> Result<u64>;
}
