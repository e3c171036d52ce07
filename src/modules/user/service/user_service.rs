use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::modules::user::domain::{UpdateUserRequest, User};
use crate::modules::user::repository::UserRepository;
use std::sync::Arc;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl Injectable for UserService {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self {
            repository: container.resolve_trait::<dyn UserRepository>()?,
        })
    }
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> Result<Vec<User>> {
        let users = self.repository.find_by_id(id).await?;
        tracing::debug!(id, found = users.len(), "Fetched user");
        Ok(users)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = self.repository.find_all().await?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Store `user` and hand it back unchanged.
    pub async fn create(&self, user: User) -> Result<User> {
        self.repository.insert(&user).await?;
        tracing::debug!(id = user.id, "Created user");
        Ok(user)
    }

    /// Succeeds once the statement runs, even if no row matched.
    pub async fn update(&self, id: i32, changes: UpdateUserRequest) -> Result<()> {
        let affected = self.repository.update(id, &changes).await?;
        tracing::debug!(id, affected, "Updated user");
        Ok(())
    }

    /// Succeeds once the statement runs, even if no row matched.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let affected = self.repository.delete(id).await?;
        tracing::debug!(id, affected, "Deleted user");
        Ok(())
    }
}
