use super::UserRepository;
use crate::error::{AppError, Result};
use crate::modules::user::domain::{UpdateUserRequest, User};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// In-process [`UserRepository`], keyed by id.
///
/// Behaves like the Postgres table with `id` as primary key: duplicate
/// inserts fail, missing ids affect zero rows. Listings are ordered by id.
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: DashMap<i32, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Vec<User>> {
        Ok(self.rows.get(&id).map(|row| row.clone()).into_iter().collect())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.rows.iter().map(|row| row.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn insert(&self, user: &User) -> Result<()> {
        match self.rows.entry(user.id) {
            Entry::Occupied(_) => Err(AppError::Internal(format!(
                "duplicate key value violates unique constraint \"users_pkey\" (id={})",
                user.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<u64> {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                row.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        Ok(self.rows.remove(&id).map_or(0, |_| 1))
    }
}
