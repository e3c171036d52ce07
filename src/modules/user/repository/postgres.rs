use super::UserRepository;
use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::infrastructure::Database;
use crate::modules::user::domain::{UpdateUserRequest, User};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, Value};
use std::sync::Arc;

const SELECT_ONE: &str = "SELECT * FROM users WHERE id = $1;";
const SELECT_ALL: &str = "SELECT * FROM users;";
const INSERT: &str = "INSERT INTO users VALUES ($1, $2, $3, $4);";
const UPDATE: &str = "UPDATE users SET name=$1, age=$2, height=$3 WHERE id=$4;";
const DELETE: &str = "DELETE FROM users WHERE id = $1;";

/// [`UserRepository`] over the shared Postgres connection.
pub struct PgUserRepository {
    db: Arc<Database>,
}

impl PgUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn statement<I>(sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    async fn query(&self, stmt: Statement) -> Result<Vec<User>> {
        let conn = self.db.connection().await?;
        let users = User::find_by_statement(stmt).all(&conn).await?;
        Ok(users)
    }

    async fn execute(&self, stmt: Statement) -> Result<u64> {
        let conn = self.db.connection().await?;
        let result = conn.execute_raw(stmt).await?;
        Ok(result.rows_affected())
    }
}

impl Injectable for PgUserRepository {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self {
            db: container.resolve::<Database>()?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Vec<User>> {
        self.query(Self::statement(SELECT_ONE, [Value::from(id)])).await
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.query(Statement::from_string(DbBackend::Postgres, SELECT_ALL)).await
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let values: [Value; 4] = [
            user.id.into(),
            user.name.clone().into(),
            user.age.into(),
            user.height.into(),
        ];
        self.execute(Self::statement(INSERT, values)).await?;
        Ok(())
    }

    async fn update(&self, id: i32, changes: &UpdateUserRequest) -> Result<u64> {
        let values: [Value; 4] = [
            changes.name.clone().into(),
            changes.age.into(),
            changes.height.into(),
            id.into(),
        ];
        self.execute(Self::statement(UPDATE, values)).await
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        self.execute(Self::statement(DELETE, [Value::from(id)])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::error::AppError;

    fn repository() -> PgUserRepository {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "joao".to_string(),
            password: "123456789".to_string(),
            name: "users".to_string(),
        };
        PgUserRepository::new(Arc::new(Database::new(config)))
    }

    #[test]
    fn test_statements_bind_positional_values() {
        let values: [Value; 4] = [
            "Ann".to_string().into(),
            31_i32.into(),
            1.71_f64.into(),
            1_i32.into(),
        ];
        let stmt = PgUserRepository::statement(UPDATE, values);
        assert_eq!(stmt.sql, UPDATE);
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(4));
    }

    #[tokio::test]
    async fn test_queries_fail_cleanly_without_connection() {
        let repo = repository();
        assert!(matches!(repo.find_all().await, Err(AppError::NotConnected)));
        assert!(matches!(repo.delete(1).await, Err(AppError::NotConnected)));
    }

    #[test]
    fn test_inject_resolves_database() {
        let mut container = Container::new();
        assert!(PgUserRepository::inject(&container).is_err());

        container.register_arc(Arc::clone(&repository().db));
        assert!(PgUserRepository::inject(&container).is_ok());
    }
}
