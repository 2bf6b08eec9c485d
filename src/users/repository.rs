// Database repositories for users

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::RepositoryError;
use crate::id::Id;
use crate::repository::{map_write_error, Repository};
use crate::users::models::User;

/// User persistence, adding the email lookup used to authenticate
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Find a user by email, failing with NotFound when absent
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}

/// Postgres-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        tracing::debug!("Inserting user {}", user.id);

        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Id) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET name = $1, email = $2, password_hash = $3 WHERE id = $4",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}

/// In-memory user repository enforcing the same unique-email rule as the schema
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<User> for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id || u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "user {} already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Id) -> Result<User, RepositoryError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already taken",
                user.email
            )));
        }
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepositoryError::NotFound)?;

        existing.name = user.name.clone();
        existing.email = user.email.clone();
        existing.password_hash = user.password_hash.clone();
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        users.remove(index);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn check_users(repo: Arc<dyn UserRepository>) {
        let user = User::new("John Doe", "john@doe.com", "@Pass123").unwrap();
        repo.create(&user).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found, user);

        let by_email = repo.find_by_email("john@doe.com").await.unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.password_hash, user.password_hash);
        assert!(by_email.validate_password("@Pass123"));

        assert!(matches!(
            repo.find_by_email("nobody@doe.com").await,
            Err(RepositoryError::NotFound)
        ));

        // Same email, different id
        let twin = User {
            id: Id::generate(),
            ..user.clone()
        };
        assert!(matches!(repo.create(&twin).await, Err(RepositoryError::Conflict(_))));

        let renamed = User {
            name: "Jane Doe".to_string(),
            ..user.clone()
        };
        repo.update(&renamed).await.unwrap();
        assert_eq!(repo.find_by_id(user.id).await.unwrap().name, "Jane Doe");

        repo.delete(user.id).await.unwrap();
        assert!(matches!(repo.find_by_id(user.id).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.delete(user.id).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_memory_user_repository() {
        check_users(Arc::new(MemoryUserRepository::new())).await;
    }

    #[tokio::test]
    async fn test_postgres_user_repository() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let pool = crate::db::create_pool(&url, 5)
            .await
            .expect("Failed to connect to test database");
        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        sqlx::query("DELETE FROM users")
            .execute(&pool)
            .await
            .expect("Failed to clean users");

        check_users(Arc::new(PgUserRepository::new(pool))).await;
    }
}
