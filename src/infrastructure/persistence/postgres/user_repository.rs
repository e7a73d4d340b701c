use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User, errors::RepositoryError, ports::UserRepository, value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(row.id, row.name, row.email, row.password_hash, row.created_at)
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
      INSERT INTO users (id, name, email, password_hash, created_at)
      VALUES ($1, $2, $3, $4, $5)
      RETURNING id, name, email, password_hash, created_at
      "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    let result = sqlx::query_as::<_, UserRow>(
      "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    let result = sqlx::query_as::<_, UserRow>(
      "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::postgres::test_db::setup_test_db;

  fn user() -> User {
    User::new(
      "User".to_string(),
      "user@nextmail.com".to_string(),
      "hashed_password".to_string(),
    )
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_create_and_find_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let created = repo.create(user()).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "user@nextmail.com");

    let email = Email::new("USER@nextmail.com").unwrap();
    let by_email = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.name, "User");

    let missing = Email::new("missing@nextmail.com").unwrap();
    assert!(repo.find_by_email(&missing).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_duplicate_email_is_rejected() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo.create(user()).await.unwrap();
    let result = repo.create(user()).await;

    assert!(matches!(result, Err(RepositoryError::DuplicateKey(_))));
  }
}
