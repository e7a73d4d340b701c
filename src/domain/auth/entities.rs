use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User allowed to sign in to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  /// Lowercased, unique
  pub email: String,
  /// Argon2id PHC string
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl User {
  pub fn new(name: String, email: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
      created_at: Utc::now(),
    }
  }

  pub fn from_db(
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password_hash,
      created_at,
    }
  }
}

/// Server-side session. Only the SHA-256 of the cookie token is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at: now + duration,
      created_at: now,
    }
  }

  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      expires_at,
      created_at,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}
