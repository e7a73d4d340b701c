use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::{HashError, RepositoryError, SignInError};
use super::services::EstablishedSession;
use super::value_objects::{Email, Password, PasswordHash};
use crate::domain::form_data::FormData;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: User) -> Result<User, RepositoryError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, RepositoryError>;

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, RepositoryError>;

  async fn delete(&self, session_id: Uuid) -> Result<(), RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(&self, password: &Password, hashed: &PasswordHash) -> Result<bool, HashError>;
}

/// A named sign-in mechanism that turns submitted form fields into a session.
///
/// Authentication failures are reported as `SignInError::Auth` with a subtype;
/// everything else is an infrastructure fault.
#[async_trait]
pub trait SignInProvider: Send + Sync {
  async fn sign_in(
    &self,
    provider: &str,
    form: &FormData,
  ) -> Result<EstablishedSession, SignInError>;
}
