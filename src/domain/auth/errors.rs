use thiserror::Error;

/// Authentication failure subtypes raised by a sign-in provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthErrorType {
  #[error("CredentialsSignin")]
  CredentialsSignin,

  #[error("ProviderNotFound")]
  ProviderNotFound,

  #[error("AccessDenied")]
  AccessDenied,

  #[error("SessionRequired")]
  SessionRequired,

  #[error("Configuration")]
  Configuration,
}

/// An authentication failure, identified by its subtype.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("authentication failed: {kind}")]
pub struct AuthError {
  pub kind: AuthErrorType,
}

impl AuthError {
  pub fn new(kind: AuthErrorType) -> Self {
    Self { kind }
  }

  pub fn credentials_signin() -> Self {
    Self::new(AuthErrorType::CredentialsSignin)
  }
}

/// Everything a sign-in attempt can fail with. Only the `Auth` variant is an
/// authentication failure; the others are infrastructure faults.
#[derive(Debug, Error)]
pub enum SignInError {
  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for SignInError {
  fn from(error: sqlx::Error) -> Self {
    SignInError::Repository(RepositoryError::from(error))
  }
}

impl From<argon2::password_hash::Error> for HashError {
  fn from(error: argon2::password_hash::Error) -> Self {
    use argon2::password_hash::Error;
    match error {
      Error::PhcStringField | Error::PhcStringTrailingData => HashError::InvalidFormat,
      Error::Password => HashError::VerificationFailed("Invalid password".to_string()),
      _ => HashError::HashingFailed(error.to_string()),
    }
  }
}
