use chrono::Duration;
use std::sync::Arc;

use async_trait::async_trait;

use super::entities::{Session, User};
use super::errors::{AuthError, AuthErrorType, RepositoryError, SignInError};
use super::ports::{PasswordHasher, SessionRepository, SignInProvider, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};
use crate::domain::form_data::FormData;

pub const CREDENTIALS_PROVIDER: &str = "credentials";
pub const DEFAULT_REDIRECT: &str = "/dashboard";

const EMAIL_FIELD: &str = "email";
const PASSWORD_FIELD: &str = "password";
const REDIRECT_FIELD: &str = "redirectTo";

/// Result of a successful sign-in: the persisted session, the raw token for
/// the cookie and where to send the browser next.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
  pub user: User,
  pub session: Session,
  pub token: SessionToken,
  pub redirect_to: String,
}

/// Email/password authentication backed by the users and sessions tables
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  session_ttl: Duration,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      session_ttl,
    }
  }

  /// Checks email and password and opens a new session.
  ///
  /// Malformed input, an unknown email and a wrong password all fail the same
  /// way, with `CredentialsSignin`.
  pub async fn authorize(&self, form: &FormData) -> Result<EstablishedSession, SignInError> {
    let email = form
      .get(EMAIL_FIELD)
      .and_then(|value| Email::new(value).ok())
      .ok_or_else(AuthError::credentials_signin)?;
    let password = form
      .get(PASSWORD_FIELD)
      .and_then(|value| Password::new(value).ok())
      .ok_or_else(AuthError::credentials_signin)?;

    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or_else(AuthError::credentials_signin)?;

    let stored_hash = PasswordHash::from_hash(user.password_hash.as_str()).map_err(|e| {
      tracing::error!("Stored password hash for user {} is unusable: {}", user.id, e);
      AuthError::new(AuthErrorType::Configuration)
    })?;

    if !self.password_hasher.verify(&password, &stored_hash).await? {
      return Err(AuthError::credentials_signin().into());
    }

    let token = SessionToken::generate();
    let session = Session::with_duration(user.id, token.hash().into_inner(), self.session_ttl);
    let session = self.session_repo.create(session).await?;

    Ok(EstablishedSession {
      user,
      session,
      token,
      redirect_to: safe_redirect_target(form.get(REDIRECT_FIELD)),
    })
  }

  /// Resolves the user behind a session cookie. Expired sessions are removed.
  pub async fn validate_session(&self, token: &str) -> Result<User, SignInError> {
    let session_required = || AuthError::new(AuthErrorType::SessionRequired);

    let token = SessionToken::from_string(token).map_err(|_| session_required())?;

    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or_else(session_required)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(session_required().into());
    }

    let user = self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or_else(session_required)?;

    Ok(user)
  }

  /// Deletes the session behind a cookie token. Unknown tokens are ignored.
  pub async fn sign_out(&self, token: &str) -> Result<(), RepositoryError> {
    let Ok(token) = SessionToken::from_string(token) else {
      return Ok(());
    };

    if let Some(session) = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
    {
      self.session_repo.delete(session.id).await?;
    }

    Ok(())
  }

  /// Creates a user unless one with the same email already exists.
  pub async fn ensure_user(
    &self,
    name: &str,
    email: &str,
    password: &str,
  ) -> Result<User, SignInError> {
    let invalid = || AuthError::new(AuthErrorType::Configuration);

    let email = Email::new(email).map_err(|_| invalid())?;
    let password = Password::new(password).map_err(|_| invalid())?;

    if let Some(existing) = self.user_repo.find_by_email(&email).await? {
      return Ok(existing);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(
      name.to_string(),
      email.into_inner(),
      password_hash.into_inner(),
    );

    Ok(self.user_repo.create(user).await?)
  }
}

#[async_trait]
impl SignInProvider for AuthService {
  async fn sign_in(
    &self,
    provider: &str,
    form: &FormData,
  ) -> Result<EstablishedSession, SignInError> {
    if provider != CREDENTIALS_PROVIDER {
      return Err(AuthError::new(AuthErrorType::ProviderNotFound).into());
    }

    self.authorize(form).await
  }
}

/// Only same-origin absolute paths are honoured as post-login targets.
pub fn safe_redirect_target(requested: Option<&str>) -> String {
  match requested {
    Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
      path.to_string()
    }
    _ => DEFAULT_REDIRECT.to_string(),
  }
}
