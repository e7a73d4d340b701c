use std::sync::Arc;

use crate::domain::auth::{AuthService, RepositoryError};

pub struct SignOutUseCase {
  auth_service: Arc<AuthService>,
}

impl SignOutUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Ends the session behind the cookie, if there is one.
  pub async fn execute(&self, token: Option<&str>) -> Result<(), RepositoryError> {
    match token {
      Some(token) => self.auth_service.sign_out(token).await,
      None => Ok(()),
    }
  }
}
