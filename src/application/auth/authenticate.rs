use std::sync::Arc;

use crate::domain::auth::{
  AuthErrorType, CREDENTIALS_PROVIDER, EstablishedSession, SignInError, SignInProvider,
};
use crate::domain::form_data::FormData;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

#[derive(Debug)]
pub enum SignInOutcome {
  SignedIn(EstablishedSession),
  /// Message to show above the login form
  Rejected(String),
}

/// Forwards login form fields to the credentials provider.
///
/// Authentication failures become a user-facing message; any other error is
/// returned untouched.
pub struct AuthenticateUseCase {
  provider: Arc<dyn SignInProvider>,
}

impl AuthenticateUseCase {
  pub fn new(provider: Arc<dyn SignInProvider>) -> Self {
    Self { provider }
  }

  pub async fn execute(&self, form: FormData) -> Result<SignInOutcome, SignInError> {
    match self.provider.sign_in(CREDENTIALS_PROVIDER, &form).await {
      Ok(session) => {
        tracing::info!("User {} signed in", session.user.id);
        Ok(SignInOutcome::SignedIn(session))
      }
      Err(SignInError::Auth(error)) => {
        tracing::info!("Sign-in rejected: {}", error.kind);
        let message = match error.kind {
          AuthErrorType::CredentialsSignin => INVALID_CREDENTIALS,
          _ => SOMETHING_WENT_WRONG,
        };
        Ok(SignInOutcome::Rejected(message.to_string()))
      }
      Err(other) => Err(other),
    }
  }
}
