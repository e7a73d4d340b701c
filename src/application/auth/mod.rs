//! Sign-in and sign-out use cases

mod authenticate;
mod sign_out;

pub use authenticate::{
  AuthenticateUseCase, INVALID_CREDENTIALS, SOMETHING_WENT_WRONG, SignInOutcome,
};
pub use sign_out::SignOutUseCase;
