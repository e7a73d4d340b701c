pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Session, User};
pub use errors::{AuthError, AuthErrorType, HashError, RepositoryError, SignInError};
pub use ports::{PasswordHasher, SessionRepository, SignInProvider, UserRepository};
pub use services::{AuthService, CREDENTIALS_PROVIDER, EstablishedSession, safe_redirect_target};
pub use value_objects::{Email, Password, PasswordHash, SessionToken, TokenHash};
