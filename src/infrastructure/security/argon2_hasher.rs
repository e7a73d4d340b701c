use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher
///
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// Hashing runs on the blocking pool so request workers are not stalled.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, HashError> {
    let params = Params::new(19456, 2, 1, Some(32))
      .map_err(|e| HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| HashError::HashingFailed(e.to_string()))??;

    PasswordHash::from_hash(hash).map_err(|_| HashError::InvalidFormat)
  }

  /// Constant-time comparison is done by argon2's `verify_password`.
  async fn verify(&self, password: &Password, hashed: &PasswordHash) -> Result<bool, HashError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();
    let hashed = hashed.as_str().to_string();

    tokio::task::spawn_blocking(move || -> Result<bool, HashError> {
      let parsed_hash = Argon2PasswordHash::new(&hashed)?;

      match argon2.verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::from(e)),
      }
    })
    .await
    .map_err(|e| HashError::VerificationFailed(e.to_string()))?
  }
}
