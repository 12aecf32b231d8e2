//! Argon2id implementation of [`PasswordHasher`].
//!
//! Derivation runs on tokio's blocking pool so a login never stalls an
//! actix worker.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use async_trait::async_trait;
use rand::RngCore;
use tokio::task::JoinError;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

const SALT_LEN: usize = 16;

/// Hashes with the crate's default Argon2id parameters and a random salt.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_blocking(&self, password: &[u8]) -> Result<PasswordHash, PasswordHasherError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        let encoded = self
            .argon
            .hash_password(password, &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify_blocking(
        &self,
        password: &[u8],
        hash: &str,
    ) -> Result<bool, PasswordHasherError> {
        let parsed = EncodedHash::new(hash)
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self.argon.verify_password(password, &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
        }
    }
}

fn map_join_error(err: JoinError) -> PasswordHasherError {
    PasswordHasherError::worker(err.to_string())
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(map_join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let hasher = self.clone();
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let hash = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash))
            .await
            .map_err(map_join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_only_the_original_password() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse").await.expect("hash");

        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same password").await.expect("hash");
        let second = hasher.hash("same password").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_errors() {
        let hasher = Argon2PasswordHasher::new();
        let err = hasher
            .verify("pw", &PasswordHash::new("plaintext"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }

    #[rstest]
    #[tokio::test(flavor = "current_thread")]
    async fn derivation_leaves_the_executor_free() {
        let hasher = Argon2PasswordHasher::new();
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        let ticker = tokio::spawn(async move {
            tokio::task::yield_now().await;
            let _ = tx.send(());
        });

        let hash = hasher.hash("correct horse").await.expect("hash");

        // On a single-threaded runtime the ticker only completes if hashing
        // yielded the thread while the derivation ran.
        assert!(rx.try_recv().is_ok());
        ticker.await.expect("ticker task");
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
    }
}
