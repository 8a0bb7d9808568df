//! bcrypt password hashing with `$2a$` modular-crypt artifacts.
//!
//! New artifacts are written as `$2a$<cost>$<22-char salt><31-char digest>`
//! for compatibility with PHP `password_hash` and Go `x/crypto/bcrypt`.
//! `verify` accepts the `$2a$`, `$2b$`, `$2x$` and `$2y$` variants.
//!
//! Unlike the memory-hard hashers there is no working buffer to reserve, but
//! the plaintext is still wiped on every exit path.

use crate::error::PasswdError;
use crate::hasher::{artifact_text, Algorithm, HashArtifact, PasswordHasher};
use crate::memory::WipeOnDrop;
use crate::presets::BcryptCost;
use ::bcrypt::{BcryptError, Version};

/// bcrypt only consumes the first 72 bytes of the key.
pub const MAX_PLAINTEXT_LEN: usize = 72;

/// bcrypt hasher bound to one cost. `Default` uses cost 12.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: BcryptCost,
}

impl BcryptHasher {
    /// Create a hasher that hashes with `cost`.
    #[must_use]
    pub const fn new(cost: BcryptCost) -> Self {
        Self { cost }
    }

    /// The cost new artifacts are produced with.
    #[must_use]
    pub const fn cost(&self) -> BcryptCost {
        self.cost
    }
}

impl PasswordHasher for BcryptHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bcrypt
    }

    fn hash(&self, plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError> {
        let secret = WipeOnDrop::new(plaintext)?;
        if !self.cost.is_supported() {
            tracing::warn!(cost = self.cost.0, "bcrypt cost rejected");
            return Err(PasswdError::Configuration(format!(
                "bcrypt cost {} outside {}..={}",
                self.cost.0,
                BcryptCost::MIN.0,
                BcryptCost::MAX.0
            )));
        }
        // Refuse rather than silently hash a truncated secret.
        if secret.len() > MAX_PLAINTEXT_LEN {
            return Err(PasswdError::Configuration(format!(
                "bcrypt plaintext is {} bytes (maximum {MAX_PLAINTEXT_LEN})",
                secret.len()
            )));
        }

        let parts = ::bcrypt::hash_with_result(secret.expose(), self.cost.0).map_err(|e| match e {
            BcryptError::CostNotAllowed(cost) => {
                PasswdError::Configuration(format!("bcrypt cost {cost} not allowed"))
            }
            other => PasswdError::Hashing(format!("bcrypt failed: {other}")),
        })?;

        tracing::debug!(cost = self.cost.0, "bcrypt artifact produced");
        Ok(HashArtifact::new(parts.format_for_version(Version::TwoA)))
    }

    fn verify(&self, plaintext: &mut [u8], artifact: &[u8]) -> bool {
        let Ok(secret) = WipeOnDrop::new(plaintext) else {
            return false;
        };
        // The primitive would truncate, letting any longer suffix match.
        if secret.len() > MAX_PLAINTEXT_LEN {
            return false;
        }
        let Some(text) = artifact_text(artifact, Algorithm::Bcrypt.max_artifact_len()) else {
            return false;
        };
        if Algorithm::identify(text.as_bytes()) != Some(Algorithm::Bcrypt) {
            return false;
        }

        let matched = ::bcrypt::verify(secret.expose(), text).unwrap_or(false);
        tracing::debug!(matched, "bcrypt verify");
        matched
    }

    fn needs_rehash(&self, artifact: &[u8]) -> Result<bool, PasswdError> {
        Ok(embedded_cost(artifact)? != self.cost)
    }
}

/// Read the cost field of a bcrypt artifact.
fn embedded_cost(artifact: &[u8]) -> Result<BcryptCost, PasswdError> {
    let malformed = |what: &str| PasswdError::MalformedArtifact(format!("bcrypt artifact: {what}"));

    let text = artifact_text(artifact, Algorithm::Bcrypt.max_artifact_len())
        .ok_or_else(|| malformed("empty, oversized or not UTF-8"))?;
    if text.len() != Algorithm::Bcrypt.max_artifact_len()
        || Algorithm::identify(text.as_bytes()) != Some(Algorithm::Bcrypt)
    {
        return Err(malformed("not a $2?$ string of 60 characters"));
    }
    text.get(4..6)
        .and_then(|digits| digits.parse::<u32>().ok())
        .map(BcryptCost)
        .ok_or_else(|| malformed("bad cost"))
}

/// Hash `plaintext` with the default cost of 12.
///
/// # Errors
///
/// See [`PasswordHasher::hash`].
pub fn hash_password(plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError> {
    BcryptHasher::default().hash(plaintext)
}

/// Verify `plaintext` against a bcrypt artifact.
pub fn verify_password(plaintext: &mut [u8], artifact: &[u8]) -> bool {
    BcryptHasher::default().verify(plaintext, artifact)
}
