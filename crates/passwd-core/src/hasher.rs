//! The shared hash/verify contract and algorithm selection.
//!
//! All three hashers implement [`PasswordHasher`], so a host application can
//! hold a `Box<dyn PasswordHasher>` chosen at runtime (see
//! [`crate::config::HashingConfig`]) and treat them uniformly. Artifacts are
//! self-describing: [`Algorithm::identify`] reads the family from the tag and
//! [`verify_any`] dispatches on it.

use crate::argon2i::Argon2iHasher;
use crate::bcrypt::BcryptHasher;
use crate::error::PasswdError;
use crate::memory::wipe;
use crate::scrypt::ScryptHasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// libsodium `crypto_pwhash_STRBYTES`, terminator included.
pub const ARGON2I_STR_BYTES: usize = 128;

/// libsodium `crypto_pwhash_scryptsalsa208sha256_STRBYTES`, terminator included.
pub const SCRYPT_STR_BYTES: usize = 102;

/// Length of a modular-crypt bcrypt string.
pub const BCRYPT_ARTIFACT_LEN: usize = 60;

const BCRYPT_PREFIXES: [&[u8]; 4] = [b"$2a$", b"$2b$", b"$2x$", b"$2y$"];

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Password hashing algorithm family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Argon2i v1.3, PHC string encoding.
    Argon2i,
    /// scrypt (salsa20/8, SHA-256), libsodium `$7$` encoding.
    Scrypt,
    /// bcrypt, `$2a$` modular-crypt encoding.
    Bcrypt,
}

impl Algorithm {
    /// Identify the family of an artifact from its tag.
    ///
    /// Only the prefix is inspected; a `Some` result does not mean the
    /// artifact is well formed.
    #[must_use]
    pub fn identify(artifact: &[u8]) -> Option<Self> {
        if artifact.starts_with(b"$argon2i$") {
            Some(Self::Argon2i)
        } else if artifact.starts_with(b"$7$") {
            Some(Self::Scrypt)
        } else if BCRYPT_PREFIXES.iter().any(|p| artifact.starts_with(p)) {
            Some(Self::Bcrypt)
        } else {
            None
        }
    }

    /// Longest artifact text this family can produce or accept.
    #[must_use]
    pub const fn max_artifact_len(self) -> usize {
        match self {
            Self::Argon2i => ARGON2I_STR_BYTES - 1,
            Self::Scrypt => SCRYPT_STR_BYTES - 1,
            Self::Bcrypt => BCRYPT_ARTIFACT_LEN,
        }
    }

    /// Lowercase name, as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argon2i => "argon2i",
            Self::Scrypt => "scrypt",
            Self::Bcrypt => "bcrypt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HashArtifact
// ---------------------------------------------------------------------------

/// Self-describing hash string: tag, parameters, salt and digest.
///
/// Holds ASCII text without a NUL terminator. Store it as-is; it carries
/// everything `verify` needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashArtifact(String);

impl HashArtifact {
    pub(crate) const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// The artifact text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The artifact bytes, suitable for `verify`.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume the artifact, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the artifact text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the artifact text is empty (never for hasher output).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The family named by the artifact's tag.
    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        Algorithm::identify(self.as_bytes())
    }
}

impl fmt::Display for HashArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for HashArtifact {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<str> for HashArtifact {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HashArtifact> for String {
    fn from(artifact: HashArtifact) -> Self {
        artifact.0
    }
}

impl From<HashArtifact> for Vec<u8> {
    fn from(artifact: HashArtifact) -> Self {
        artifact.0.into_bytes()
    }
}

/// Reduce caller-supplied artifact bytes to text that is safe to parse.
///
/// Everything from the first NUL on is a C-style terminator (plus padding)
/// and is dropped. The remainder must be non-empty, at most `max_len` bytes
/// and valid UTF-8; anything else fails closed with `None`.
pub(crate) fn artifact_text(artifact: &[u8], max_len: usize) -> Option<&str> {
    let end = artifact
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(artifact.len());
    let text = artifact.get(..end)?;
    if text.is_empty() || text.len() > max_len {
        return None;
    }
    std::str::from_utf8(text).ok()
}

// ---------------------------------------------------------------------------
// PasswordHasher
// ---------------------------------------------------------------------------

/// Configure → hash → verify, for one algorithm family.
///
/// Plaintext buffers are borrowed mutably and are **all-zero when the call
/// returns**, whatever the outcome. Do not pass a buffer you still need.
pub trait PasswordHasher: Send + Sync {
    /// The family this hasher produces and accepts.
    fn algorithm(&self) -> Algorithm;

    /// Hash `plaintext` with this hasher's cost and a fresh random salt.
    ///
    /// # Errors
    ///
    /// - `PasswdError::EmptyPlaintext` for an empty buffer
    /// - `PasswdError::Configuration` for an unusable cost
    /// - `PasswdError::ResourceExhaustion` if the working memory cannot be had
    /// - `PasswdError::Hashing` for any other primitive failure
    fn hash(&self, plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError>;

    /// Check `plaintext` against `artifact` using the parameters embedded in
    /// the artifact. Returns `false` on mismatch and on any malformed input.
    fn verify(&self, plaintext: &mut [u8], artifact: &[u8]) -> bool;

    /// Whether `artifact` was produced with a cost other than this hasher's.
    ///
    /// # Errors
    ///
    /// Returns `PasswdError::MalformedArtifact` if `artifact` is not a valid
    /// artifact of this family.
    fn needs_rehash(&self, artifact: &[u8]) -> Result<bool, PasswdError>;
}

/// Verify `plaintext` against an artifact of any supported family.
///
/// The family is read from the tag. Unknown tags verify as `false`; the
/// plaintext is wiped either way.
pub fn verify_any(plaintext: &mut [u8], artifact: &[u8]) -> bool {
    match Algorithm::identify(artifact) {
        Some(Algorithm::Argon2i) => Argon2iHasher::default().verify(plaintext, artifact),
        Some(Algorithm::Scrypt) => ScryptHasher::default().verify(plaintext, artifact),
        Some(Algorithm::Bcrypt) => BcryptHasher::default().verify(plaintext, artifact),
        None => {
            tracing::debug!("verify_any: unrecognised artifact tag");
            wipe(plaintext);
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
