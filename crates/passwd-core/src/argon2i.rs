//! Argon2i password hashing with PHC string artifacts.
//!
//! Artifacts look like
//! `$argon2i$v=19$m=<KiB>,t=<passes>,p=1$<b64 salt>$<b64 digest>`, the same
//! encoding libsodium's `crypto_pwhash_str` emits, so hashes move freely
//! between this crate and libsodium bindings in other languages.
//!
//! Cost mapping follows libsodium: `t = ops_limit`, `m = mem_limit / 1024`,
//! one lane, 16-byte random salt, 32-byte digest, Argon2 version 0x13.

use crate::error::PasswdError;
use crate::hasher::{artifact_text, Algorithm, HashArtifact, PasswordHasher};
use crate::memory::{reserve_working_memory, WipeOnDrop};
use crate::presets::Argon2iCost;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use rand::rngs::OsRng;

/// Digest length in bytes.
const OUTPUT_LEN: usize = 32;

/// Degree of parallelism. libsodium always uses a single lane.
const LANES: u32 = 1;

/// Argon2 block size in bytes.
const BLOCK_SIZE: usize = 1024;

/// Fewest passes accepted (libsodium `crypto_pwhash_argon2i_OPSLIMIT_MIN`).
pub const OPSLIMIT_MIN: u64 = 3;

/// Most passes accepted (`t_cost` is a `u32`).
pub const OPSLIMIT_MAX: u64 = u32::MAX as u64;

/// Smallest memory limit in bytes (`crypto_pwhash_argon2i_MEMLIMIT_MIN`).
pub const MEMLIMIT_MIN: usize = 8192;

// ---------------------------------------------------------------------------
// Hasher
// ---------------------------------------------------------------------------

/// Argon2i hasher bound to one cost. `Default` uses the interactive tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Argon2iHasher {
    cost: Argon2iCost,
}

impl Argon2iHasher {
    /// Create a hasher that hashes with `cost`.
    #[must_use]
    pub const fn new(cost: Argon2iCost) -> Self {
        Self { cost }
    }

    /// The cost new artifacts are produced with.
    #[must_use]
    pub const fn cost(&self) -> Argon2iCost {
        self.cost
    }

    /// Translate the libsodium-style cost into argon2 parameters.
    fn params(&self) -> Result<Params, PasswdError> {
        let Argon2iCost {
            ops_limit,
            mem_limit,
        } = self.cost;

        if !(OPSLIMIT_MIN..=OPSLIMIT_MAX).contains(&ops_limit) {
            return Err(PasswdError::Configuration(format!(
                "argon2i ops_limit {ops_limit} outside {OPSLIMIT_MIN}..={OPSLIMIT_MAX}"
            )));
        }
        if mem_limit < MEMLIMIT_MIN {
            return Err(PasswdError::Configuration(format!(
                "argon2i mem_limit {mem_limit} below minimum {MEMLIMIT_MIN} bytes"
            )));
        }

        let m_cost = u32::try_from(mem_limit / BLOCK_SIZE).map_err(|_| {
            PasswdError::Configuration(format!("argon2i mem_limit {mem_limit} too large"))
        })?;
        let t_cost = u32::try_from(ops_limit).map_err(|_| {
            PasswdError::Configuration(format!("argon2i ops_limit {ops_limit} too large"))
        })?;

        Params::new(m_cost, t_cost, LANES, Some(OUTPUT_LEN))
            .map_err(|e| PasswdError::Configuration(format!("argon2i params rejected: {e}")))
    }
}

impl PasswordHasher for Argon2iHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Argon2i
    }

    fn hash(&self, plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError> {
        let secret = WipeOnDrop::new(plaintext)?;
        let params = self.params().inspect_err(|e| {
            tracing::warn!(error = %e, "argon2i cost rejected");
        })?;
        reserve_working_memory(working_memory(&params)?)?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(argon2::Algorithm::Argon2i, Version::V0x13, params);
        let encoded = argon2
            .hash_password(secret.expose(), &salt)
            .map_err(|e| PasswdError::Hashing(format!("argon2i hashing failed: {e}")))?
            .to_string();

        tracing::debug!(
            ops_limit = self.cost.ops_limit,
            mem_limit = self.cost.mem_limit,
            "argon2i artifact produced"
        );
        Ok(HashArtifact::new(encoded))
    }

    fn verify(&self, plaintext: &mut [u8], artifact: &[u8]) -> bool {
        let Ok(secret) = WipeOnDrop::new(plaintext) else {
            return false;
        };
        let parsed = match parse_artifact(artifact) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "argon2i verify: artifact rejected");
                return false;
            }
        };
        let Ok(params) = Params::try_from(&parsed) else {
            return false;
        };
        if working_memory(&params)
            .and_then(reserve_working_memory)
            .is_err()
        {
            return false;
        }

        let matched = Argon2::default()
            .verify_password(secret.expose(), &parsed)
            .is_ok();
        tracing::debug!(matched, "argon2i verify");
        matched
    }

    fn needs_rehash(&self, artifact: &[u8]) -> Result<bool, PasswdError> {
        let parsed = parse_artifact(artifact)?;
        let stored = Params::try_from(&parsed)
            .map_err(|e| PasswdError::MalformedArtifact(format!("argon2i params: {e}")))?;
        let wanted = self.params()?;
        Ok(stored.m_cost() != wanted.m_cost()
            || stored.t_cost() != wanted.t_cost()
            || stored.p_cost() != wanted.p_cost())
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Hash `plaintext` with the interactive preset.
///
/// # Errors
///
/// See [`PasswordHasher::hash`].
pub fn hash_password(plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError> {
    Argon2iHasher::default().hash(plaintext)
}

/// Verify `plaintext` against an Argon2i artifact.
pub fn verify_password(plaintext: &mut [u8], artifact: &[u8]) -> bool {
    Argon2iHasher::default().verify(plaintext, artifact)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an Argon2i PHC artifact, rejecting other Argon2 variants.
fn parse_artifact(artifact: &[u8]) -> Result<PasswordHash<'_>, PasswdError> {
    let text = artifact_text(artifact, Algorithm::Argon2i.max_artifact_len()).ok_or_else(|| {
        PasswdError::MalformedArtifact("argon2i artifact empty, oversized or not UTF-8".into())
    })?;
    let parsed = PasswordHash::new(text)
        .map_err(|e| PasswdError::MalformedArtifact(format!("argon2i PHC string: {e}")))?;

    if !matches!(
        argon2::Algorithm::try_from(parsed.algorithm),
        Ok(argon2::Algorithm::Argon2i)
    ) {
        return Err(PasswdError::MalformedArtifact(format!(
            "expected argon2i, found {}",
            parsed.algorithm
        )));
    }
    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(PasswdError::MalformedArtifact(
            "argon2i artifact lacks salt or digest".into(),
        ));
    }
    Ok(parsed)
}

/// Bytes of block memory the KDF will allocate for `params`.
fn working_memory(params: &Params) -> Result<usize, PasswdError> {
    usize::try_from(params.m_cost())
        .ok()
        .and_then(|blocks| blocks.checked_mul(BLOCK_SIZE))
        .ok_or_else(|| {
            PasswdError::ResourceExhaustion(format!(
                "argon2i m_cost {} KiB not addressable",
                params.m_cost()
            ))
        })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
