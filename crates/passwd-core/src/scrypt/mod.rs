//! scrypt password hashing with libsodium `$7$` artifacts.
//!
//! Artifact layout (101 characters for artifacts produced here):
//!
//! ```text
//! $7$ N r....p.... <43-char salt> $ <43-char digest>
//!     │ └──┬─┘└─┬─┘
//!     │    │    └ p, 30 bits
//!     │    └ r, 30 bits
//!     └ log2(N), one character
//! ```
//!
//! Every field uses the [`crypt64`] alphabet. The scrypt salt input is the
//! salt's **encoded text**, not its decoded bytes. That is how libsodium's
//! escrypt defines the format, and artifacts from PHP/Python/Go libsodium
//! bindings only verify if the same convention is used here.

pub mod crypt64;

use crate::error::PasswdError;
use crate::hasher::{artifact_text, Algorithm, HashArtifact, PasswordHasher};
use crate::memory::{constant_time_eq, reserve_working_memory, WipeOnDrop};
use crate::presets::ScryptCost;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// Artifact tag.
const TAG: &str = "$7$";

/// Raw salt length in bytes (`crypto_pwhash_scryptsalsa208sha256_STRSALTBYTES`).
const SALT_LEN: usize = 32;

/// Digest length in bytes (`..._STRHASHBYTES`).
const DIGEST_LEN: usize = 32;

/// Encoded digest length in characters.
const DIGEST_ENCODED_LEN: usize = crypt64::encoded_len(DIGEST_LEN);

/// Characters taken by log2(N), r and p after the tag.
const PARAMS_ENCODED_LEN: usize = 11;

/// Block size parameter libsodium always picks.
const R: u32 = 8;

/// `ops_limit` floor applied before picking parameters.
const OPSLIMIT_FLOOR: u64 = 32_768;

/// Upper bound on `r * p`.
const MAX_RP: u64 = 0x3fff_ffff;

// ---------------------------------------------------------------------------
// Setting
// ---------------------------------------------------------------------------

/// The `$7$` header: cost parameters plus the encoded salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Setting<'a> {
    /// log2 of the CPU/memory cost `N`.
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelization.
    pub p: u32,
    /// Salt text, fed to the KDF as-is.
    pub salt: &'a str,
}

impl Setting<'_> {
    fn kdf_params(&self) -> Result<::scrypt::Params, PasswdError> {
        if self.log_n == 0 || self.log_n > 63 {
            return Err(PasswdError::Configuration(format!(
                "scrypt log2(N) {} outside 1..=63",
                self.log_n
            )));
        }
        if u64::from(self.r).saturating_mul(u64::from(self.p)) > MAX_RP {
            return Err(PasswdError::Configuration(format!(
                "scrypt r*p too large (r={}, p={})",
                self.r, self.p
            )));
        }
        ::scrypt::Params::new(self.log_n, self.r, self.p, DIGEST_LEN)
            .map_err(|e| PasswdError::Configuration(format!("scrypt params rejected: {e}")))
    }

    /// Bytes the KDF allocates up front: `V = 128 * r * N`,
    /// `B = 128 * r * p` and the `256 * r` mixing scratch.
    ///
    /// `B` may not outgrow `V`, i.e. `p <= N`.
    fn working_memory(&self) -> Result<usize, PasswdError> {
        let unaddressable = || {
            PasswdError::ResourceExhaustion(format!(
                "scrypt working set for log2(N)={} r={} p={} not addressable",
                self.log_n, self.r, self.p
            ))
        };
        let n = 1usize
            .checked_shl(u32::from(self.log_n))
            .ok_or_else(unaddressable)?;
        let p = usize::try_from(self.p).map_err(|_| unaddressable())?;
        if p > n {
            return Err(PasswdError::ResourceExhaustion(format!(
                "scrypt p={} exceeds N=2^{}",
                self.p, self.log_n
            )));
        }
        let block = usize::try_from(self.r)
            .ok()
            .and_then(|r| r.checked_mul(128))
            .ok_or_else(unaddressable)?;

        block
            .checked_mul(n)
            .and_then(|v| v.checked_add(block.checked_mul(p)?))
            .and_then(|vb| vb.checked_add(block.checked_mul(2)?))
            .ok_or_else(unaddressable)
    }
}

impl fmt::Display for Setting<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = String::with_capacity(TAG.len() + PARAMS_ENCODED_LEN);
        header.push_str(TAG);
        crypt64::encode_u32(&mut header, u32::from(self.log_n), 6);
        crypt64::encode_u32(&mut header, self.r, 30);
        crypt64::encode_u32(&mut header, self.p, 30);
        f.write_str(&header)?;
        f.write_str(self.salt)
    }
}

/// Split a `$7$` artifact into its setting and encoded digest.
///
/// The salt runs up to the last `'$'`, as in escrypt.
fn parse_artifact(artifact: &[u8]) -> Result<(Setting<'_>, &str), PasswdError> {
    let malformed = |what: &str| PasswdError::MalformedArtifact(format!("scrypt artifact: {what}"));

    let text = artifact_text(artifact, Algorithm::Scrypt.max_artifact_len())
        .ok_or_else(|| malformed("empty, oversized or not UTF-8"))?;
    let body = text.strip_prefix(TAG).ok_or_else(|| malformed("missing $7$ tag"))?;
    let raw = body.as_bytes();

    let log_n = raw
        .first()
        .and_then(|&c| crypt64::char_value(c))
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| malformed("bad N"))?;
    let r = raw
        .get(1..)
        .and_then(|s| crypt64::decode_u32(s, 30))
        .ok_or_else(|| malformed("bad r"))?;
    let p = raw
        .get(6..)
        .and_then(|s| crypt64::decode_u32(s, 30))
        .ok_or_else(|| malformed("bad p"))?;

    let rest = body
        .get(PARAMS_ENCODED_LEN..)
        .ok_or_else(|| malformed("truncated"))?;
    let (salt, digest) = rest
        .rsplit_once('$')
        .ok_or_else(|| malformed("missing digest"))?;
    if salt.is_empty() {
        return Err(malformed("empty salt"));
    }
    if digest.len() != DIGEST_ENCODED_LEN {
        return Err(malformed("digest has wrong length"));
    }

    Ok((Setting { log_n, r, p, salt }, digest))
}

/// libsodium `pickparams`: turn `(ops_limit, mem_limit)` into `(log2 N, r, p)`.
#[allow(clippy::arithmetic_side_effects)] // divisors are non-zero constants
fn pick_params(cost: ScryptCost) -> (u8, u32, u32) {
    let ops = cost.ops_limit.max(OPSLIMIT_FLOOR);
    let mem = u64::try_from(cost.mem_limit).unwrap_or(u64::MAX);

    if ops < mem / 32 {
        let max_n = ops / (u64::from(R) * 4);
        (log2_ceiling(max_n), R, 1)
    } else {
        let max_n = mem / (u64::from(R) * 128);
        let log_n = log2_ceiling(max_n);
        let max_rp = ((ops / 4) >> log_n).min(MAX_RP);
        // max_rp <= 2^30 - 1 fits in u32
        let p = u32::try_from(max_rp).unwrap_or(u32::MAX) / R;
        (log_n, R, p)
    }
}

/// Smallest `n` in `1..=63` with `2^n > max_n / 2`.
#[allow(clippy::arithmetic_side_effects)] // log_n < 63
fn log2_ceiling(max_n: u64) -> u8 {
    let half = max_n / 2;
    let mut log_n = 1u8;
    while log_n < 63 && (1u64 << log_n) <= half {
        log_n = log_n.saturating_add(1);
    }
    log_n
}

/// scrypt `password` under `setting` and encode the digest.
fn encoded_digest(
    password: &[u8],
    setting: &Setting<'_>,
    params: &::scrypt::Params,
) -> Result<String, PasswdError> {
    let mut digest = Zeroizing::new([0u8; DIGEST_LEN]);
    ::scrypt::scrypt(password, setting.salt.as_bytes(), params, digest.as_mut_slice())
        .map_err(|e| PasswdError::Hashing(format!("scrypt failed: {e}")))?;
    Ok(crypt64::encode_bytes(digest.as_slice()))
}

// ---------------------------------------------------------------------------
// Hasher
// ---------------------------------------------------------------------------

/// scrypt hasher bound to one cost. `Default` uses the interactive tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScryptHasher {
    cost: ScryptCost,
}

impl ScryptHasher {
    /// Create a hasher that hashes with `cost`.
    #[must_use]
    pub const fn new(cost: ScryptCost) -> Self {
        Self { cost }
    }

    /// The cost new artifacts are produced with.
    #[must_use]
    pub const fn cost(&self) -> ScryptCost {
        self.cost
    }

    /// The `(log2 N, r, p)` triple this hasher's cost maps to.
    #[must_use]
    pub fn kdf_parameters(&self) -> (u8, u32, u32) {
        pick_params(self.cost)
    }
}

impl PasswordHasher for ScryptHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Scrypt
    }

    fn hash(&self, plaintext: &mut [u8]) -> Result<HashArtifact, PasswdError> {
        let secret = WipeOnDrop::new(plaintext)?;
        let (log_n, r, p) = pick_params(self.cost);
        let candidate = Setting {
            log_n,
            r,
            p,
            salt: "",
        };
        let working_set = candidate.working_memory().inspect_err(|e| {
            tracing::warn!(error = %e, "scrypt working set rejected");
        })?;
        let params = candidate.kdf_params().inspect_err(|e| {
            tracing::warn!(error = %e, "scrypt cost rejected");
        })?;
        reserve_working_memory(working_set)?;

        let mut salt_bytes = Zeroizing::new([0u8; SALT_LEN]);
        OsRng
            .try_fill_bytes(salt_bytes.as_mut_slice())
            .map_err(|e| PasswdError::Hashing(format!("CSPRNG fill failed: {e}")))?;
        let salt = crypt64::encode_bytes(salt_bytes.as_slice());
        let setting = Setting {
            salt: &salt,
            ..candidate
        };

        let digest = encoded_digest(secret.expose(), &setting, &params)?;
        let encoded = format!("{setting}${digest}");

        tracing::debug!(log_n, r, p, "scrypt artifact produced");
        Ok(HashArtifact::new(encoded))
    }

    fn verify(&self, plaintext: &mut [u8], artifact: &[u8]) -> bool {
        let Ok(secret) = WipeOnDrop::new(plaintext) else {
            return false;
        };
        let (setting, stored) = match parse_artifact(artifact) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::debug!(error = %e, "scrypt verify: artifact rejected");
                return false;
            }
        };
        let Ok(params) = setting.kdf_params() else {
            return false;
        };
        if setting
            .working_memory()
            .and_then(reserve_working_memory)
            .is_err()
        {
            return false;
        }
        let Ok(computed) = encoded_digest(secret.expose(), &setting, &params) else {
            return false;
        };

        let matched = constant_time_eq(computed.as_bytes(), stored.as_bytes());
        tracing::debug!(matched, "scrypt verify");
        matched
    }

    fn needs_rehash(&self, artifact: &[u8]) -> Result<bool, PasswdError> {
        let (setting, _) = parse_artifact(artifact)?;
        Ok((setting.log_n, setting.r, setting.p) != pick_params(self.cost))
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
    ScryptHasher::default().hash(plaintext)
}

/// Verify `plaintext` against a `$7$` artifact.
pub fn verify_password(plaintext: &mut [u8], artifact: &[u8]) -> bool {
    ScryptHasher::default().verify(plaintext, artifact)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
