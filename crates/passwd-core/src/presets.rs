//! Cost parameters and named difficulty tiers.
//!
//! This module provides:
//! - [`Argon2iCost`] / [`ScryptCost`]: `(ops_limit, mem_limit)` pairs, one
//!   type per family so they cannot be mixed up
//! - [`BcryptCost`]: bcrypt's single work factor
//! - [`Tier`]: Interactive / Moderate / Sensitive selector
//! - [`presets`]: process-wide, lazily built, read-only preset table
//!
//! # Preset values
//!
//! The tier values are libsodium's published recommendations
//! (`crypto_pwhash_argon2i_*` and `crypto_pwhash_scryptsalsa208sha256_*`),
//! so artifacts produced here carry the same parameters as artifacts
//! produced by libsodium bindings in other languages. libsodium defines no
//! moderate tier for scrypt.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Argon2i interactive operations limit (passes over memory).
pub const ARGON2I_OPSLIMIT_INTERACTIVE: u64 = 4;
/// Argon2i interactive memory limit in bytes (32 MiB).
pub const ARGON2I_MEMLIMIT_INTERACTIVE: usize = 33_554_432;
/// Argon2i moderate operations limit.
pub const ARGON2I_OPSLIMIT_MODERATE: u64 = 6;
/// Argon2i moderate memory limit in bytes (128 MiB).
pub const ARGON2I_MEMLIMIT_MODERATE: usize = 134_217_728;
/// Argon2i sensitive operations limit.
pub const ARGON2I_OPSLIMIT_SENSITIVE: u64 = 8;
/// Argon2i sensitive memory limit in bytes (512 MiB).
pub const ARGON2I_MEMLIMIT_SENSITIVE: usize = 536_870_912;

/// scrypt interactive operations limit.
pub const SCRYPT_OPSLIMIT_INTERACTIVE: u64 = 524_288;
/// scrypt interactive memory limit in bytes (16 MiB).
pub const SCRYPT_MEMLIMIT_INTERACTIVE: usize = 16_777_216;
/// scrypt sensitive operations limit.
pub const SCRYPT_OPSLIMIT_SENSITIVE: u64 = 33_554_432;
/// scrypt sensitive memory limit in bytes (1 GiB).
pub const SCRYPT_MEMLIMIT_SENSITIVE: usize = 1_073_741_824;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Difficulty tier selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Fast enough for synchronous login paths.
    Interactive,
    /// Middle ground. Argon2i only.
    Moderate,
    /// Slow; for high-value secrets such as master keys.
    Sensitive,
}

impl Tier {
    /// All tiers, fastest first.
    pub const ALL: [Self; 3] = [Self::Interactive, Self::Moderate, Self::Sensitive];
}

/// Argon2i cost: `ops_limit` passes over `mem_limit` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argon2iCost {
    /// Number of passes (Argon2 `t_cost`).
    pub ops_limit: u64,
    /// Memory in bytes. Argon2 works in KiB, so this is divided by 1024.
    pub mem_limit: usize,
}

impl Argon2iCost {
    /// Build a cost from explicit limits. Validation happens at hash time.
    #[must_use]
    pub const fn new(ops_limit: u64, mem_limit: usize) -> Self {
        Self {
            ops_limit,
            mem_limit,
        }
    }

    /// The interactive tier.
    #[must_use]
    pub const fn interactive() -> Self {
        Self::new(ARGON2I_OPSLIMIT_INTERACTIVE, ARGON2I_MEMLIMIT_INTERACTIVE)
    }

    /// The moderate tier.
    #[must_use]
    pub const fn moderate() -> Self {
        Self::new(ARGON2I_OPSLIMIT_MODERATE, ARGON2I_MEMLIMIT_MODERATE)
    }

    /// The sensitive tier.
    #[must_use]
    pub const fn sensitive() -> Self {
        Self::new(ARGON2I_OPSLIMIT_SENSITIVE, ARGON2I_MEMLIMIT_SENSITIVE)
    }

    /// Look up `tier` in the shared preset table.
    #[must_use]
    pub fn preset(tier: Tier) -> Self {
        presets().argon2i(tier)
    }
}

impl Default for Argon2iCost {
    fn default() -> Self {
        Self::interactive()
    }
}

/// scrypt cost: libsodium-style `(ops_limit, mem_limit)`, converted to
/// `(N, r, p)` when hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScryptCost {
    /// Approximate number of salsa20/8 core invocations.
    pub ops_limit: u64,
    /// Memory budget in bytes.
    pub mem_limit: usize,
}

impl ScryptCost {
    /// Build a cost from explicit limits.
    #[must_use]
    pub const fn new(ops_limit: u64, mem_limit: usize) -> Self {
        Self {
            ops_limit,
            mem_limit,
        }
    }

    /// The interactive tier.
    #[must_use]
    pub const fn interactive() -> Self {
        Self::new(SCRYPT_OPSLIMIT_INTERACTIVE, SCRYPT_MEMLIMIT_INTERACTIVE)
    }

    /// The sensitive tier.
    #[must_use]
    pub const fn sensitive() -> Self {
        Self::new(SCRYPT_OPSLIMIT_SENSITIVE, SCRYPT_MEMLIMIT_SENSITIVE)
    }

    /// Look up `tier` in the shared preset table. `None` for
    /// [`Tier::Moderate`].
    #[must_use]
    pub fn preset(tier: Tier) -> Option<Self> {
        presets().scrypt(tier)
    }
}

impl Default for ScryptCost {
    fn default() -> Self {
        Self::interactive()
    }
}

/// bcrypt work factor (log2 of the key-schedule rounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BcryptCost(pub u32);

impl BcryptCost {
    /// Smallest cost the primitive accepts.
    pub const MIN: Self = Self(4);
    /// Largest cost the primitive accepts.
    pub const MAX: Self = Self(31);
    /// Default cost, see <http://security.stackexchange.com/q/17207>.
    pub const DEFAULT: Self = Self(12);

    /// Returns `true` if the primitive will accept this cost.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.0 >= Self::MIN.0 && self.0 <= Self::MAX.0
    }
}

impl Default for BcryptCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Preset table
// ---------------------------------------------------------------------------

/// Argon2i costs for every tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Argon2iPresets {
    /// Interactive tier.
    pub interactive: Argon2iCost,
    /// Moderate tier.
    pub moderate: Argon2iCost,
    /// Sensitive tier.
    pub sensitive: Argon2iCost,
}

/// scrypt costs for the tiers upstream defines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScryptPresets {
    /// Interactive tier.
    pub interactive: ScryptCost,
    /// Sensitive tier.
    pub sensitive: ScryptCost,
}

/// Immutable lookup table of every named preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetTable {
    /// Argon2i tiers.
    pub argon2i: Argon2iPresets,
    /// scrypt tiers.
    pub scrypt: ScryptPresets,
    /// bcrypt default cost.
    pub bcrypt_default: BcryptCost,
}

impl PresetTable {
    fn build() -> Self {
        Self {
            argon2i: Argon2iPresets {
                interactive: Argon2iCost::interactive(),
                moderate: Argon2iCost::moderate(),
                sensitive: Argon2iCost::sensitive(),
            },
            scrypt: ScryptPresets {
                interactive: ScryptCost::interactive(),
                sensitive: ScryptCost::sensitive(),
            },
            bcrypt_default: BcryptCost::DEFAULT,
        }
    }

    /// Argon2i cost for `tier`.
    #[must_use]
    pub const fn argon2i(&self, tier: Tier) -> Argon2iCost {
        match tier {
            Tier::Interactive => self.argon2i.interactive,
            Tier::Moderate => self.argon2i.moderate,
            Tier::Sensitive => self.argon2i.sensitive,
        }
    }

    /// scrypt cost for `tier`, `None` where upstream defines no such tier.
    #[must_use]
    pub const fn scrypt(&self, tier: Tier) -> Option<ScryptCost> {
        match tier {
            Tier::Interactive => Some(self.scrypt.interactive),
            Tier::Moderate => None,
            Tier::Sensitive => Some(self.scrypt.sensitive),
        }
    }
}

static PRESETS: LazyLock<PresetTable> = LazyLock::new(PresetTable::build);

/// The shared preset table. Built on first access, never mutated afterwards.
#[must_use]
pub fn presets() -> &'static PresetTable {
    &PRESETS
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
