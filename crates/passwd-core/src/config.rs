//! Hasher selection from a JSON document.
//!
//! Every field is optional; anything missing takes its default, so a file
//! holding only `{"algorithm": "scrypt"}` is a complete configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::argon2i::Argon2iHasher;
use crate::bcrypt::BcryptHasher;
use crate::error::PasswdError;
use crate::hasher::{Algorithm, PasswordHasher};
use crate::presets::{presets, Argon2iCost, BcryptCost, ScryptCost, Tier};
use crate::scrypt::ScryptHasher;

/// Which algorithm to hash new passwords with, and the cost of each family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HashingConfig {
    /// Family used by [`HashingConfig::build`].
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,

    /// Argon2i cost. Defaults to the interactive preset.
    #[serde(default)]
    pub argon2i: Argon2iCost,

    /// scrypt cost. Defaults to the interactive preset.
    #[serde(default)]
    pub scrypt: ScryptCost,

    /// bcrypt work factor. Defaults to 12.
    #[serde(default)]
    pub bcrypt: BcryptCost,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            argon2i: Argon2iCost::default(),
            scrypt: ScryptCost::default(),
            bcrypt: BcryptCost::default(),
        }
    }
}

const fn default_algorithm() -> Algorithm {
    Algorithm::Argon2i
}

impl HashingConfig {
    /// Configuration for `algorithm` with the costs of `tier`.
    ///
    /// scrypt has no moderate preset and keeps its interactive cost there.
    /// bcrypt always uses its default cost.
    #[must_use]
    pub fn for_tier(algorithm: Algorithm, tier: Tier) -> Self {
        let table = presets();
        Self {
            algorithm,
            argon2i: table.argon2i(tier),
            scrypt: table.scrypt(tier).unwrap_or(table.scrypt.interactive),
            bcrypt: table.bcrypt_default,
        }
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `PasswdError::InvalidConfig` if `json` is not a valid
    /// document (unknown algorithm names included).
    pub fn from_json(json: &str) -> Result<Self, PasswdError> {
        serde_json::from_str(json).map_err(|e| PasswdError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a configuration file.
    ///
    /// Unlike display preferences, a broken hashing config is not silently
    /// replaced with defaults.
    ///
    /// # Errors
    ///
    /// Returns `PasswdError::InvalidConfig` if the file cannot be read or
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self, PasswdError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PasswdError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(algorithm = %config.algorithm, path = %path.display(), "hashing config loaded");
        Ok(config)
    }

    /// Construct the selected hasher.
    ///
    /// Costs are not validated here; an unusable cost surfaces as
    /// `PasswdError::Configuration` on the first `hash`.
    #[must_use]
    pub fn build(&self) -> Box<dyn PasswordHasher> {
        match self.algorithm {
            Algorithm::Argon2i => Box::new(Argon2iHasher::new(self.argon2i)),
            Algorithm::Scrypt => Box::new(ScryptHasher::new(self.scrypt)),
            Algorithm::Bcrypt => Box::new(BcryptHasher::new(self.bcrypt)),
        }
    }
}
