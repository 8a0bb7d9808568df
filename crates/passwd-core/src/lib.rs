//! `passwd-core`: password hashing and verification.
//!
//! Three families behind one [`PasswordHasher`] contract:
//! Argon2i (PHC strings), scrypt (libsodium `$7$` strings) and bcrypt
//! (`$2a$` strings). Artifacts carry their own parameters, so verification
//! needs nothing but the stored string. Plaintext buffers are wiped before
//! every call returns.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod presets;

pub mod hasher;

pub mod argon2i;
pub mod bcrypt;
pub mod scrypt;

pub mod config;

pub use argon2i::Argon2iHasher;
pub use bcrypt::BcryptHasher;
pub use config::HashingConfig;
pub use error::PasswdError;
pub use hasher::{verify_any, Algorithm, HashArtifact, PasswordHasher};
pub use memory::{constant_time_eq, wipe, WipeOnDrop};
pub use presets::{presets, Argon2iCost, BcryptCost, PresetTable, ScryptCost, Tier};
pub use scrypt::ScryptHasher;
