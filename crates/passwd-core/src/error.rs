//! Error types for `passwd-core`.

use thiserror::Error;

/// Errors produced by password hashing operations.
///
/// `verify` never surfaces these: any failure there (wrong password,
/// malformed artifact, oversized input) collapses to `false`.
#[derive(Debug, Error)]
pub enum PasswdError {
    /// Cost parameters rejected (out-of-range ops/mem limits, bcrypt cost
    /// outside 4..=31, over-long bcrypt plaintext).
    #[error("invalid cost parameters: {0}")]
    Configuration(String),

    /// The memory-hard KDF could not reserve its working buffer.
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// The plaintext buffer was empty.
    #[error("plaintext must not be empty")]
    EmptyPlaintext,

    /// Artifact does not parse as an encoding of the expected family.
    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    /// Any other failure reported by the underlying primitive (RNG, encoder).
    #[error("hashing failed: {0}")]
    Hashing(String),

    /// Hashing configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
