//! Secret hygiene for caller-supplied plaintext buffers.
//!
//! This module provides:
//! - [`WipeOnDrop`]: takes custody of a `&mut [u8]` and zeroes it via
//!   [`zeroize`] when dropped, so every exit path (early `?` return, success,
//!   unwinding) leaves the caller's buffer all-zero
//! - [`constant_time_eq`]: digest comparison without short-circuiting
//! - [`reserve_working_memory`]: fallible trial reservation of a KDF working set

use crate::error::PasswdError;
use std::fmt;
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// WipeOnDrop
// ---------------------------------------------------------------------------

/// Exclusive borrow of a plaintext buffer that is zeroed on drop.
///
/// Every `hash`/`verify` in this crate routes the caller's plaintext through
/// this guard before touching it. The guard holds the only mutable borrow,
/// so the caller cannot observe or reuse the buffer until the wipe happened.
pub struct WipeOnDrop<'a> {
    buf: &'a mut [u8],
}

impl<'a> WipeOnDrop<'a> {
    /// Take custody of `buf`.
    ///
    /// # Errors
    ///
    /// Returns `PasswdError::EmptyPlaintext` for a zero-length buffer; there
    /// is nothing to hash and nothing to wipe.
    pub fn new(buf: &'a mut [u8]) -> Result<Self, PasswdError> {
        if buf.is_empty() {
            return Err(PasswdError::EmptyPlaintext);
        }
        Ok(Self { buf })
    }

    /// Expose the plaintext for the duration of the cryptographic call.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.buf
    }

    /// Returns the number of plaintext bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always `false`: construction rejects empty buffers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Drop for WipeOnDrop<'_> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

impl fmt::Debug for WipeOnDrop<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WipeOnDrop(***)")
    }
}

/// Zero `buf` in place. No-op on an empty slice.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Constant-time byte comparison for encoded digests.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// The early return on length mismatch only reveals the digest length, which
/// is fixed per algorithm and public.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ---------------------------------------------------------------------------
// Working memory
// ---------------------------------------------------------------------------

/// Check that `bytes` of working memory can be reserved right now.
///
/// The KDF crates allocate infallibly, so an oversized memory limit would
/// abort the process. Probing with `try_reserve_exact` first turns that into
/// a recoverable error. The reservation is released before returning.
///
/// # Errors
///
/// Returns `PasswdError::ResourceExhaustion` if the reservation fails.
pub fn reserve_working_memory(bytes: usize) -> Result<(), PasswdError> {
    let mut trial: Vec<u8> = Vec::new();
    trial.try_reserve_exact(bytes).map_err(|e| {
        tracing::warn!(bytes, "KDF working memory reservation failed");
        PasswdError::ResourceExhaustion(format!("cannot reserve {bytes} bytes: {e}"))
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
