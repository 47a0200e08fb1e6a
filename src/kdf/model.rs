//! KDF output and error types.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::kdf::probe::ProbeError;

/// Fixed derived-key length in bytes. Callers never choose an output length.
pub const DERIVED_KEY_LEN: usize = 64;

/// A 64-byte scrypt output.
///
/// Produced only by a KDF backend. Equality is constant-time, `Debug` is
/// redacted, and the bytes are wiped on drop.
pub struct DerivedKey([u8; DERIVED_KEY_LEN]);

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; DERIVED_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for DerivedKey {}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KdfError {
    /// The capability probe failed; no derivations are possible.
    #[error("key derivation backend unavailable: {0}")]
    BackendUnavailable(ProbeError),

    /// The provider rejected the cost parameter combination.
    #[error("cost parameters rejected: {0}")]
    ParameterRejected(String),

    /// The provider accepted the parameters but derivation failed.
    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}
