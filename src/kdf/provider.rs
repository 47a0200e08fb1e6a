//! Provider port for the scrypt primitive.
//!
//! The backend reaches the actual KDF implementation through this seam, so
//! availability policy (version gate, self-test) stays testable with stub
//! providers. Single-domain port, kept inside the `kdf` module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kdf::model::KdfError;
use crate::params::CostParams;

/// Minimum provider version the gateway accepts. Older bindings fail the
/// capability probe and the whole subsystem reports itself unavailable.
pub const MIN_PROVIDER_VERSION: ProviderVersion = ProviderVersion::new(0, 11, 0);

/// Ceiling on the working memory a single derivation may commit, in bytes.
///
/// Stored credentials carry their own cost parameters, so a derivation
/// request can name arbitrarily large values; anything above this ceiling
/// is rejected before allocation. The default cost (N=16384, r=8) needs
/// 16 MiB of the 32 MiB allowance.
pub const MAX_DERIVE_MEMORY_BYTES: u64 = 32 * 1024 * 1024;

/// Provider version triple. Ordering is lexicographic by field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ProviderVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ProviderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Binding to a concrete scrypt implementation.
///
/// Derivation is synchronous and CPU-bound; callers that need concurrency
/// offload to their own workers.
pub trait KdfProviderPort: Send + Sync {
    /// Stable provider name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Version reported by the binding, checked against
    /// [`MIN_PROVIDER_VERSION`] during the capability probe.
    fn version(&self) -> ProviderVersion;

    /// Derives `out.len()` bytes of scrypt output.
    ///
    /// Empty `password` and `salt` are legal at this layer; input policy
    /// belongs to the hashing facade. Cost parameters whose working memory
    /// would exceed [`MAX_DERIVE_MEMORY_BYTES`] are rejected with
    /// [`KdfError::ParameterRejected`], never attempted.
    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &CostParams,
        out: &mut [u8],
    ) -> Result<(), KdfError>;
}
