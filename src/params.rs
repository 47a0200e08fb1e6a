//! Scrypt cost parameters.
//!
//! Pure domain model. Positivity is enforced at construction; interpretation
//! of the values (log2 conversion, memory footprint) belongs to the KDF
//! backend.

use serde::{Deserialize, Serialize};

/// The scrypt cost triple.
///
/// - `n`: CPU/memory cost. Conventionally a power of two; this type does not
///   enforce that, the backend rejects anything it cannot express.
/// - `r`: block size.
/// - `p`: parallelism.
///
/// Values are immutable once constructed. They come from a preset or from
/// decoding a stored credential, never from mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostParams {
    n: u64,
    r: u32,
    p: u32,
}

impl CostParams {
    /// Interactive-login cost used by the gateway when hashing a new
    /// password.
    pub const DEFAULT: CostParams = CostParams {
        n: 16384,
        r: 8,
        p: 1,
    };

    /// Minimal cost for fast tests. Matches the smallest published scrypt
    /// test vector, which is also the backend self-test input.
    pub const TEST: CostParams = CostParams { n: 16, r: 1, p: 1 };

    /// Builds a cost triple, rejecting zero in any position.
    pub fn new(n: u64, r: u32, p: u32) -> Result<Self, InvalidParams> {
        if n == 0 || r == 0 || p == 0 {
            return Err(InvalidParams { n, r, p });
        }
        Ok(Self { n, r, p })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }
}

impl Default for CostParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rejection of a cost triple with a zero in any position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cost parameters must be strictly positive (N={n}, r={r}, p={p})")]
pub struct InvalidParams {
    pub n: u64,
    pub r: u32,
    pub p: u32,
}
