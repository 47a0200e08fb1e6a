//! Capability-gated scrypt key derivation.
//!
//! - **provider port**: the seam to the actual primitive, with a version
//!   floor for accepted bindings
//! - **capability probe**: one-shot version gate plus known-answer self-test
//! - **backend**: write-once probe cache, fixed 64-byte output

pub mod backend;
pub mod model;
pub mod probe;
pub mod provider;
pub mod scrypt;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::KdfBackend;
pub use model::{DerivedKey, KdfError, DERIVED_KEY_LEN};
pub use probe::{probe, ProbeError, ProviderInfo};
pub use provider::{
    KdfProviderPort, ProviderVersion, MAX_DERIVE_MEMORY_BYTES, MIN_PROVIDER_VERSION,
};
pub use scrypt::ScryptProvider;
