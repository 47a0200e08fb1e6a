//! # passgate
//!
//! Memory-hard password hashing and PHC credential encoding for device
//! gateways.
//!
//! The gateway's auth layer stores one credential per user as a
//! `$scrypt$N=..$r=..$p=..$<salt>$<key>` string and talks to three
//! functions: [`generate_salt`], [`hash_password`] and [`verify_password`].
//! Underneath sits a capability-gated scrypt backend (version floor plus
//! known-answer self-test, probed once per process) and a strict,
//! order-dependent PHC codec. Verification re-derives and compares the
//! 64-byte keys in constant time.

pub mod crypto;
pub mod kdf;
pub mod params;

// Re-export the surface the auth layer works with.
pub use crypto::password_hash::{hash_password, verify_password, HashError, PasswordHasher};
pub use crypto::phc::{ParseError, PhcHash};
pub use crypto::random::generate_salt;
pub use kdf::{DerivedKey, KdfBackend, KdfError, ProbeError, ProviderInfo};
pub use params::CostParams;
