//!
//! Password hashing facade for the gateway's auth layer.
//!
//! Hashing produces a self-describing PHC credential; verification decodes
//! one, re-derives and compares key bytes in constant time. Comparing the
//! encoded strings is not an option: equality must be decided on the
//! derived keys only.

use base64::Engine;
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::phc::PhcHash;
use crate::crypto::random;
use crate::kdf::{KdfBackend, KdfError, ProbeError, DERIVED_KEY_LEN};
use crate::params::CostParams;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("key derivation backend unavailable: {0}")]
    BackendUnavailable(ProbeError),

    #[error(transparent)]
    Derivation(KdfError),
}

impl From<KdfError> for HashError {
    fn from(err: KdfError) -> Self {
        match err {
            KdfError::BackendUnavailable(reason) => HashError::BackendUnavailable(reason),
            other => HashError::Derivation(other),
        }
    }
}

/// Hashes and verifies passwords against one backend and one default cost.
pub struct PasswordHasher<'a> {
    backend: &'a KdfBackend,
    params: CostParams,
}

impl PasswordHasher<'static> {
    /// Facade over the shared process backend with the interactive-login
    /// cost.
    pub fn new() -> Self {
        Self {
            backend: KdfBackend::shared(),
            params: CostParams::DEFAULT,
        }
    }
}

impl Default for PasswordHasher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PasswordHasher<'a> {
    /// Facade over a specific backend and default cost. Lets tests and
    /// special wiring swap the provider or the price of a hash.
    pub fn with_backend(backend: &'a KdfBackend, params: CostParams) -> Self {
        Self { backend, params }
    }

    /// Hashes `password` with a fresh random salt, returning the encoded
    /// credential.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = random::generate_salt();
        self.hash_with_salt(password, &salt, &self.params)
    }

    /// Hashes `password` with a caller-chosen salt and cost.
    ///
    /// The salt text is embedded in the credential verbatim and its bytes
    /// are what the KDF consumes; it is expected to look like
    /// [`generate_salt`](crate::crypto::random::generate_salt) output
    /// (in particular, no `$`). Same password, salt and cost always yield
    /// the same credential.
    pub fn hash_with_salt(
        &self,
        password: &str,
        salt: &str,
        params: &CostParams,
    ) -> Result<String, HashError> {
        if password.is_empty() {
            return Err(HashError::InvalidInput("password must not be empty"));
        }
        if salt.is_empty() {
            return Err(HashError::InvalidInput("salt must not be empty"));
        }

        let key = self
            .backend
            .derive(password.as_bytes(), salt.as_bytes(), params)?;
        Ok(PhcHash::new(*params, salt, &key).encode())
    }

    /// Checks `password` against a stored credential.
    ///
    /// A credential that does not parse, or whose key field does not decode
    /// to the fixed key length, is simply no match (`Ok(false)`). Backend
    /// unavailability and derivation failures are errors, distinct from a
    /// mismatch.
    pub fn verify(&self, encoded: &str, password: &str) -> Result<bool, HashError> {
        let parsed = match PhcHash::decode(encoded) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(%err, "stored credential did not parse");
                return Ok(false);
            }
        };

        // No credential is ever issued for an empty password.
        if password.is_empty() {
            return Ok(false);
        }

        let stored = match base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(&parsed.key) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(_) => return Ok(false),
        };
        if stored.len() != DERIVED_KEY_LEN {
            return Ok(false);
        }

        let derived = self
            .backend
            .derive(password.as_bytes(), parsed.salt.as_bytes(), &parsed.params)?;

        Ok(derived.as_bytes().ct_eq(stored.as_slice()).into())
    }
}

/// Hashes `password` with a fresh salt and the interactive-login cost.
///
/// `None` when the password is empty or the backend is unavailable. The
/// auth layer treats `None` as "cannot set a password right now".
pub fn hash_password(password: &str) -> Option<String> {
    match PasswordHasher::new().hash(password) {
        Ok(encoded) => Some(encoded),
        Err(err) => {
            debug!(%err, "password hashing failed");
            None
        }
    }
}

/// Verifies `password` against a stored credential.
///
/// `false` on mismatch, malformed credential, or any backend failure; this
/// function never raises.
pub fn verify_password(encoded: &str, password: &str) -> bool {
    match PasswordHasher::new().verify(encoded, password) {
        Ok(matched) => matched,
        Err(err) => {
            debug!(%err, "password verification failed");
            false
        }
    }
}
