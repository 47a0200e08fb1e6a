//! Capability-gated KDF backend.

use std::sync::OnceLock;

use crate::kdf::model::{DerivedKey, KdfError, DERIVED_KEY_LEN};
use crate::kdf::probe::{self, ProbeError, ProviderInfo};
use crate::kdf::provider::KdfProviderPort;
use crate::kdf::scrypt::ScryptProvider;
use crate::params::CostParams;

/// Gate between callers and the scrypt provider.
///
/// The first use runs the capability probe and the allow/deny outcome is
/// cached write-once for the lifetime of the value; a backend never flips
/// between available and unavailable. The facade works against the
/// [`KdfBackend::shared`] instance, which carries that semantics for the
/// whole process.
pub struct KdfBackend {
    provider: Box<dyn KdfProviderPort>,
    probe_result: OnceLock<Result<ProviderInfo, ProbeError>>,
}

impl KdfBackend {
    /// Backend over the production scrypt provider.
    pub fn new() -> Self {
        Self::with_provider(Box::new(ScryptProvider))
    }

    /// Backend over an arbitrary provider (tests, alternative bindings).
    pub fn with_provider(provider: Box<dyn KdfProviderPort>) -> Self {
        Self {
            provider,
            probe_result: OnceLock::new(),
        }
    }

    /// The process-wide backend used by the hashing facade.
    pub fn shared() -> &'static KdfBackend {
        static SHARED: OnceLock<KdfBackend> = OnceLock::new();
        SHARED.get_or_init(KdfBackend::new)
    }

    /// Probe outcome for this backend, running the probe on first call.
    ///
    /// Also the gateway's diagnostics answer to "is password hashing
    /// available, and through what".
    pub fn status(&self) -> Result<ProviderInfo, ProbeError> {
        self.probe_result
            .get_or_init(|| probe::probe(self.provider.as_ref()))
            .clone()
    }

    /// Derives the fixed-length key for `password` and `salt`.
    ///
    /// Same inputs always produce the same key. Empty inputs are legal
    /// here; the facade applies input policy.
    pub fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &CostParams,
    ) -> Result<DerivedKey, KdfError> {
        self.status().map_err(KdfError::BackendUnavailable)?;

        let mut out = [0u8; DERIVED_KEY_LEN];
        self.provider.derive(password, salt, params, &mut out)?;
        Ok(DerivedKey::from_bytes(out))
    }
}

impl Default for KdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::provider::{ProviderVersion, MIN_PROVIDER_VERSION};
    use crate::kdf::test_support::{BrokenProvider, StaleProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Delegates to the real provider while counting derive calls.
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    impl KdfProviderPort for CountingProvider {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn version(&self) -> ProviderVersion {
            MIN_PROVIDER_VERSION
        }

        fn derive(
            &self,
            password: &[u8],
            salt: &[u8],
            params: &CostParams,
            out: &mut [u8],
        ) -> Result<(), KdfError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ScryptProvider.derive(password, salt, params, out)
        }
    }

    #[test]
    fn derive_is_deterministic_across_instances() {
        let a = KdfBackend::new()
            .derive(b"hunter2", b"fixed salt", &CostParams::TEST)
            .expect("derive");
        let b = KdfBackend::new()
            .derive(b"hunter2", b"fixed salt", &CostParams::TEST)
            .expect("derive");
        assert_eq!(a, b);
    }

    #[test]
    fn derive_output_has_fixed_length() {
        let key = KdfBackend::new()
            .derive(b"pw", b"salt", &CostParams::TEST)
            .expect("derive");
        assert_eq!(key.as_bytes().len(), DERIVED_KEY_LEN);
    }

    #[test]
    fn unavailable_backend_reports_probe_reason() {
        let backend = KdfBackend::with_provider(Box::new(StaleProvider));
        let err = backend
            .derive(b"pw", b"salt", &CostParams::TEST)
            .expect_err("unavailable");
        assert!(matches!(
            err,
            KdfError::BackendUnavailable(ProbeError::VersionBelowMinimum { .. })
        ));
        assert!(backend.status().is_err());
    }

    #[test]
    fn probe_failure_is_sticky() {
        let backend = KdfBackend::with_provider(Box::new(BrokenProvider));
        for _ in 0..3 {
            assert!(matches!(
                backend.derive(b"pw", b"salt", &CostParams::TEST),
                Err(KdfError::BackendUnavailable(ProbeError::SelfTestFailed(_)))
            ));
        }
    }

    #[test]
    fn probe_runs_once_per_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = KdfBackend::with_provider(Box::new(CountingProvider {
            calls: calls.clone(),
        }));

        backend.status().expect("status");
        backend.status().expect("status");
        backend.derive(b"pw", b"salt", &CostParams::TEST).expect("derive");
        backend.derive(b"pw", b"salt", &CostParams::TEST).expect("derive");

        // One self-test derivation plus the two real ones.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn derive_maps_parameter_rejection() {
        let backend = KdfBackend::new();
        let err = backend
            .derive(b"pw", b"salt", &CostParams::new(15, 1, 1).expect("params"))
            .expect_err("N=15");
        assert!(matches!(err, KdfError::ParameterRejected(_)));
    }

    #[test]
    fn shared_backend_is_available() {
        assert!(KdfBackend::shared().status().is_ok());
    }
}
