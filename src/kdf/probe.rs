//! Capability probe for the KDF provider.
//!
//! Before any credential is hashed the provider has to prove itself once:
//! report a version at or above the accepted floor, then reproduce a
//! published scrypt test vector. A provider that fails either check makes
//! the whole backend unavailable; nothing falls back to a weaker hash.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::kdf::model::DERIVED_KEY_LEN;
use crate::kdf::provider::{KdfProviderPort, ProviderVersion, MIN_PROVIDER_VERSION};
use crate::params::CostParams;

/// RFC 7914 section 12, first vector:
/// scrypt(P="", S="", N=16, r=1, p=1, dkLen=64).
const SELF_TEST_EXPECTED: [u8; DERIVED_KEY_LEN] = [
    0x77, 0xd6, 0x57, 0x62, 0x38, 0x65, 0x7b, 0x20, 0x3b, 0x19, 0xca, 0x42, 0xc1, 0x8a, 0x04,
    0x97, 0xf1, 0x6b, 0x48, 0x44, 0xe3, 0x07, 0x4a, 0xe8, 0xdf, 0xdf, 0xfa, 0x3f, 0xed, 0xe2,
    0x14, 0x42, 0xfc, 0xd0, 0x06, 0x9d, 0xed, 0x09, 0x48, 0xf8, 0x32, 0x6a, 0x75, 0x3a, 0x0f,
    0xc8, 0x1f, 0x17, 0xe8, 0xd3, 0xe0, 0xfb, 0x2e, 0x0d, 0x36, 0x28, 0xcf, 0x35, 0xe2, 0x0c,
    0x38, 0xd1, 0x89, 0x06,
];

/// Identity of a provider that passed the probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub version: ProviderVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("provider version {found} is below the required {required}")]
    VersionBelowMinimum {
        found: ProviderVersion,
        required: ProviderVersion,
    },

    #[error("provider self-test failed: {0}")]
    SelfTestFailed(String),

    #[error("provider self-test produced a wrong derivation")]
    SelfTestMismatch,
}

/// Runs the one-shot availability check against `provider`.
///
/// The backend caches the outcome; calling this directly is only useful for
/// diagnostics and tests.
pub fn probe(provider: &dyn KdfProviderPort) -> Result<ProviderInfo, ProbeError> {
    let outcome = run_checks(provider);
    match &outcome {
        Ok(info) => info!(
            provider = %info.name,
            version = %info.version,
            "scrypt backend available"
        ),
        Err(reason) => warn!(%reason, "scrypt backend unavailable"),
    }
    outcome
}

fn run_checks(provider: &dyn KdfProviderPort) -> Result<ProviderInfo, ProbeError> {
    let version = provider.version();
    if version < MIN_PROVIDER_VERSION {
        return Err(ProbeError::VersionBelowMinimum {
            found: version,
            required: MIN_PROVIDER_VERSION,
        });
    }

    let mut out = [0u8; DERIVED_KEY_LEN];
    provider
        .derive(b"", b"", &CostParams::TEST, &mut out)
        .map_err(|e| ProbeError::SelfTestFailed(e.to_string()))?;

    if out != SELF_TEST_EXPECTED {
        return Err(ProbeError::SelfTestMismatch);
    }

    Ok(ProviderInfo {
        name: provider.name().to_string(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::scrypt::ScryptProvider;
    use crate::kdf::test_support::{BrokenProvider, GarbageProvider, StaleProvider};

    #[test]
    fn probe_accepts_conforming_provider() {
        let info = probe(&ScryptProvider).expect("probe passes");
        assert_eq!(info.name, "scrypt");
        assert!(info.version >= MIN_PROVIDER_VERSION);
    }

    #[test]
    fn probe_rejects_stale_version() {
        let err = probe(&StaleProvider).expect_err("version gate");
        assert_eq!(
            err,
            ProbeError::VersionBelowMinimum {
                found: ProviderVersion::new(0, 10, 9),
                required: MIN_PROVIDER_VERSION,
            }
        );
    }

    #[test]
    fn probe_rejects_wrong_answer() {
        let err = probe(&GarbageProvider).expect_err("known-answer gate");
        assert_eq!(err, ProbeError::SelfTestMismatch);
    }

    #[test]
    fn probe_rejects_failing_provider() {
        let err = probe(&BrokenProvider).expect_err("self-test failure");
        assert!(matches!(err, ProbeError::SelfTestFailed(_)));
    }

    #[test]
    fn probe_reports_diagnostics_shape() {
        let info = probe(&ScryptProvider).expect("probe passes");
        let json = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["name"], "scrypt");
        assert_eq!(json["version"]["major"], 0);
    }
}
