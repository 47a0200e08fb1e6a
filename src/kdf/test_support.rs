//! Stub providers for exercising probe and backend failure paths.

use crate::kdf::model::KdfError;
use crate::kdf::provider::{KdfProviderPort, ProviderVersion, MIN_PROVIDER_VERSION};
use crate::kdf::scrypt::ScryptProvider;
use crate::params::CostParams;

/// Derives correctly but reports a version below the accepted floor.
pub(crate) struct StaleProvider;

impl KdfProviderPort for StaleProvider {
    fn name(&self) -> &'static str {
        "stale"
    }

    fn version(&self) -> ProviderVersion {
        ProviderVersion::new(0, 10, 9)
    }

    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &CostParams,
        out: &mut [u8],
    ) -> Result<(), KdfError> {
        ScryptProvider.derive(password, salt, params, out)
    }
}

/// Passes the version gate but produces nonsense output.
pub(crate) struct GarbageProvider;

impl KdfProviderPort for GarbageProvider {
    fn name(&self) -> &'static str {
        "garbage"
    }

    fn version(&self) -> ProviderVersion {
        MIN_PROVIDER_VERSION
    }

    fn derive(
        &self,
        _password: &[u8],
        _salt: &[u8],
        _params: &CostParams,
        out: &mut [u8],
    ) -> Result<(), KdfError> {
        out.fill(0xAA);
        Ok(())
    }
}

/// Passes the version gate but errors on every derivation.
pub(crate) struct BrokenProvider;

impl KdfProviderPort for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn version(&self) -> ProviderVersion {
        MIN_PROVIDER_VERSION
    }

    fn derive(
        &self,
        _password: &[u8],
        _salt: &[u8],
        _params: &CostParams,
        _out: &mut [u8],
    ) -> Result<(), KdfError> {
        Err(KdfError::DerivationFailed("stub failure".to_string()))
    }
}
