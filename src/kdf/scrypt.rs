//! Scrypt provider backed by the RustCrypto `scrypt` crate.

use scrypt::Params;

use crate::kdf::model::KdfError;
use crate::kdf::provider::{KdfProviderPort, ProviderVersion, MAX_DERIVE_MEMORY_BYTES};
use crate::params::CostParams;

/// Version of the `scrypt` binding this provider is built against.
const BINDING_VERSION: ProviderVersion = ProviderVersion::new(0, 11, 0);

/// The production provider. Stateless; all cost comes in per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScryptProvider;

impl KdfProviderPort for ScryptProvider {
    fn name(&self) -> &'static str {
        "scrypt"
    }

    fn version(&self) -> ProviderVersion {
        BINDING_VERSION
    }

    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &CostParams,
        out: &mut [u8],
    ) -> Result<(), KdfError> {
        // The primitive takes log2(N); N must be a power of two and at
        // least 2 to be expressible.
        let n = params.n();
        if n < 2 || !n.is_power_of_two() {
            return Err(KdfError::ParameterRejected(format!(
                "N={n} is not a power of two >= 2"
            )));
        }
        let log_n = n.trailing_zeros() as u8;

        // Working memory is 128 * r * (N + p + 2) bytes. `Params::new` only
        // rejects overflow-level N; the ceiling has to hold before anything
        // is allocated.
        let memory =
            128u128 * u128::from(params.r()) * (u128::from(n) + u128::from(params.p()) + 2);
        if memory > u128::from(MAX_DERIVE_MEMORY_BYTES) {
            return Err(KdfError::ParameterRejected(format!(
                "N={n}, r={}, p={} implies {memory} bytes of working memory, \
                 limit is {MAX_DERIVE_MEMORY_BYTES}",
                params.r(),
                params.p()
            )));
        }

        let scrypt_params = Params::new(log_n, params.r(), params.p(), out.len())
            .map_err(|e| KdfError::ParameterRejected(e.to_string()))?;

        scrypt::scrypt(password, salt, &scrypt_params, out)
            .map_err(|e| KdfError::DerivationFailed(e.to_string()))
    }
}
