//! ML-KEM-768 (NIST security category 3).

use super::kem_api::MlKem;
use super::params::MlKem768Params;

/// ML-KEM-768, implementing `api::Kem`.
pub type MlKem768 = MlKem<MlKem768Params>;
