//! ML-KEM parameter definitions.

use params::pqc::mlkem as global_params;

/// Common ML-KEM polynomial degree.
pub const MLKEM_N: usize = global_params::MLKEM_N;
/// Common ML-KEM coefficient modulus.
pub const MLKEM_Q: i16 = global_params::MLKEM_Q as i16;
/// Size of hashes and seeds for all variants.
pub const MLKEM_SYM_BYTES: usize = global_params::MLKEM_SYM_BYTES;
/// Shared secret size for all variants.
pub const MLKEM_SS_BYTES: usize = global_params::MLKEM_SS_BYTES;
/// Size of one packed ring element (12 bits per coefficient).
pub const MLKEM_POLY_BYTES: usize = global_params::MLKEM_POLY_BYTES;

/// Trait defining parameters for a specific ML-KEM variant.
pub trait MlKemParams: Send + Sync + 'static {
    /// Security parameter k (dimension of vectors/matrices).
    const K: usize;
    /// Noise parameter eta1 for the secret and error vectors.
    const ETA1: usize;
    /// Noise parameter eta2 for the encryption noise.
    const ETA2: usize;
    /// Compression bits per coefficient of the ciphertext vector u.
    const DU: usize;
    /// Compression bits per coefficient of the ciphertext polynomial v.
    const DV: usize;

    /// Algorithm name string.
    const NAME: &'static str;
    /// Size of the public key in bytes.
    const PUBLIC_KEY_BYTES: usize;
    /// Size of the secret key in bytes.
    const SECRET_KEY_BYTES: usize;
    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_BYTES: usize;

    /// Size of a packed polynomial vector in bytes.
    const POLYVEC_BYTES: usize = Self::K * MLKEM_POLY_BYTES;
    /// Size of the packed IND-CPA secret key in bytes.
    const INDCPA_SECRET_KEY_BYTES: usize = Self::POLYVEC_BYTES;
    /// Size of the compressed ciphertext polynomial v in bytes.
    const POLY_COMPRESSED_BYTES: usize = MLKEM_N * Self::DV / 8;
    /// Size of the compressed ciphertext vector u in bytes.
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * MLKEM_N * Self::DU / 8;
}

// Concrete parameter implementations for the three ML-KEM variants.

pub struct MlKem512Params;
impl MlKemParams for MlKem512Params {
    const K: usize = global_params::MLKEM512.k;
    const ETA1: usize = global_params::MLKEM512.eta1;
    const ETA2: usize = global_params::MLKEM512.eta2;
    const DU: usize = global_params::MLKEM512.du;
    const DV: usize = global_params::MLKEM512.dv;
    const NAME: &'static str = "ML-KEM-512";
    const PUBLIC_KEY_BYTES: usize = global_params::MLKEM512.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::MLKEM512.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::MLKEM512.ciphertext_size;
}

pub struct MlKem768Params;
impl MlKemParams for MlKem768Params {
    const K: usize = global_params::MLKEM768.k;
    const ETA1: usize = global_params::MLKEM768.eta1;
    const ETA2: usize = global_params::MLKEM768.eta2;
    const DU: usize = global_params::MLKEM768.du;
    const DV: usize = global_params::MLKEM768.dv;
    const NAME: &'static str = "ML-KEM-768";
    const PUBLIC_KEY_BYTES: usize = global_params::MLKEM768.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::MLKEM768.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::MLKEM768.ciphertext_size;
}

pub struct MlKem1024Params;
impl MlKemParams for MlKem1024Params {
    const K: usize = global_params::MLKEM1024.k;
    const ETA1: usize = global_params::MLKEM1024.eta1;
    const ETA2: usize = global_params::MLKEM1024.eta2;
    const DU: usize = global_params::MLKEM1024.du;
    const DV: usize = global_params::MLKEM1024.dv;
    const NAME: &'static str = "ML-KEM-1024";
    const PUBLIC_KEY_BYTES: usize = global_params::MLKEM1024.public_key_size;
    const SECRET_KEY_BYTES: usize = global_params::MLKEM1024.secret_key_size;
    const CIPHERTEXT_BYTES: usize = global_params::MLKEM1024.ciphertext_size;
}
