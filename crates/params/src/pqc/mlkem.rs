//! Constants for the ML-KEM key encapsulation mechanism (FIPS 203)

/// ML-KEM polynomial degree
pub const MLKEM_N: usize = 256;

/// ML-KEM coefficient modulus
pub const MLKEM_Q: u16 = 3329;

/// Size in bytes of hashes and seeds
pub const MLKEM_SYM_BYTES: usize = 32;

/// Size in bytes of the shared secret, common to all variants
pub const MLKEM_SS_BYTES: usize = 32;

/// Size in bytes of one uncompressed ring element (12 bits per coefficient)
pub const MLKEM_POLY_BYTES: usize = 384;

/// Parameters of one ML-KEM variant
pub struct MlKemParamSet {
    /// Number of polynomials per vector (the module rank k)
    pub k: usize,

    /// CBD width for the secret and error vectors
    pub eta1: usize,

    /// CBD width for the encryption noise
    pub eta2: usize,

    /// Compression bits per coefficient of the ciphertext vector u
    pub du: usize,

    /// Compression bits per coefficient of the ciphertext polynomial v
    pub dv: usize,

    /// Size of the public key in bytes
    pub public_key_size: usize,

    /// Size of the secret key in bytes
    pub secret_key_size: usize,

    /// Size of the ciphertext in bytes
    pub ciphertext_size: usize,

    /// Size of the shared secret in bytes
    pub shared_secret_size: usize,
}

/// ML-KEM-512 parameters (NIST security category 1)
pub const MLKEM512: MlKemParamSet = MlKemParamSet {
    k: 2,
    eta1: 3,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 800,
    secret_key_size: 1632,
    ciphertext_size: 768,
    shared_secret_size: 32,
};

/// ML-KEM-768 parameters (NIST security category 3)
pub const MLKEM768: MlKemParamSet = MlKemParamSet {
    k: 3,
    eta1: 2,
    eta2: 2,
    du: 10,
    dv: 4,
    public_key_size: 1184,
    secret_key_size: 2400,
    ciphertext_size: 1088,
    shared_secret_size: 32,
};

/// ML-KEM-1024 parameters (NIST security category 5)
pub const MLKEM1024: MlKemParamSet = MlKemParamSet {
    k: 4,
    eta1: 2,
    eta2: 2,
    du: 11,
    dv: 5,
    public_key_size: 1568,
    secret_key_size: 3168,
    ciphertext_size: 1568,
    shared_secret_size: 32,
};
