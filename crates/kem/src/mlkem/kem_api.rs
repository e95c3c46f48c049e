//! Typed KEM interface over the byte-level ML-KEM core.
//!
//! `MlKem<P>` implements `api::Kem` generically; the variant modules pin P
//! to one of the three parameter sets.

use core::marker::PhantomData;

use api::{
    error::Error as ApiError, Kem as KemTrait, Key as ApiKey, Result as ApiResult, Serialize,
    SerializeSecret,
};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::ind_cca::{kem_decaps, kem_encaps, kem_keygen};
use super::params::MlKemParams;

/// ML-KEM public key (byte representation).
#[derive(Clone, Debug, Zeroize)]
pub struct MlKemPublicKey(Vec<u8>);

impl MlKemPublicKey {
    /// Creates a new public key from a byte vector.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Returns a reference to the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for MlKemPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for MlKemPublicKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

/// ML-KEM secret key (byte representation).
///
/// # Security Note
/// Zeroized on drop; byte access is explicit and auditable.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct MlKemSecretKey(Vec<u8>);

impl MlKemSecretKey {
    /// Creates a new secret key from a byte vector.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Returns the length of the secret key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the secret key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the inner bytes.
    ///
    /// # Security Warning
    /// This exposes raw key material. Prefer `to_bytes_zeroizing`.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl SerializeSecret for MlKemSecretKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.clone())
    }
}

/// ML-KEM ciphertext (byte representation).
#[derive(Clone, Debug)]
pub struct MlKemCiphertext(Vec<u8>);

impl MlKemCiphertext {
    /// Creates a new ciphertext from a byte vector.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Returns a reference to the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the ciphertext.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the ciphertext is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for MlKemCiphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for MlKemCiphertext {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Serialize for MlKemCiphertext {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        Ok(Self(bytes.to_vec()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}

/// ML-KEM shared secret, exactly 32 bytes.
///
/// # Security Note
/// Use immediately for key derivation; zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MlKemSharedSecret(ApiKey);

impl MlKemSharedSecret {
    /// Creates a new shared secret from an ApiKey.
    pub fn new(key: ApiKey) -> Self {
        Self(key)
    }

    /// Returns the length of the shared secret.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the shared secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for MlKemSharedSecret {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl SerializeSecret for MlKemSharedSecret {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        Ok(Self(ApiKey::new(bytes)))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        self.0.to_bytes_zeroizing()
    }
}

impl core::fmt::Debug for MlKemSharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MlKemSharedSecret")
            .field("length", &self.len())
            .finish()
    }
}

/// Generic ML-KEM structure parameterized by MlKemParams.
pub struct MlKem<P: MlKemParams> {
    _params: PhantomData<P>,
}

impl<P: MlKemParams> KemTrait for MlKem<P> {
    type PublicKey = MlKemPublicKey;
    type SecretKey = MlKemSecretKey;
    type SharedSecret = MlKemSharedSecret;
    type Ciphertext = MlKemCiphertext;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: RngCore + CryptoRng>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (pk_bytes, sk_bytes) = kem_keygen::<P, R>(rng).map_err(ApiError::from)?;
        Ok((MlKemPublicKey::new(pk_bytes), MlKemSecretKey::new(sk_bytes)))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn encapsulate<R: RngCore + CryptoRng>(
        rng: &mut R,
        public_key: &Self::PublicKey,
    ) -> ApiResult<(Self::Ciphertext, Self::SharedSecret)> {
        if public_key.as_bytes().len() != P::PUBLIC_KEY_BYTES {
            return Err(ApiError::InvalidLength {
                context: "ML-KEM public key",
                expected: P::PUBLIC_KEY_BYTES,
                actual: public_key.as_bytes().len(),
            });
        }

        let (ct_bytes, ss_bytes) =
            kem_encaps::<P, R>(public_key.as_bytes(), rng).map_err(ApiError::from)?;

        Ok((
            MlKemCiphertext::new(ct_bytes),
            MlKemSharedSecret::new(ApiKey::new(ss_bytes.as_ref())),
        ))
    }

    fn decapsulate(
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> ApiResult<Self::SharedSecret> {
        if secret_key.as_bytes().len() != P::SECRET_KEY_BYTES {
            return Err(ApiError::InvalidLength {
                context: "ML-KEM secret key",
                expected: P::SECRET_KEY_BYTES,
                actual: secret_key.as_bytes().len(),
            });
        }
        if ciphertext.as_bytes().len() != P::CIPHERTEXT_BYTES {
            return Err(ApiError::InvalidLength {
                context: "ML-KEM ciphertext",
                expected: P::CIPHERTEXT_BYTES,
                actual: ciphertext.as_bytes().len(),
            });
        }

        let ss_bytes = kem_decaps::<P>(secret_key.as_bytes(), ciphertext.as_bytes());

        Ok(MlKemSharedSecret::new(ApiKey::new(ss_bytes.as_ref())))
    }
}
