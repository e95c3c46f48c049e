//! ML-KEM Key Encapsulation Mechanism (FIPS 203).
//!
//! This module implements ML-KEM, the module-lattice KEM selected for
//! standardization by NIST. It provides IND-CCA2 security via the
//! Fujisaki-Okamoto transform with implicit rejection.

// Modules defining the ML-KEM logic and parameters.
mod params;
mod reduce; // Montgomery and Barrett reduction over Z_q
mod ntt; // Forward/inverse NTT and base multiplication
mod poly; // Ring elements, message encoding, CBD noise
mod polyvec; // K-vector arithmetic atop poly
mod symmetric; // SHA3/SHAKE glue consumed by the scheme
mod serialize; // Byte serialization of keys and ciphertexts
mod ind_cpa; // The CPA-secure lattice PKE
mod ind_cca; // The FO transform for CCA security
mod kem_api; // Typed wrapper implementing api::Kem

// Concrete ML-KEM variants
mod mlkem1024;
mod mlkem512;
mod mlkem768;

// Re-export the primary KEM types for each security level.
pub use self::mlkem1024::MlKem1024;
pub use self::mlkem512::MlKem512;
pub use self::mlkem768::MlKem768;

// Re-export common key/ciphertext types if users need to name them directly.
pub use self::kem_api::{MlKemCiphertext, MlKemPublicKey, MlKemSecretKey, MlKemSharedSecret};

// Re-export the parameter machinery for size computations.
pub use self::params::{
    MlKem1024Params, MlKem512Params, MlKem768Params, MlKemParams, MLKEM_SS_BYTES, MLKEM_SYM_BYTES,
};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use self::ind_cca::{kem_decaps, kem_encaps, kem_encaps_derand, kem_keygen, kem_keygen_derand};

/// Algorithm tag selecting one of the three ML-KEM parameter sets.
///
/// Unknown tags are unrepresentable, so there is no fallback variant: a
/// caller either names a standardized parameter set or does not get one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MlKemAlgorithm {
    MlKem512,
    MlKem768,
    MlKem1024,
}

impl MlKemAlgorithm {
    /// Public key size in bytes.
    pub const fn public_key_bytes(self) -> usize {
        match self {
            Self::MlKem512 => MlKem512Params::PUBLIC_KEY_BYTES,
            Self::MlKem768 => MlKem768Params::PUBLIC_KEY_BYTES,
            Self::MlKem1024 => MlKem1024Params::PUBLIC_KEY_BYTES,
        }
    }

    /// Secret key size in bytes.
    pub const fn secret_key_bytes(self) -> usize {
        match self {
            Self::MlKem512 => MlKem512Params::SECRET_KEY_BYTES,
            Self::MlKem768 => MlKem768Params::SECRET_KEY_BYTES,
            Self::MlKem1024 => MlKem1024Params::SECRET_KEY_BYTES,
        }
    }

    /// Ciphertext size in bytes.
    pub const fn ciphertext_bytes(self) -> usize {
        match self {
            Self::MlKem512 => MlKem512Params::CIPHERTEXT_BYTES,
            Self::MlKem768 => MlKem768Params::CIPHERTEXT_BYTES,
            Self::MlKem1024 => MlKem1024Params::CIPHERTEXT_BYTES,
        }
    }

    /// Shared secret size in bytes; 32 for every variant.
    pub const fn shared_secret_bytes(self) -> usize {
        MLKEM_SS_BYTES
    }

    /// Algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MlKem512 => MlKem512Params::NAME,
            Self::MlKem768 => MlKem768Params::NAME,
            Self::MlKem1024 => MlKem1024Params::NAME,
        }
    }

    /// Generate a keypair into caller-provided buffers.
    pub fn keypair_into<R: RngCore + CryptoRng>(
        self,
        rng: &mut R,
        pk_out: &mut [u8],
        sk_out: &mut [u8],
    ) -> Result<()> {
        self.check_buffers(pk_out.len(), self.public_key_bytes(), "public key output")?;
        self.check_buffers(sk_out.len(), self.secret_key_bytes(), "secret key output")?;

        let (pk, mut sk) = match self {
            Self::MlKem512 => kem_keygen::<MlKem512Params, R>(rng)?,
            Self::MlKem768 => kem_keygen::<MlKem768Params, R>(rng)?,
            Self::MlKem1024 => kem_keygen::<MlKem1024Params, R>(rng)?,
        };
        pk_out.copy_from_slice(&pk);
        sk_out.copy_from_slice(&sk);
        sk.zeroize();
        Ok(())
    }

    /// Deterministic key generation from coins = d || z (the KAT hook).
    pub fn keypair_derand_into(
        self,
        coins: &[u8; 2 * MLKEM_SYM_BYTES],
        pk_out: &mut [u8],
        sk_out: &mut [u8],
    ) -> Result<()> {
        self.check_buffers(pk_out.len(), self.public_key_bytes(), "public key output")?;
        self.check_buffers(sk_out.len(), self.secret_key_bytes(), "secret key output")?;

        let (pk, mut sk) = match self {
            Self::MlKem512 => kem_keygen_derand::<MlKem512Params>(coins),
            Self::MlKem768 => kem_keygen_derand::<MlKem768Params>(coins),
            Self::MlKem1024 => kem_keygen_derand::<MlKem1024Params>(coins),
        };
        pk_out.copy_from_slice(&pk);
        sk_out.copy_from_slice(&sk);
        sk.zeroize();
        Ok(())
    }

    /// Encapsulate against `pk`, writing ciphertext and shared secret into
    /// caller-provided buffers.
    pub fn encapsulate_into<R: RngCore + CryptoRng>(
        self,
        rng: &mut R,
        ct_out: &mut [u8],
        ss_out: &mut [u8],
        pk: &[u8],
    ) -> Result<()> {
        validate::key(
            pk.len() == self.public_key_bytes(),
            self.name(),
            "public key has wrong length",
        )?;
        self.check_buffers(ct_out.len(), self.ciphertext_bytes(), "ciphertext output")?;
        self.check_buffers(ss_out.len(), MLKEM_SS_BYTES, "shared secret output")?;

        let (ct, ss) = match self {
            Self::MlKem512 => kem_encaps::<MlKem512Params, R>(pk, rng)?,
            Self::MlKem768 => kem_encaps::<MlKem768Params, R>(pk, rng)?,
            Self::MlKem1024 => kem_encaps::<MlKem1024Params, R>(pk, rng)?,
        };
        ct_out.copy_from_slice(&ct);
        ss_out.copy_from_slice(ss.as_ref());
        Ok(())
    }

    /// Deterministic encapsulation from the 32-byte seed m (the KAT hook).
    pub fn encapsulate_derand_into(
        self,
        m_seed: &[u8; MLKEM_SYM_BYTES],
        ct_out: &mut [u8],
        ss_out: &mut [u8],
        pk: &[u8],
    ) -> Result<()> {
        validate::key(
            pk.len() == self.public_key_bytes(),
            self.name(),
            "public key has wrong length",
        )?;
        self.check_buffers(ct_out.len(), self.ciphertext_bytes(), "ciphertext output")?;
        self.check_buffers(ss_out.len(), MLKEM_SS_BYTES, "shared secret output")?;

        let (ct, ss) = match self {
            Self::MlKem512 => kem_encaps_derand::<MlKem512Params>(pk, m_seed),
            Self::MlKem768 => kem_encaps_derand::<MlKem768Params>(pk, m_seed),
            Self::MlKem1024 => kem_encaps_derand::<MlKem1024Params>(pk, m_seed),
        };
        ct_out.copy_from_slice(&ct);
        ss_out.copy_from_slice(ss.as_ref());
        Ok(())
    }

    /// Decapsulate `ct` under `sk`, writing the shared secret into the
    /// caller-provided buffer.
    ///
    /// A forged ciphertext of the right length never produces an error;
    /// implicit rejection yields an unrelated, valid-shaped secret.
    pub fn decapsulate_into(self, ss_out: &mut [u8], ct: &[u8], sk: &[u8]) -> Result<()> {
        validate::key(
            sk.len() == self.secret_key_bytes(),
            self.name(),
            "secret key has wrong length",
        )?;
        validate::ciphertext(
            ct.len() == self.ciphertext_bytes(),
            self.name(),
            "ciphertext has wrong length",
        )?;
        self.check_buffers(ss_out.len(), MLKEM_SS_BYTES, "shared secret output")?;

        let ss = match self {
            Self::MlKem512 => kem_decaps::<MlKem512Params>(sk, ct),
            Self::MlKem768 => kem_decaps::<MlKem768Params>(sk, ct),
            Self::MlKem1024 => kem_decaps::<MlKem1024Params>(sk, ct),
        };
        ss_out.copy_from_slice(ss.as_ref());
        Ok(())
    }

    fn check_buffers(self, actual: usize, expected: usize, what: &'static str) -> Result<()> {
        validate::serialization(actual == expected, self.name(), what)
    }
}

#[cfg(test)]
mod tests;
