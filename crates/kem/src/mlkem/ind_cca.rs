//! The Fujisaki-Okamoto transform turning the IND-CPA scheme into an
//! IND-CCA2 KEM.
//!
//! Decapsulation re-encrypts the decrypted message and compares the result
//! against the received ciphertext in constant time; on mismatch the caller
//! receives the implicit rejection key SHAKE256(z || ct) instead of an
//! error. The choice between the two secrets is a constant-time move, never
//! a branch.

use internal::constant_time::{ct_cmov, ct_eq_choice};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

use super::ind_cpa::{indcpa_dec, indcpa_enc, indcpa_keypair};
use super::params::{MlKemParams, MLKEM_SS_BYTES, MLKEM_SYM_BYTES};
use super::symmetric::{hash_g, hash_h, rkprf};

pub(crate) type SharedSecretBytes = Zeroizing<[u8; MLKEM_SS_BYTES]>;

/// Deterministic key generation from coins = d || z.
///
/// The KEM secret key is sk_cpa || pk || H(pk) || z.
pub(crate) fn kem_keygen_derand<P: MlKemParams>(
    coins: &[u8; 2 * MLKEM_SYM_BYTES],
) -> (Vec<u8>, Vec<u8>) {
    let mut pk = vec![0u8; P::PUBLIC_KEY_BYTES];
    let mut sk = vec![0u8; P::SECRET_KEY_BYTES];

    let mut d = [0u8; MLKEM_SYM_BYTES];
    d.copy_from_slice(&coins[..MLKEM_SYM_BYTES]);

    indcpa_keypair::<P>(&mut pk, &mut sk[..P::INDCPA_SECRET_KEY_BYTES], &d);

    let pk_offset = P::INDCPA_SECRET_KEY_BYTES;
    sk[pk_offset..pk_offset + P::PUBLIC_KEY_BYTES].copy_from_slice(&pk);

    let h_offset = P::SECRET_KEY_BYTES - 2 * MLKEM_SYM_BYTES;
    let h_pk = hash_h(&pk);
    sk[h_offset..h_offset + MLKEM_SYM_BYTES].copy_from_slice(&h_pk);

    // z, the rejection seed, lives in the last 32 bytes and is never
    // revealed.
    sk[P::SECRET_KEY_BYTES - MLKEM_SYM_BYTES..].copy_from_slice(&coins[MLKEM_SYM_BYTES..]);

    d.zeroize();

    (pk, sk)
}

/// IND-CCA2 key generation.
pub(crate) fn kem_keygen<P: MlKemParams, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut coins = Zeroizing::new([0u8; 2 * MLKEM_SYM_BYTES]);
    rng.try_fill_bytes(&mut coins[..])
        .map_err(|_| Error::RandomGeneration {
            algorithm: P::NAME,
            details: "entropy source failed during key generation",
        })?;
    Ok(kem_keygen_derand::<P>(&coins))
}

/// Deterministic encapsulation from the 32-byte seed m.
///
/// The seed is hashed before use so that raw RNG output never reaches the
/// lattice layer, then (K-bar, r) = G(m || H(pk)) and the ciphertext is the
/// IND-CPA encryption of m under randomness r. The shared secret is K-bar.
pub(crate) fn kem_encaps_derand<P: MlKemParams>(
    pk: &[u8],
    m_seed: &[u8; MLKEM_SYM_BYTES],
) -> (Vec<u8>, SharedSecretBytes) {
    let mut m = Zeroizing::new(hash_h(m_seed));

    let mut buf = Zeroizing::new([0u8; 2 * MLKEM_SYM_BYTES]);
    buf[..MLKEM_SYM_BYTES].copy_from_slice(m.as_ref());
    buf[MLKEM_SYM_BYTES..].copy_from_slice(&hash_h(pk));
    let kr = Zeroizing::new(hash_g(buf.as_ref()));

    let mut coins = Zeroizing::new([0u8; MLKEM_SYM_BYTES]);
    coins.copy_from_slice(&kr[MLKEM_SYM_BYTES..]);

    let mut ct = vec![0u8; P::CIPHERTEXT_BYTES];
    indcpa_enc::<P>(&mut ct, &m, pk, &coins);

    let mut ss = Zeroizing::new([0u8; MLKEM_SS_BYTES]);
    ss.copy_from_slice(&kr[..MLKEM_SS_BYTES]);

    m.zeroize();

    (ct, ss)
}

/// IND-CCA2 encapsulation.
pub(crate) fn kem_encaps<P: MlKemParams, R: RngCore + CryptoRng>(
    pk: &[u8],
    rng: &mut R,
) -> Result<(Vec<u8>, SharedSecretBytes)> {
    let mut m_seed = Zeroizing::new([0u8; MLKEM_SYM_BYTES]);
    rng.try_fill_bytes(&mut m_seed[..])
        .map_err(|_| Error::RandomGeneration {
            algorithm: P::NAME,
            details: "entropy source failed during encapsulation",
        })?;
    Ok(kem_encaps_derand::<P>(pk, &m_seed))
}

/// IND-CCA2 decapsulation with implicit rejection.
///
/// Cannot fail on correctly sized inputs: a forged ciphertext yields the
/// rejection key, indistinguishably from the honest path.
pub(crate) fn kem_decaps<P: MlKemParams>(sk: &[u8], ct: &[u8]) -> SharedSecretBytes {
    debug_assert_eq!(sk.len(), P::SECRET_KEY_BYTES);
    debug_assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);

    let sk_cpa = &sk[..P::INDCPA_SECRET_KEY_BYTES];
    let pk = &sk[P::INDCPA_SECRET_KEY_BYTES..P::INDCPA_SECRET_KEY_BYTES + P::PUBLIC_KEY_BYTES];
    let h_pk = &sk[P::SECRET_KEY_BYTES - 2 * MLKEM_SYM_BYTES..P::SECRET_KEY_BYTES - MLKEM_SYM_BYTES];
    let z = &sk[P::SECRET_KEY_BYTES - MLKEM_SYM_BYTES..];

    let mut m_prime = Zeroizing::new([0u8; MLKEM_SYM_BYTES]);
    indcpa_dec::<P>(&mut m_prime, ct, sk_cpa);

    let mut buf = Zeroizing::new([0u8; 2 * MLKEM_SYM_BYTES]);
    buf[..MLKEM_SYM_BYTES].copy_from_slice(m_prime.as_ref());
    buf[MLKEM_SYM_BYTES..].copy_from_slice(h_pk);
    let kr = Zeroizing::new(hash_g(buf.as_ref()));

    // Re-encrypt with the recomputed randomness and compare.
    let mut coins = Zeroizing::new([0u8; MLKEM_SYM_BYTES]);
    coins.copy_from_slice(&kr[MLKEM_SYM_BYTES..]);
    let mut cmp = vec![0u8; P::CIPHERTEXT_BYTES];
    indcpa_enc::<P>(&mut cmp, &m_prime, pk, &coins);

    let equal = ct_eq_choice(ct, &cmp[..]);

    // Start from the rejection key, then overwrite with K-bar' iff the
    // ciphertexts matched.
    let mut z_arr = [0u8; MLKEM_SYM_BYTES];
    z_arr.copy_from_slice(z);
    let mut ss = Zeroizing::new([0u8; MLKEM_SS_BYTES]);
    rkprf(&mut ss, &z_arr, ct);
    ct_cmov(&mut ss[..], &kr[..MLKEM_SS_BYTES], equal);

    z_arr.zeroize();

    ss
}
