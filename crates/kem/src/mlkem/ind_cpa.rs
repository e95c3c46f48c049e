//! The IND-CPA secure public-key scheme underlying ML-KEM.
//!
//! All three functions are deterministic in their seed inputs; the FO layer
//! on top owns the randomness.

use zeroize::Zeroize;

use super::params::{MlKemParams, MLKEM_N, MLKEM_Q, MLKEM_SYM_BYTES};
use super::poly::Poly;
use super::polyvec::PolyVec;
use super::serialize::{
    pack_ciphertext, pack_pk, pack_sk, unpack_ciphertext, unpack_pk, unpack_sk,
};
use super::symmetric::{hash_g, Xof, XOF_BLOCK_BYTES};

/// Blocks squeezed up front per matrix cell; enough for 256 accepted
/// coefficients except with negligible probability.
const GEN_MATRIX_NBLOCKS: usize =
    (12 * MLKEM_N / 8 * (1 << 12) / (MLKEM_Q as usize) + XOF_BLOCK_BYTES) / XOF_BLOCK_BYTES;

/// Parse 3-byte groups into two 12-bit candidates each, accepting values
/// below q. Returns the number of coefficients written.
fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
    let mut ctr = 0;
    let mut pos = 0;
    while ctr < r.len() && pos + 3 <= buf.len() {
        let val0 = (buf[pos] as u16 | (buf[pos + 1] as u16) << 8) & 0xFFF;
        let val1 = (buf[pos + 1] as u16 >> 4) | (buf[pos + 2] as u16) << 4;
        pos += 3;

        if val0 < MLKEM_Q as u16 {
            r[ctr] = val0 as i16;
            ctr += 1;
        }
        if ctr < r.len() && val1 < MLKEM_Q as u16 {
            r[ctr] = val1 as i16;
            ctr += 1;
        }
    }
    ctr
}

/// Expand the matrix A (or its transpose) from rho.
///
/// Cell (i, j) is sampled from SHAKE128(rho || j || i); transposed mode,
/// used during encryption, swaps the two index bytes. The matrix is public,
/// so the data-dependent rejection loop leaks nothing secret.
pub(crate) fn gen_matrix<P: MlKemParams>(
    seed: &[u8; MLKEM_SYM_BYTES],
    transposed: bool,
) -> Vec<PolyVec<P>> {
    let mut a = Vec::with_capacity(P::K);

    for i in 0..P::K {
        let mut row = PolyVec::<P>::zero();

        for (j, poly) in row.polys.iter_mut().enumerate() {
            let mut xof = if transposed {
                Xof::absorb(seed, i as u8, j as u8)
            } else {
                Xof::absorb(seed, j as u8, i as u8)
            };

            let mut buf = [0u8; GEN_MATRIX_NBLOCKS * XOF_BLOCK_BYTES];
            xof.squeeze_blocks(&mut buf);
            let mut ctr = rej_uniform(&mut poly.coeffs, &buf);

            // 168 is a multiple of 3, so no partial group carries over.
            while ctr < MLKEM_N {
                let mut block = [0u8; XOF_BLOCK_BYTES];
                xof.squeeze_blocks(&mut block);
                ctr += rej_uniform(&mut poly.coeffs[ctr..], &block);
            }
        }

        a.push(row);
    }

    a
}

/// IND-CPA key generation from the 32-byte seed d.
///
/// Writes the packed public key (t-hat || rho) and the packed secret key
/// (s-hat) into the caller's buffers.
pub(crate) fn indcpa_keypair<P: MlKemParams>(pk: &mut [u8], sk: &mut [u8], d: &[u8; 32]) {
    debug_assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);
    debug_assert_eq!(sk.len(), P::INDCPA_SECRET_KEY_BYTES);

    // Domain-separated seed expansion: (rho, sigma) = G(d || k).
    let mut g_in = [0u8; MLKEM_SYM_BYTES + 1];
    g_in[..MLKEM_SYM_BYTES].copy_from_slice(d);
    g_in[MLKEM_SYM_BYTES] = P::K as u8;
    let mut g_out = hash_g(&g_in);

    let mut public_seed = [0u8; MLKEM_SYM_BYTES];
    public_seed.copy_from_slice(&g_out[..MLKEM_SYM_BYTES]);
    let mut noise_seed = [0u8; MLKEM_SYM_BYTES];
    noise_seed.copy_from_slice(&g_out[MLKEM_SYM_BYTES..]);

    let a = gen_matrix::<P>(&public_seed, false);

    let mut skpv = PolyVec::<P>::zero();
    let mut e = PolyVec::<P>::zero();
    let mut nonce = 0u8;
    for poly in skpv.polys.iter_mut() {
        *poly = Poly::getnoise_eta1::<P>(&noise_seed, nonce);
        nonce += 1;
    }
    for poly in e.polys.iter_mut() {
        *poly = Poly::getnoise_eta1::<P>(&noise_seed, nonce);
        nonce += 1;
    }

    skpv.ntt();
    e.ntt();

    // t-hat = A o s-hat + e-hat, with the Montgomery factor from the
    // accumulation corrected before the addition.
    let mut pkpv = PolyVec::<P>::zero();
    for (i, row) in a.iter().enumerate() {
        let mut t = row.basemul_acc_montgomery(&skpv);
        t.to_mont();
        pkpv.polys[i] = t;
    }
    pkpv.add_assign(&e);
    pkpv.reduce();

    pack_sk(sk, &skpv);
    pack_pk(pk, &pkpv, &public_seed);

    g_in.zeroize();
    g_out.zeroize();
    noise_seed.zeroize();
    skpv.zeroize();
    e.zeroize();
}

/// IND-CPA encryption of a 32-byte message under the packed public key,
/// deterministic in `coins`.
pub(crate) fn indcpa_enc<P: MlKemParams>(
    ct: &mut [u8],
    msg: &[u8; MLKEM_SYM_BYTES],
    pk: &[u8],
    coins: &[u8; MLKEM_SYM_BYTES],
) {
    debug_assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);
    debug_assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);

    let (pkpv, seed) = unpack_pk::<P>(pk);
    let k = Poly::from_msg(msg);
    let at = gen_matrix::<P>(&seed, true);

    let mut sp = PolyVec::<P>::zero();
    let mut ep = PolyVec::<P>::zero();
    let mut nonce = 0u8;
    for poly in sp.polys.iter_mut() {
        *poly = Poly::getnoise_eta1::<P>(coins, nonce);
        nonce += 1;
    }
    for poly in ep.polys.iter_mut() {
        *poly = Poly::getnoise_eta2::<P>(coins, nonce);
        nonce += 1;
    }
    let epp = Poly::getnoise_eta2::<P>(coins, nonce);

    sp.ntt();

    let mut b = PolyVec::<P>::zero();
    for (i, row) in at.iter().enumerate() {
        b.polys[i] = row.basemul_acc_montgomery(&sp);
    }
    let mut v = pkpv.basemul_acc_montgomery(&sp);

    b.invntt_tomont();
    v.invntt_tomont();

    b.add_assign(&ep);
    v.add(&epp);
    v.add(&k);
    b.reduce();
    v.reduce();

    pack_ciphertext(ct, &b, &v);

    sp.zeroize();
}

/// IND-CPA decryption: m = tomsg(v - s-hat^T o NTT(u)).
pub(crate) fn indcpa_dec<P: MlKemParams>(msg: &mut [u8; MLKEM_SYM_BYTES], ct: &[u8], sk: &[u8]) {
    debug_assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);
    debug_assert_eq!(sk.len(), P::INDCPA_SECRET_KEY_BYTES);

    let (mut b, v) = unpack_ciphertext::<P>(ct);
    let mut skpv = unpack_sk::<P>(sk);

    b.ntt();
    let mut mp = skpv.basemul_acc_montgomery(&b);
    mp.invntt_tomont();

    let mut m_poly = v;
    m_poly.sub(&mp);
    m_poly.reduce();

    *msg = m_poly.to_msg();

    skpv.zeroize();
    mp.zeroize();
    m_poly.zeroize();
}
