//! Byte serialization for ML-KEM data structures.
//!
//! All packings are little-endian bit groupings. Uncompressed ring elements
//! use 12 bits per coefficient; the lossy ciphertext encodings use
//! du in {10, 11} bits for the vector u and dv in {4, 5} bits for the
//! polynomial v.
//!
//! Encoders canonicalize negative representatives by conditionally adding
//! q; decoders accept any 12-bit input without reduction.

use super::params::{MlKemParams, MLKEM_N, MLKEM_POLY_BYTES, MLKEM_Q, MLKEM_SYM_BYTES};
use super::poly::Poly;
use super::polyvec::PolyVec;

/// Compress a canonical coefficient to d bits: round(2^d * x / q) mod 2^d.
#[inline(always)]
fn compress_coeff(x: u32, d: usize) -> u32 {
    (((x << d) + (MLKEM_Q as u32) / 2) / (MLKEM_Q as u32)) & ((1 << d) - 1)
}

/// Decompress a d-bit value: round(q * c / 2^d).
#[inline(always)]
fn decompress_coeff(c: u32, d: usize) -> i16 {
    ((c * (MLKEM_Q as u32) + (1 << (d - 1))) >> d) as i16
}

/// Conditionally add q to a negative representative.
#[inline(always)]
fn canonicalize(a: i16) -> u16 {
    (a + ((a >> 15) & MLKEM_Q)) as u16
}

/// Pack a ring element at 12 bits per coefficient (384 bytes).
pub(crate) fn poly_tobytes(r: &mut [u8], a: &Poly) {
    debug_assert_eq!(r.len(), MLKEM_POLY_BYTES);
    for i in 0..MLKEM_N / 2 {
        let t0 = canonicalize(a.coeffs[2 * i]);
        let t1 = canonicalize(a.coeffs[2 * i + 1]);
        r[3 * i] = t0 as u8;
        r[3 * i + 1] = ((t0 >> 8) | (t1 << 4)) as u8;
        r[3 * i + 2] = (t1 >> 4) as u8;
    }
}

/// Inverse of [`poly_tobytes`]; accepts any 12-bit encoding, no reduction.
pub(crate) fn poly_frombytes(a: &[u8]) -> Poly {
    debug_assert_eq!(a.len(), MLKEM_POLY_BYTES);
    let mut r = Poly::zero();
    for i in 0..MLKEM_N / 2 {
        r.coeffs[2 * i] = ((a[3 * i] as u16 | (a[3 * i + 1] as u16) << 8) & 0xFFF) as i16;
        r.coeffs[2 * i + 1] =
            ((a[3 * i + 1] as u16 >> 4 | (a[3 * i + 2] as u16) << 4) & 0xFFF) as i16;
    }
    r
}

/// Lossy compression of the ciphertext polynomial v (dv in {4, 5}).
pub(crate) fn poly_compress<P: MlKemParams>(r: &mut [u8], a: &Poly) {
    debug_assert_eq!(r.len(), P::POLY_COMPRESSED_BYTES);
    let mut t = [0u8; 8];
    match P::DV {
        4 => {
            for i in 0..MLKEM_N / 8 {
                for (j, v) in t.iter_mut().enumerate() {
                    let u = canonicalize(a.coeffs[8 * i + j]) as u32;
                    *v = compress_coeff(u, 4) as u8;
                }
                r[4 * i] = t[0] | (t[1] << 4);
                r[4 * i + 1] = t[2] | (t[3] << 4);
                r[4 * i + 2] = t[4] | (t[5] << 4);
                r[4 * i + 3] = t[6] | (t[7] << 4);
            }
        }
        5 => {
            for i in 0..MLKEM_N / 8 {
                for (j, v) in t.iter_mut().enumerate() {
                    let u = canonicalize(a.coeffs[8 * i + j]) as u32;
                    *v = compress_coeff(u, 5) as u8;
                }
                r[5 * i] = t[0] | (t[1] << 5);
                r[5 * i + 1] = (t[1] >> 3) | (t[2] << 2) | (t[3] << 7);
                r[5 * i + 2] = (t[3] >> 1) | (t[4] << 4);
                r[5 * i + 3] = (t[4] >> 4) | (t[5] << 1) | (t[6] << 6);
                r[5 * i + 4] = (t[6] >> 2) | (t[7] << 3);
            }
        }
        _ => unreachable!(),
    }
}

/// Inverse of [`poly_compress`].
pub(crate) fn poly_decompress<P: MlKemParams>(a: &[u8]) -> Poly {
    debug_assert_eq!(a.len(), P::POLY_COMPRESSED_BYTES);
    let mut r = Poly::zero();
    match P::DV {
        4 => {
            for i in 0..MLKEM_N / 2 {
                r.coeffs[2 * i] = decompress_coeff((a[i] & 15) as u32, 4);
                r.coeffs[2 * i + 1] = decompress_coeff((a[i] >> 4) as u32, 4);
            }
        }
        5 => {
            for i in 0..MLKEM_N / 8 {
                let b = &a[5 * i..5 * i + 5];
                let t = [
                    b[0],
                    (b[0] >> 5) | (b[1] << 3),
                    b[1] >> 2,
                    (b[1] >> 7) | (b[2] << 1),
                    (b[2] >> 4) | (b[3] << 4),
                    b[3] >> 1,
                    (b[3] >> 6) | (b[4] << 2),
                    b[4] >> 3,
                ];
                for (j, &v) in t.iter().enumerate() {
                    r.coeffs[8 * i + j] = decompress_coeff((v & 31) as u32, 5);
                }
            }
        }
        _ => unreachable!(),
    }
    r
}

/// Pack a polynomial vector at 12 bits per coefficient.
pub(crate) fn polyvec_tobytes<P: MlKemParams>(r: &mut [u8], a: &PolyVec<P>) {
    debug_assert_eq!(r.len(), P::POLYVEC_BYTES);
    for (chunk, poly) in r.chunks_exact_mut(MLKEM_POLY_BYTES).zip(a.polys.iter()) {
        poly_tobytes(chunk, poly);
    }
}

/// Inverse of [`polyvec_tobytes`].
pub(crate) fn polyvec_frombytes<P: MlKemParams>(a: &[u8]) -> PolyVec<P> {
    debug_assert_eq!(a.len(), P::POLYVEC_BYTES);
    let mut r = PolyVec::<P>::zero();
    for (chunk, poly) in a.chunks_exact(MLKEM_POLY_BYTES).zip(r.polys.iter_mut()) {
        *poly = poly_frombytes(chunk);
    }
    r
}

/// Lossy compression of the ciphertext vector u (du in {10, 11}).
pub(crate) fn polyvec_compress<P: MlKemParams>(r: &mut [u8], a: &PolyVec<P>) {
    debug_assert_eq!(r.len(), P::POLYVEC_COMPRESSED_BYTES);
    let per_poly = MLKEM_N * P::DU / 8;
    match P::DU {
        10 => {
            let mut t = [0u16; 4];
            for (chunk, poly) in r.chunks_exact_mut(per_poly).zip(a.polys.iter()) {
                for i in 0..MLKEM_N / 4 {
                    for (k, v) in t.iter_mut().enumerate() {
                        let u = canonicalize(poly.coeffs[4 * i + k]) as u32;
                        *v = compress_coeff(u, 10) as u16;
                    }
                    chunk[5 * i] = t[0] as u8;
                    chunk[5 * i + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
                    chunk[5 * i + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
                    chunk[5 * i + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
                    chunk[5 * i + 4] = (t[3] >> 2) as u8;
                }
            }
        }
        11 => {
            let mut t = [0u16; 8];
            for (chunk, poly) in r.chunks_exact_mut(per_poly).zip(a.polys.iter()) {
                for i in 0..MLKEM_N / 8 {
                    for (k, v) in t.iter_mut().enumerate() {
                        let u = canonicalize(poly.coeffs[8 * i + k]) as u32;
                        *v = compress_coeff(u, 11) as u16;
                    }
                    chunk[11 * i] = t[0] as u8;
                    chunk[11 * i + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
                    chunk[11 * i + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
                    chunk[11 * i + 3] = (t[2] >> 2) as u8;
                    chunk[11 * i + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
                    chunk[11 * i + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
                    chunk[11 * i + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
                    chunk[11 * i + 7] = (t[5] >> 1) as u8;
                    chunk[11 * i + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
                    chunk[11 * i + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
                    chunk[11 * i + 10] = (t[7] >> 3) as u8;
                }
            }
        }
        _ => unreachable!(),
    }
}

/// Inverse of [`polyvec_compress`].
pub(crate) fn polyvec_decompress<P: MlKemParams>(a: &[u8]) -> PolyVec<P> {
    debug_assert_eq!(a.len(), P::POLYVEC_COMPRESSED_BYTES);
    let mut r = PolyVec::<P>::zero();
    let per_poly = MLKEM_N * P::DU / 8;
    match P::DU {
        10 => {
            for (chunk, poly) in a.chunks_exact(per_poly).zip(r.polys.iter_mut()) {
                for i in 0..MLKEM_N / 4 {
                    let b = &chunk[5 * i..5 * i + 5];
                    let t = [
                        b[0] as u16 | (b[1] as u16) << 8,
                        b[1] as u16 >> 2 | (b[2] as u16) << 6,
                        b[2] as u16 >> 4 | (b[3] as u16) << 4,
                        b[3] as u16 >> 6 | (b[4] as u16) << 2,
                    ];
                    for (k, &v) in t.iter().enumerate() {
                        poly.coeffs[4 * i + k] = decompress_coeff((v & 0x3FF) as u32, 10);
                    }
                }
            }
        }
        11 => {
            for (chunk, poly) in a.chunks_exact(per_poly).zip(r.polys.iter_mut()) {
                for i in 0..MLKEM_N / 8 {
                    let b = &chunk[11 * i..11 * i + 11];
                    let t = [
                        b[0] as u16 | (b[1] as u16) << 8,
                        b[1] as u16 >> 3 | (b[2] as u16) << 5,
                        b[2] as u16 >> 6 | (b[3] as u16) << 2 | (b[4] as u16) << 10,
                        b[4] as u16 >> 1 | (b[5] as u16) << 7,
                        b[5] as u16 >> 4 | (b[6] as u16) << 4,
                        b[6] as u16 >> 7 | (b[7] as u16) << 1 | (b[8] as u16) << 9,
                        b[8] as u16 >> 2 | (b[9] as u16) << 6,
                        b[9] as u16 >> 5 | (b[10] as u16) << 3,
                    ];
                    for (k, &v) in t.iter().enumerate() {
                        poly.coeffs[8 * i + k] = decompress_coeff((v & 0x7FF) as u32, 11);
                    }
                }
            }
        }
        _ => unreachable!(),
    }
    r
}

/// Public key layout: packed t-hat || rho.
pub(crate) fn pack_pk<P: MlKemParams>(pk: &mut [u8], t: &PolyVec<P>, rho: &[u8; MLKEM_SYM_BYTES]) {
    debug_assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);
    polyvec_tobytes(&mut pk[..P::POLYVEC_BYTES], t);
    pk[P::POLYVEC_BYTES..].copy_from_slice(rho);
}

/// Inverse of [`pack_pk`].
pub(crate) fn unpack_pk<P: MlKemParams>(pk: &[u8]) -> (PolyVec<P>, [u8; MLKEM_SYM_BYTES]) {
    debug_assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);
    let t = polyvec_frombytes(&pk[..P::POLYVEC_BYTES]);
    let mut rho = [0u8; MLKEM_SYM_BYTES];
    rho.copy_from_slice(&pk[P::POLYVEC_BYTES..]);
    (t, rho)
}

/// IND-CPA secret key layout: packed s-hat.
pub(crate) fn pack_sk<P: MlKemParams>(sk: &mut [u8], s: &PolyVec<P>) {
    debug_assert_eq!(sk.len(), P::INDCPA_SECRET_KEY_BYTES);
    polyvec_tobytes(sk, s);
}

/// Inverse of [`pack_sk`].
pub(crate) fn unpack_sk<P: MlKemParams>(sk: &[u8]) -> PolyVec<P> {
    debug_assert_eq!(sk.len(), P::INDCPA_SECRET_KEY_BYTES);
    polyvec_frombytes(sk)
}

/// Ciphertext layout: compressed u || compressed v.
pub(crate) fn pack_ciphertext<P: MlKemParams>(ct: &mut [u8], u: &PolyVec<P>, v: &Poly) {
    debug_assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);
    polyvec_compress(&mut ct[..P::POLYVEC_COMPRESSED_BYTES], u);
    poly_compress::<P>(&mut ct[P::POLYVEC_COMPRESSED_BYTES..], v);
}

/// Inverse of [`pack_ciphertext`], with decompression.
pub(crate) fn unpack_ciphertext<P: MlKemParams>(ct: &[u8]) -> (PolyVec<P>, Poly) {
    debug_assert_eq!(ct.len(), P::CIPHERTEXT_BYTES);
    let u = polyvec_decompress(&ct[..P::POLYVEC_COMPRESSED_BYTES]);
    let v = poly_decompress::<P>(&ct[P::POLYVEC_COMPRESSED_BYTES..]);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::super::params::{MlKem1024Params, MlKem512Params, MlKem768Params};
    use super::*;

    fn sample_poly(step: usize) -> Poly {
        let mut p = Poly::zero();
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            *c = ((i * step + 1) % MLKEM_Q as usize) as i16;
        }
        p
    }

    #[test]
    fn poly_bytes_roundtrip() {
        let poly = sample_poly(7);
        let mut packed = [0u8; MLKEM_POLY_BYTES];
        poly_tobytes(&mut packed, &poly);
        let unpacked = poly_frombytes(&packed);
        assert_eq!(poly.coeffs, unpacked.coeffs);
    }

    #[test]
    fn poly_tobytes_canonicalizes_negatives() {
        let mut poly = Poly::zero();
        poly.coeffs[0] = -1;
        let mut packed = [0u8; MLKEM_POLY_BYTES];
        poly_tobytes(&mut packed, &poly);
        let unpacked = poly_frombytes(&packed);
        assert_eq!(unpacked.coeffs[0], MLKEM_Q - 1);
    }

    #[test]
    fn poly_frombytes_accepts_non_canonical_input() {
        // All-ones packing decodes to 0xFFF per coefficient; callers must
        // tolerate values above q.
        let packed = [0xFFu8; MLKEM_POLY_BYTES];
        let unpacked = poly_frombytes(&packed);
        assert!(unpacked.coeffs.iter().all(|&c| c == 0xFFF));
    }

    // Compression followed by decompression and re-compression must be the
    // identity on the compressed domain.
    #[test]
    fn poly_compress_idempotent_d4() {
        let poly = sample_poly(11);
        let mut once = [0u8; 128];
        poly_compress::<MlKem768Params>(&mut once, &poly);
        let decompressed = poly_decompress::<MlKem768Params>(&once);
        let mut twice = [0u8; 128];
        poly_compress::<MlKem768Params>(&mut twice, &decompressed);
        assert_eq!(once, twice);
    }

    #[test]
    fn poly_compress_idempotent_d5() {
        let poly = sample_poly(13);
        let mut once = [0u8; 160];
        poly_compress::<MlKem1024Params>(&mut once, &poly);
        let decompressed = poly_decompress::<MlKem1024Params>(&once);
        let mut twice = [0u8; 160];
        poly_compress::<MlKem1024Params>(&mut twice, &decompressed);
        assert_eq!(once, twice);
    }

    #[test]
    fn polyvec_compress_idempotent_d10() {
        let mut pv = PolyVec::<MlKem512Params>::zero();
        for (lane, poly) in pv.polys.iter_mut().enumerate() {
            *poly = sample_poly(3 + lane);
        }
        let mut once = vec![0u8; MlKem512Params::POLYVEC_COMPRESSED_BYTES];
        polyvec_compress(&mut once, &pv);
        let decompressed = polyvec_decompress::<MlKem512Params>(&once);
        let mut twice = vec![0u8; MlKem512Params::POLYVEC_COMPRESSED_BYTES];
        polyvec_compress(&mut twice, &decompressed);
        assert_eq!(once, twice);
    }

    #[test]
    fn polyvec_compress_idempotent_d11() {
        let mut pv = PolyVec::<MlKem1024Params>::zero();
        for (lane, poly) in pv.polys.iter_mut().enumerate() {
            *poly = sample_poly(5 + lane);
        }
        let mut once = vec![0u8; MlKem1024Params::POLYVEC_COMPRESSED_BYTES];
        polyvec_compress(&mut once, &pv);
        let decompressed = polyvec_decompress::<MlKem1024Params>(&once);
        let mut twice = vec![0u8; MlKem1024Params::POLYVEC_COMPRESSED_BYTES];
        polyvec_compress(&mut twice, &decompressed);
        assert_eq!(once, twice);
    }

    #[test]
    fn decompress_error_is_small() {
        // |decompress(compress(x)) - x| mod± q must stay below q / 2^(d+1)
        // rounded up, for every canonical x.
        for d in [10usize, 11] {
            let bound = (MLKEM_Q as i32 + (1 << (d + 1)) - 1) / (1 << (d + 1));
            for x in 0..MLKEM_Q as u32 {
                let c = compress_coeff(x, d);
                let y = decompress_coeff(c, d) as i32;
                let mut diff = (y - x as i32).rem_euclid(MLKEM_Q as i32);
                if diff > MLKEM_Q as i32 / 2 {
                    diff -= MLKEM_Q as i32;
                }
                assert!(
                    diff.abs() <= bound,
                    "d={} x={} err={} bound={}",
                    d,
                    x,
                    diff,
                    bound
                );
            }
        }
    }

    #[test]
    fn pack_unpack_pk_roundtrip() {
        let mut t = PolyVec::<MlKem768Params>::zero();
        for (lane, poly) in t.polys.iter_mut().enumerate() {
            *poly = sample_poly(17 + lane);
        }
        let rho = [0xA5u8; MLKEM_SYM_BYTES];
        let mut pk = vec![0u8; MlKem768Params::PUBLIC_KEY_BYTES];
        pack_pk(&mut pk, &t, &rho);
        let (t2, rho2) = unpack_pk::<MlKem768Params>(&pk);
        assert_eq!(rho, rho2);
        for (a, b) in t.polys.iter().zip(t2.polys.iter()) {
            assert_eq!(a.coeffs, b.coeffs);
        }
    }
}
