//! Ring elements of R_q = Z_q[X]/(X^256 + 1) and their operations.

use zeroize::Zeroize;

use super::ntt::{self, ZETAS};
use super::params::{MlKemParams, MLKEM_N, MLKEM_Q, MLKEM_SYM_BYTES};
use super::reduce::{barrett_reduce, fqmul};
use super::symmetric::prf;

/// One ring element, 256 signed 16-bit coefficients.
///
/// Whether the coefficients are in the normal or the NTT domain, and
/// whether they carry a Montgomery factor, is a property of the data flow,
/// not of the type; the IND-CPA layer tracks it.
#[derive(Clone, Zeroize)]
pub(crate) struct Poly {
    pub(crate) coeffs: [i16; MLKEM_N],
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Self {
            coeffs: [0i16; MLKEM_N],
        }
    }

    /// Barrett-reduce every coefficient.
    pub(crate) fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by 2^32 mod q, moving a normal-domain
    /// polynomial into the Montgomery domain.
    pub(crate) fn to_mont(&mut self) {
        const F: i16 = 1353; // 2^32 mod q
        for c in self.coeffs.iter_mut() {
            *c = fqmul(*c, F);
        }
    }

    /// self += rhs, without reduction.
    pub(crate) fn add(&mut self, rhs: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a += b;
        }
    }

    /// self -= rhs, without reduction.
    pub(crate) fn sub(&mut self, rhs: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a -= b;
        }
    }

    /// Forward NTT followed by a full Barrett reduction.
    pub(crate) fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
        self.reduce();
    }

    /// Inverse NTT; output is in the Montgomery domain.
    pub(crate) fn invntt_tomont(&mut self) {
        ntt::invntt(&mut self.coeffs);
    }

    /// Pointwise multiplication in the NTT domain, 64 quadratic residues.
    pub(crate) fn basemul_montgomery(a: &Poly, b: &Poly) -> Poly {
        let mut r = Poly::zero();
        for i in 0..MLKEM_N / 4 {
            ntt::basemul(
                &mut r.coeffs[4 * i..4 * i + 2],
                &a.coeffs[4 * i..4 * i + 2],
                &b.coeffs[4 * i..4 * i + 2],
                ZETAS[64 + i],
            );
            ntt::basemul(
                &mut r.coeffs[4 * i + 2..4 * i + 4],
                &a.coeffs[4 * i + 2..4 * i + 4],
                &b.coeffs[4 * i + 2..4 * i + 4],
                -ZETAS[64 + i],
            );
        }
        r
    }

    /// Map a 32-byte message to a polynomial, bit b -> b * (q+1)/2.
    pub(crate) fn from_msg(msg: &[u8; MLKEM_SYM_BYTES]) -> Poly {
        let mut r = Poly::zero();
        for i in 0..MLKEM_N / 8 {
            for j in 0..8 {
                // branch-free select of (q+1)/2
                let mask = (((msg[i] >> j) & 1) as i16).wrapping_neg();
                r.coeffs[8 * i + j] = mask & ((MLKEM_Q + 1) / 2);
            }
        }
        r
    }

    /// Recover the 32-byte message, rounding each coefficient to the
    /// nearest multiple of q/2.
    pub(crate) fn to_msg(&self) -> [u8; MLKEM_SYM_BYTES] {
        let mut msg = [0u8; MLKEM_SYM_BYTES];
        for i in 0..MLKEM_N / 8 {
            for j in 0..8 {
                let mut t = self.coeffs[8 * i + j];
                t += (t >> 15) & MLKEM_Q;
                let bit = (((t as u32) << 1) + (MLKEM_Q as u32) / 2) / (MLKEM_Q as u32) & 1;
                msg[i] |= (bit as u8) << j;
            }
        }
        msg
    }

    /// Sample noise for the secret and error vectors: CBD of width eta1.
    pub(crate) fn getnoise_eta1<P: MlKemParams>(seed: &[u8; MLKEM_SYM_BYTES], nonce: u8) -> Poly {
        let mut buf = [0u8; 3 * MLKEM_N / 4];
        let buf = &mut buf[..P::ETA1 * MLKEM_N / 4];
        prf(buf, seed, nonce);
        let mut r = Poly::zero();
        match P::ETA1 {
            2 => cbd2(&mut r, buf),
            3 => cbd3(&mut r, buf),
            _ => unreachable!(),
        }
        buf.zeroize();
        r
    }

    /// Sample encryption noise: CBD of width eta2 (always 2).
    pub(crate) fn getnoise_eta2<P: MlKemParams>(seed: &[u8; MLKEM_SYM_BYTES], nonce: u8) -> Poly {
        let mut buf = [0u8; 2 * MLKEM_N / 4];
        prf(&mut buf, seed, nonce);
        let mut r = Poly::zero();
        debug_assert_eq!(P::ETA2, 2);
        cbd2(&mut r, &buf);
        buf.zeroize();
        r
    }
}

#[inline(always)]
fn load32_le(b: &[u8]) -> u32 {
    (b[0] as u32) | (b[1] as u32) << 8 | (b[2] as u32) << 16 | (b[3] as u32) << 24
}

#[inline(always)]
fn load24_le(b: &[u8]) -> u32 {
    (b[0] as u32) | (b[1] as u32) << 8 | (b[2] as u32) << 16
}

/// Centered binomial distribution of width 2: popcount pairs of 2 bits.
fn cbd2(r: &mut Poly, buf: &[u8]) {
    debug_assert_eq!(buf.len(), 2 * MLKEM_N / 4);
    for i in 0..MLKEM_N / 8 {
        let t = load32_le(&buf[4 * i..]);
        let mut d = t & 0x5555_5555;
        d += (t >> 1) & 0x5555_5555;

        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            r.coeffs[8 * i + j] = a - b;
        }
    }
}

/// Centered binomial distribution of width 3: popcount pairs of 3 bits.
fn cbd3(r: &mut Poly, buf: &[u8]) {
    debug_assert_eq!(buf.len(), 3 * MLKEM_N / 4);
    for i in 0..MLKEM_N / 4 {
        let t = load24_le(&buf[3 * i..]);
        let mut d = t & 0x0024_9249;
        d += (t >> 1) & 0x0024_9249;
        d += (t >> 2) & 0x0024_9249;

        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            r.coeffs[4 * i + j] = a - b;
        }
    }
}
