//! Modular reduction over Z_q with q = 3329.
//!
//! All routines are branch-free; none of them inspects the value of its
//! argument beyond fixed arithmetic.

use super::params::MLKEM_Q;

/// q^-1 mod 2^16
const QINV: i16 = -3327;

/// 2^16 mod q, signed representative
pub(crate) const MONT: i16 = -1044;

/// Montgomery reduction.
///
/// For `a` with |a| < q * 2^15, returns a 16-bit value congruent to
/// a * 2^-16 mod q, in the open interval (-q, q).
#[inline(always)]
pub(crate) fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (MLKEM_Q as i32)) >> 16) as i16
}

/// Barrett reduction.
///
/// Returns a representative congruent to a mod q, centered around zero.
/// Serialization points re-canonicalize into [0, q) by conditionally
/// adding q.
#[inline(always)]
pub(crate) fn barrett_reduce(a: i16) -> i16 {
    // floor(2^26 / q + 1/2) = 20159
    const V: i32 = ((1 << 26) + (MLKEM_Q as i32) / 2) / (MLKEM_Q as i32);
    let t = (V * (a as i32) + (1 << 25)) >> 26;
    ((a as i32) - t * (MLKEM_Q as i32)) as i16
}

/// Multiplication followed by Montgomery reduction.
#[inline(always)]
pub(crate) fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce(a as i32 * b as i32)
}
