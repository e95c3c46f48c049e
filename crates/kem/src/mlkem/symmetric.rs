//! Symmetric primitives consumed by ML-KEM.
//!
//! The scheme needs four things from SHA-3 land: the hashes H (SHA3-256)
//! and G (SHA3-512), an incremental SHAKE128 XOF for matrix expansion, and
//! one-shot SHAKE256 over concatenated inputs for the PRF and the implicit
//! rejection key. All of them come from the `sha3` crate.

use sha3::{
    digest::{Digest, ExtendableOutput, Update, XofReader},
    Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256,
};

use super::params::{MLKEM_SS_BYTES, MLKEM_SYM_BYTES};

/// SHAKE128 rate in bytes; matrix expansion squeezes whole blocks.
pub(crate) const XOF_BLOCK_BYTES: usize = 168;

/// H: SHA3-256.
pub(crate) fn hash_h(input: &[u8]) -> [u8; MLKEM_SYM_BYTES] {
    let mut out = [0u8; MLKEM_SYM_BYTES];
    out.copy_from_slice(&Sha3_256::digest(input));
    out
}

/// G: SHA3-512.
pub(crate) fn hash_g(input: &[u8]) -> [u8; 2 * MLKEM_SYM_BYTES] {
    let mut out = [0u8; 2 * MLKEM_SYM_BYTES];
    out.copy_from_slice(&Sha3_512::digest(input));
    out
}

/// The SHAKE128 XOF state used for matrix expansion.
///
/// Absorbs seed || x || y once, then squeezes 168-byte blocks on demand.
/// Dropping the value releases the state.
pub(crate) struct Xof {
    reader: Shake128Reader,
}

impl Xof {
    /// Absorb the extended seed and switch to the squeezing phase.
    pub(crate) fn absorb(seed: &[u8; MLKEM_SYM_BYTES], x: u8, y: u8) -> Self {
        let mut state = Shake128::default();
        state.update(seed);
        state.update(&[x, y]);
        Self {
            reader: state.finalize_xof(),
        }
    }

    /// Squeeze whole blocks into `out`; may be called repeatedly.
    pub(crate) fn squeeze_blocks(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len() % XOF_BLOCK_BYTES, 0);
        self.reader.read(out);
    }
}

/// PRF: SHAKE256(seed || nonce), output length chosen by the caller.
pub(crate) fn prf(out: &mut [u8], seed: &[u8; MLKEM_SYM_BYTES], nonce: u8) {
    let mut state = Shake256::default();
    state.update(seed);
    state.update(&[nonce]);
    state.finalize_xof().read(out);
}

/// SHAKE256 over the concatenation of several byte spans.
pub(crate) fn shake256_multi(out: &mut [u8], inputs: &[&[u8]]) {
    let mut state = Shake256::default();
    for chunk in inputs {
        state.update(chunk);
    }
    state.finalize_xof().read(out);
}

/// Implicit rejection key: SHAKE256(z || ct, 32).
pub(crate) fn rkprf(out: &mut [u8; MLKEM_SS_BYTES], z: &[u8; MLKEM_SYM_BYTES], ct: &[u8]) {
    shake256_multi(out, &[z, ct]);
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA3-256("") and SHA3-512("") from FIPS 202.
    #[test]
    fn hash_h_empty_vector() {
        let expected =
            hex::decode("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
                .unwrap();
        assert_eq!(hash_h(&[])[..], expected[..]);
    }

    #[test]
    fn hash_g_empty_vector() {
        let expected = hex::decode(
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
        )
        .unwrap();
        assert_eq!(hash_g(&[])[..], expected[..]);
    }

    #[test]
    fn xof_squeeze_is_streaming() {
        // Two blocks squeezed at once must equal two squeezed one at a time.
        let seed = [0u8; MLKEM_SYM_BYTES];
        let mut both = [0u8; 2 * XOF_BLOCK_BYTES];
        let mut xof = Xof::absorb(&seed, 1, 2);
        xof.squeeze_blocks(&mut both);

        let mut first = [0u8; XOF_BLOCK_BYTES];
        let mut second = [0u8; XOF_BLOCK_BYTES];
        let mut xof = Xof::absorb(&seed, 1, 2);
        xof.squeeze_blocks(&mut first);
        xof.squeeze_blocks(&mut second);

        assert_eq!(&both[..XOF_BLOCK_BYTES], first);
        assert_eq!(&both[XOF_BLOCK_BYTES..], second);
    }

    #[test]
    fn shake256_multi_equals_concatenation() {
        let mut split = [0u8; 64];
        shake256_multi(&mut split, &[b"abc", b"def"]);
        let mut joined = [0u8; 64];
        shake256_multi(&mut joined, &[b"abcdef"]);
        assert_eq!(split, joined);
    }

    #[test]
    fn prf_differs_per_nonce() {
        let seed = [9u8; MLKEM_SYM_BYTES];
        let mut a = [0u8; 128];
        let mut b = [0u8; 128];
        prf(&mut a, &seed, 0);
        prf(&mut b, &seed, 1);
        assert_ne!(a, b);
    }
}
