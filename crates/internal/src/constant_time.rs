//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// This function runs in constant time regardless of the input values.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
///
/// The length comparison is public; only the contents are compared in
/// constant time.
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Constant-time conditional move
///
/// Overwrites `dst` with `src` if `choice` is set, otherwise leaves `dst`
/// unchanged. Both slices must have the same length.
pub fn ct_cmov(dst: &mut [u8], src: &[u8], choice: Choice) {
    assert_eq!(dst.len(), src.len());

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = u8::conditional_select(d, s, choice);
    }
}

/// Constant-time mask generation for a boolean condition
///
/// Returns an all-1s mask if condition is true, all-0s if false
pub fn ct_mask(condition: bool) -> u8 {
    0u8.wrapping_sub(condition as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_matches_plain_equality() {
        assert!(ct_eq([1u8, 2, 3], [1u8, 2, 3]));
        assert!(!ct_eq([1u8, 2, 3], [1u8, 2, 4]));
        assert!(!ct_eq([1u8, 2, 3], [1u8, 2]));
    }

    #[test]
    fn cmov_truth_table() {
        let src = [0xAAu8; 8];

        let mut dst = [0x55u8; 8];
        ct_cmov(&mut dst, &src, Choice::from(0));
        assert_eq!(dst, [0x55u8; 8]);

        ct_cmov(&mut dst, &src, Choice::from(1));
        assert_eq!(dst, [0xAAu8; 8]);
    }

    #[test]
    fn mask_values() {
        assert_eq!(ct_mask(false), 0x00);
        assert_eq!(ct_mask(true), 0xFF);
    }
}
