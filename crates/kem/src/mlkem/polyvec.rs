//! Vectors of K ring elements.

use core::marker::PhantomData;
use zeroize::Zeroize;

use super::params::MlKemParams;
use super::poly::Poly;

/// A vector of K polynomials, K in {2, 3, 4}.
pub(crate) struct PolyVec<P: MlKemParams> {
    pub(crate) polys: Vec<Poly>,
    _params: PhantomData<P>,
}

impl<P: MlKemParams> Zeroize for PolyVec<P> {
    fn zeroize(&mut self) {
        self.polys.zeroize();
    }
}

impl<P: MlKemParams> Clone for PolyVec<P> {
    fn clone(&self) -> Self {
        Self {
            polys: self.polys.clone(),
            _params: PhantomData,
        }
    }
}

impl<P: MlKemParams> PolyVec<P> {
    /// Creates a new zero vector of dimension K.
    pub(crate) fn zero() -> Self {
        Self {
            polys: vec![Poly::zero(); P::K],
            _params: PhantomData,
        }
    }

    /// Applies the forward NTT to each lane.
    pub(crate) fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Applies the inverse NTT to each lane; outputs are in the Montgomery
    /// domain.
    pub(crate) fn invntt_tomont(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt_tomont();
        }
    }

    /// Barrett-reduces every coefficient of every lane.
    pub(crate) fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    /// self += rhs, lane-wise, without reduction.
    pub(crate) fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            a.add(b);
        }
    }

    /// Inner product in the NTT domain:
    /// sum over lanes of basemul(self[k], rhs[k]), Barrett-reduced.
    ///
    /// Used for the rows of A*s and for t^T*r; both inputs must be in the
    /// NTT domain, the result carries one Montgomery factor less.
    pub(crate) fn basemul_acc_montgomery(&self, rhs: &Self) -> Poly {
        let mut acc = Poly::basemul_montgomery(&self.polys[0], &rhs.polys[0]);
        for (a, b) in self.polys.iter().zip(rhs.polys.iter()).skip(1) {
            let t = Poly::basemul_montgomery(a, b);
            acc.add(&t);
        }
        acc.reduce();
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::super::params::{MlKem768Params, MLKEM_N, MLKEM_Q};
    use super::*;

    #[test]
    fn zero_has_dimension_k() {
        let pv = PolyVec::<MlKem768Params>::zero();
        assert_eq!(pv.polys.len(), 3);
        assert!(pv.polys.iter().all(|p| p.coeffs.iter().all(|&c| c == 0)));
    }

    #[test]
    fn add_assign_is_lane_wise() {
        let mut a = PolyVec::<MlKem768Params>::zero();
        let mut b = PolyVec::<MlKem768Params>::zero();
        for lane in 0..3 {
            a.polys[lane].coeffs[0] = lane as i16 + 1;
            b.polys[lane].coeffs[0] = 10;
        }
        a.add_assign(&b);
        assert_eq!(a.polys[0].coeffs[0], 11);
        assert_eq!(a.polys[1].coeffs[0], 12);
        assert_eq!(a.polys[2].coeffs[0], 13);
    }

    #[test]
    fn basemul_acc_output_is_reduced() {
        let mut a = PolyVec::<MlKem768Params>::zero();
        let mut b = PolyVec::<MlKem768Params>::zero();
        for lane in 0..3 {
            for i in 0..MLKEM_N {
                a.polys[lane].coeffs[i] = ((i * 31 + lane * 7) % MLKEM_Q as usize) as i16;
                b.polys[lane].coeffs[i] = ((i * 13 + lane * 5) % MLKEM_Q as usize) as i16;
            }
        }
        let acc = a.basemul_acc_montgomery(&b);
        for &c in acc.coeffs.iter() {
            assert!((c as i32).unsigned_abs() <= MLKEM_Q as u32);
        }
    }
}
