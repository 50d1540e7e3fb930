//! Width-erased access to the [`mont`](crate::mont) routines.
//!
//! Each supported width is a monomorphized [`Width<N>`]; callers that only
//! learn the width at runtime pick one from [`kernel`] and keep the returned
//! `&'static dyn MontgomeryKernel` for as long as the width is fixed.

use std::array;
use std::fmt;

use crate::{
    constants::MAX_LIMBS,
    error::{MathError, Result},
    mont,
};

/// Add, subtract and Montgomery-multiply over limb slices of one fixed width.
///
/// All slices passed to a kernel must be exactly [`limbs`](Self::limbs) long,
/// hold values below the modulus, and `out` is written only after both
/// operands have been read.
pub trait MontgomeryKernel: fmt::Debug + Send + Sync {
    /// Width served by this kernel.
    fn limbs(&self) -> usize;

    fn add_mod(&self, out: &mut [u64], x: &[u64], y: &[u64], modulus: &[u64]);

    fn sub_mod(&self, out: &mut [u64], x: &[u64], y: &[u64], modulus: &[u64]);

    /// Montgomery product; `mod_inv` is [`mont::neg_inv`] of `modulus[0]`.
    fn mul_mod(
        &self,
        out: &mut [u64],
        x: &[u64],
        y: &[u64],
        modulus: &[u64],
        mod_inv: u64,
    );
}

/// Kernel for elements of exactly `N` limbs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Width<const N: usize>;

impl<const N: usize> Width<N> {
    #[inline(always)]
    fn load(limbs: &[u64]) -> [u64; N] {
        debug_assert_eq!(N, limbs.len());
        array::from_fn(|i| limbs[i])
    }
}

impl<const N: usize> MontgomeryKernel for Width<N> {
    #[inline]
    fn limbs(&self) -> usize {
        N
    }

    fn add_mod(&self, out: &mut [u64], x: &[u64], y: &[u64], modulus: &[u64]) {
        let r =
            mont::add_mod(&Self::load(x), &Self::load(y), &Self::load(modulus));
        out.copy_from_slice(&r);
    }

    fn sub_mod(&self, out: &mut [u64], x: &[u64], y: &[u64], modulus: &[u64]) {
        let r =
            mont::sub_mod(&Self::load(x), &Self::load(y), &Self::load(modulus));
        out.copy_from_slice(&r);
    }

    fn mul_mod(
        &self,
        out: &mut [u64],
        x: &[u64],
        y: &[u64],
        modulus: &[u64],
        mod_inv: u64,
    ) {
        let r = mont::mul_mod(
            &Self::load(x),
            &Self::load(y),
            &Self::load(modulus),
            mod_inv,
        );
        out.copy_from_slice(&r);
    }
}

static KERNELS: [&dyn MontgomeryKernel; MAX_LIMBS] =
    kernel_table!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12);

/// The kernel for elements of `limbs` 64-bit limbs.
pub fn kernel(limbs: usize) -> Result<&'static dyn MontgomeryKernel> {
    limbs
        .checked_sub(1)
        .and_then(|index| KERNELS.get(index))
        .copied()
        .ok_or(MathError::UnsupportedWidth(limbs))
}
