use thiserror::Error;

use crate::constants::{LIMB_BYTES, MAX_LIMBS};

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Errors returned by the limb helpers and the kernel table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error("byte length {0} is not a multiple of {limb}", limb = LIMB_BYTES)]
    UnalignedLength(usize),
    #[error("expected {expected} limbs but found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error(
        "no kernel for {0} limbs, supported widths are 1..={max}",
        max = MAX_LIMBS
    )]
    UnsupportedWidth(usize),
}

pub type Error = MathError;
