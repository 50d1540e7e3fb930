use math::MathError;
use thiserror::Error;

use crate::modulus::MAX_MODULUS_BYTES;
use crate::scratch::MAX_SCRATCH_SLOTS;

/// Result type specialized for field-context operations.
pub type Result<T, E = FieldContextError> = std::result::Result<T, E>;

/// Errors raised while building or driving a [`FieldContext`].
///
/// Every variant is a local validation failure: when one is returned, the
/// scratch arena is exactly as it was before the call.
///
/// [`FieldContext`]: crate::context::FieldContext
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldContextError {
    #[error("modulus must have at least one byte")]
    EmptyModulus,
    #[error(
        "modulus is {0} bytes, at most {max} are supported",
        max = MAX_MODULUS_BYTES
    )]
    ModulusTooLarge(usize),
    #[error("modulus must be odd")]
    ModulusMustBeOdd,
    #[error("modulus must not have a leading zero byte")]
    ModulusMustBeNormalized,
    #[error(
        "scratch capacity {0} exceeds {max} slots",
        max = MAX_SCRATCH_SLOTS
    )]
    ScratchTooLarge(usize),
    #[error(
        "slots {handle}..{handle}+{count} out of bounds for capacity {capacity}"
    )]
    OutOfBounds {
        handle: usize,
        count: usize,
        capacity: usize,
    },
    #[error("value {index} of the batch is not reduced below the modulus")]
    ValueNotReduced { index: usize },
    #[error("buffer holds {found} bytes but {expected} are required")]
    InvalidBufferLength { expected: usize, found: usize },
    #[error("invalid modulus encoding: {0}")]
    InvalidModulusEncoding(String),
    #[error(transparent)]
    Math(#[from] MathError),
}
