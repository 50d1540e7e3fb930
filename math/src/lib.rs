//! Limb-level building blocks for fixed-width Montgomery arithmetic: byte and
//! limb conversion, limb comparison, the negative modular inverse, and one
//! add/sub/mul kernel per width from 64 to 768 bits.

#[macro_use]
mod macros;

pub mod constants;
pub mod error;
pub mod kernel;
pub mod limbs;
pub mod mont;

pub use error::MathError;
pub use kernel::{kernel, MontgomeryKernel, Width};
