//! Handle-addressed Montgomery arithmetic for odd moduli up to 768 bits.
//!
//! ```
//! use fieldctx::FieldContext;
//!
//! let mut ctx = FieldContext::new(&[0x61], 4)?;
//! ctx.store(0, 2, &[0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 3])?;
//! ctx.mul_mod(2, 0, 1)?;
//!
//! let mut out = [0u8; 8];
//! ctx.load(&mut out, 2, 1)?;
//! assert_eq!(15, out[7]);
//! # Ok::<(), fieldctx::FieldContextError>(())
//! ```

pub mod config;
pub mod context;
pub mod cost;
pub mod error;
pub mod modulus;
pub mod scratch;

pub use config::FieldConfig;
pub use context::FieldContext;
pub use cost::{CostSchedule, Operation, OperationCosts};
pub use error::{FieldContextError, Result};
pub use modulus::{Modulus, MAX_MODULUS_BYTES};
pub use scratch::{Scratch, MAX_SCRATCH_SLOTS};
