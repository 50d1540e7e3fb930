//! Shared constants for the limb primitives.

/// Bytes per limb.
pub const LIMB_BYTES: usize = 8;

/// Widest supported element, in limbs (768 bits).
pub const MAX_LIMBS: usize = 12;

/// Widest supported element, in bytes.
pub const MAX_BYTES: usize = MAX_LIMBS * LIMB_BYTES;
