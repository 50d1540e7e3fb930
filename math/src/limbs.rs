//! Little-endian limb helpers shared by the kernels and by callers that move
//! values between big-endian byte strings and limb arrays.

use crate::{
    constants::LIMB_BYTES,
    error::{MathError, Result},
};

/// Number of limbs needed to hold `bytes` bytes.
#[inline]
pub const fn limbs_for(bytes: usize) -> usize {
    bytes.div_ceil(LIMB_BYTES)
}

/// `a + b + carry`, returning `(sum, carry_out)`.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = a as u128 + b as u128 + carry as u128;
    (t as u64, (t >> 64) as u64)
}

/// `a - b - borrow`, returning `(difference, borrow_out)`.
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (t as u64, (t >> 127) as u64)
}

/// `a + b * c + carry`, returning `(low, high)`. Cannot overflow.
#[inline(always)]
pub const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = a as u128 + (b as u128) * (c as u128) + carry as u128;
    (t as u64, (t >> 64) as u64)
}

/// Read a big-endian integer of exactly `8 * out.len()` bytes into `out`,
/// least-significant limb first.
pub fn from_be_bytes(bytes: &[u8], out: &mut [u64]) -> Result<()> {
    if bytes.len() % LIMB_BYTES != 0 {
        return Err(MathError::UnalignedLength(bytes.len()));
    }
    let found = bytes.len() / LIMB_BYTES;
    if found != out.len() {
        return Err(MathError::LengthMismatch {
            expected: out.len(),
            found,
        });
    }

    for (limb, chunk) in out.iter_mut().zip(bytes.rchunks_exact(LIMB_BYTES)) {
        let mut word = [0u8; LIMB_BYTES];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    Ok(())
}

/// Like [`from_be_bytes`], but accepts any length up to `8 * out.len()` and
/// zero-extends on the big-endian (left) side.
pub fn from_be_bytes_padded(bytes: &[u8], out: &mut [u64]) -> Result<()> {
    let width = out.len() * LIMB_BYTES;
    if bytes.len() > width {
        return Err(MathError::LengthMismatch {
            expected: out.len(),
            found: limbs_for(bytes.len()),
        });
    }

    let mut padded = vec![0u8; width];
    padded[width - bytes.len()..].copy_from_slice(bytes);
    from_be_bytes(&padded, out)
}

/// Write `limbs` into `out` as a big-endian integer of exactly
/// `8 * limbs.len()` bytes.
pub fn to_be_bytes(limbs: &[u64], out: &mut [u8]) -> Result<()> {
    if out.len() % LIMB_BYTES != 0 {
        return Err(MathError::UnalignedLength(out.len()));
    }
    let found = out.len() / LIMB_BYTES;
    if found != limbs.len() {
        return Err(MathError::LengthMismatch {
            expected: limbs.len(),
            found,
        });
    }

    for (chunk, limb) in out.chunks_exact_mut(LIMB_BYTES).zip(limbs.iter().rev())
    {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    Ok(())
}

/// `a < b` for equal-width limb arrays. Runs the full borrow chain so the
/// time taken does not depend on where the operands first differ.
#[inline]
pub fn lt(a: &[u64], b: &[u64]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    let mut borrow = 0;
    for (&x, &y) in a.iter().zip(b) {
        (_, borrow) = sbb(x, y, borrow);
    }
    borrow == 1
}
