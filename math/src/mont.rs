//! Fixed-width Montgomery arithmetic over `N` little-endian 64-bit limbs.
//!
//! With `R = 2^(64 N)` and an odd modulus `m < R`, an element `a` is held as
//! `a * R mod m`. Addition and subtraction act on that form directly;
//! multiplication uses word-by-word REDC (CIOS) with `-m^-1 mod 2^64`.
//!
//! Every routine expects operands already reduced below `m` and returns a
//! value below `m`. The final correction in each routine is a mask select,
//! so the instruction stream depends only on `N`.

use crate::limbs::{adc, mac, sbb};

/// Negative inverse of `m` modulo `2^64`, i.e. the `k` with
/// `m * k ≡ -1 (mod 2^64)`. `m` must be odd.
///
/// Newton iteration: `2 - m` is correct to the low bit(s), and every round
/// doubles the number of correct low bits, so six rounds cover 64 bits.
pub const fn neg_inv(m: u64) -> u64 {
    let mut k0 = 2u64.wrapping_sub(m);
    let mut t = m.wrapping_sub(1);
    let mut i = 1;
    while i < u64::BITS {
        t = t.wrapping_mul(t);
        k0 = k0.wrapping_mul(t.wrapping_add(1));
        i <<= 1;
    }
    k0.wrapping_neg()
}

/// All-ones when `flag == 1`, zero when `flag == 0`.
#[inline(always)]
const fn mask(flag: u64) -> u64 {
    flag.wrapping_neg()
}

/// Pick `a` where `choice` is all-ones and `b` where it is zero.
#[inline(always)]
fn select<const N: usize>(
    choice: u64,
    a: &[u64; N],
    b: &[u64; N],
) -> [u64; N] {
    let mut out = [0u64; N];
    for i in 0..N {
        out[i] = (a[i] & choice) | (b[i] & !choice);
    }
    out
}

/// `a - b` with the final borrow.
#[inline(always)]
fn sub_borrow<const N: usize>(
    a: &[u64; N],
    b: &[u64; N],
) -> ([u64; N], u64) {
    let mut out = [0u64; N];
    let mut borrow = 0;
    for i in 0..N {
        (out[i], borrow) = sbb(a[i], b[i], borrow);
    }
    (out, borrow)
}

/// `(x + y) mod m`.
#[inline]
pub fn add_mod<const N: usize>(
    x: &[u64; N],
    y: &[u64; N],
    m: &[u64; N],
) -> [u64; N] {
    let mut sum = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        (sum[i], carry) = adc(x[i], y[i], carry);
    }

    // x + y < 2m: subtract once if it overflowed R or is at least m.
    let (reduced, borrow) = sub_borrow(&sum, m);
    let keep_sum = mask(borrow & (carry ^ 1));
    select(keep_sum, &sum, &reduced)
}

/// `(x - y) mod m`.
#[inline]
pub fn sub_mod<const N: usize>(
    x: &[u64; N],
    y: &[u64; N],
    m: &[u64; N],
) -> [u64; N] {
    let (diff, borrow) = sub_borrow(x, y);

    let mut wrapped = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        (wrapped[i], carry) = adc(diff[i], m[i], carry);
    }

    select(mask(borrow), &wrapped, &diff)
}

/// Montgomery product `x * y * R^-1 mod m`.
///
/// `inv` must be [`neg_inv`] of `m[0]`.
#[inline]
pub fn mul_mod<const N: usize>(
    x: &[u64; N],
    y: &[u64; N],
    m: &[u64; N],
    inv: u64,
) -> [u64; N] {
    // Accumulator t[0..N] plus one extra high word; the carry out of that
    // word is at most 1 and is folded back in each round.
    let mut t = [0u64; N];
    let mut t_hi = 0u64;

    for i in 0..N {
        let mut carry = 0;
        for j in 0..N {
            (t[j], carry) = mac(t[j], x[j], y[i], carry);
        }
        let (hi, overflow) = adc(t_hi, carry, 0);

        let q = t[0].wrapping_mul(inv);
        let (_, mut carry) = mac(t[0], q, m[0], 0);
        for j in 1..N {
            (t[j - 1], carry) = mac(t[j], q, m[j], carry);
        }
        (t[N - 1], carry) = adc(hi, carry, 0);
        t_hi = overflow + carry;
    }

    // t + t_hi * R < 2m.
    let (reduced, borrow) = sub_borrow(&t, m);
    let keep_t = mask(borrow & (t_hi ^ 1));
    select(keep_t, &t, &reduced)
}
