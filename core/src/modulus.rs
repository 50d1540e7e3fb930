//! Validated moduli and the Montgomery constants derived from them.

use std::fmt;
use std::str::FromStr;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use math::constants::{LIMB_BYTES, MAX_BYTES};
use math::limbs::{from_be_bytes_padded, limbs_for, lt};
use math::mont::neg_inv;
use num_bigint::BigUint;
use num_traits::One;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::{FieldContextError, Result};

/// Widest accepted modulus, in bytes (768 bits).
pub const MAX_MODULUS_BYTES: usize = MAX_BYTES;

/// An odd modulus of 1 to [`MAX_MODULUS_BYTES`] bytes together with the
/// constants Montgomery arithmetic over it needs.
///
/// With `n` limbs of padding, `R = 2^(64 n)`:
/// - `mod_inv = -m^-1 mod 2^64`
/// - `r2 = R^2 mod m`, which moves a canonical value into Montgomery form
///   with one multiplication
/// - `one = 1`, which moves a Montgomery value back out the same way
///
/// Nothing here changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    bytes: Vec<u8>,
    value: BigUint,
    limbs: Vec<u64>,
    r2: Vec<u64>,
    one: Vec<u64>,
    mod_inv: u64,
}

impl Modulus {
    /// Validate a big-endian modulus and precompute its constants.
    ///
    /// The byte string is taken as-is: a leading zero byte is an error, not
    /// something to strip.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_MODULUS_BYTES {
            return Err(FieldContextError::ModulusTooLarge(bytes.len()));
        }
        let (Some(&high), Some(&low)) = (bytes.first(), bytes.last()) else {
            return Err(FieldContextError::EmptyModulus);
        };
        if low & 1 == 0 {
            return Err(FieldContextError::ModulusMustBeOdd);
        }
        if high == 0 {
            return Err(FieldContextError::ModulusMustBeNormalized);
        }

        let limb_count = limbs_for(bytes.len());
        let padded_bits = limb_count * LIMB_BYTES * 8;
        let value = BigUint::from_bytes_be(bytes);

        let mut limbs = vec![0u64; limb_count];
        from_be_bytes_padded(bytes, &mut limbs)?;

        let r2_value = (BigUint::one() << (2 * padded_bits)) % &value;
        let mut r2 = vec![0u64; limb_count];
        from_be_bytes_padded(&r2_value.to_bytes_be(), &mut r2)?;

        let mut one = vec![0u64; limb_count];
        one[0] = 1;

        let mod_inv = neg_inv(limbs[0]);

        Ok(Self {
            bytes: bytes.to_vec(),
            value,
            limbs,
            r2,
            one,
            mod_inv,
        })
    }

    /// The modulus exactly as supplied, big-endian.
    #[inline]
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Width of one element: the modulus length rounded up to whole limbs.
    #[inline]
    pub fn padded_size(&self) -> usize {
        self.limbs.len() * LIMB_BYTES
    }

    #[inline]
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Little-endian limbs, zero-padded to [`padded_size`](Self::padded_size).
    #[inline]
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    #[inline]
    pub fn r2(&self) -> &[u64] {
        &self.r2
    }

    #[inline]
    pub fn one(&self) -> &[u64] {
        &self.one
    }

    #[inline]
    pub fn mod_inv(&self) -> u64 {
        self.mod_inv
    }

    /// Whether a limb array of this width holds a value below the modulus.
    #[inline]
    pub fn is_reduced(&self, value: &[u64]) -> bool {
        lt(value, &self.limbs)
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.bytes))
    }
}

impl FromStr for Modulus {
    type Err = FieldContextError;

    /// Parse a hex string, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|err| {
            FieldContextError::InvalidModulusEncoding(err.to_string())
        })?;
        Self::from_be_bytes(&bytes)
    }
}

impl Serialize for Modulus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Modulus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(de::Error::custom)
    }
}

impl GetSize for Modulus {
    fn get_heap_size(&self) -> usize {
        let digits = (self.value.bits() as usize).div_ceil(64);
        self.bytes.get_heap_size()
            + digits * std::mem::size_of::<u64>()
            + self.limbs.get_heap_size()
            + self.r2.get_heap_size()
            + self.one.get_heap_size()
    }
}

impl<'a> Arbitrary<'a> for Modulus {
    /// Any width from 1 to [`MAX_MODULUS_BYTES`], forced odd and normalized.
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(1..=MAX_MODULUS_BYTES)?;
        let mut bytes = vec![0u8; len];
        u.fill_buffer(&mut bytes)?;
        bytes[len - 1] |= 1;
        if bytes[0] == 0 {
            bytes[0] = 1;
        }
        Self::from_be_bytes(&bytes)
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1 + MAX_MODULUS_BYTES))
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::*;

    fn limbs_value(limbs: &[u64]) -> BigUint {
        limbs
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &l| (acc << 64) + l)
    }

    #[test]
    fn validation_runs_in_order() {
        assert_eq!(
            Err(FieldContextError::ModulusTooLarge(97)),
            Modulus::from_be_bytes(&[0u8; 97])
        );
        assert_eq!(
            Err(FieldContextError::EmptyModulus),
            Modulus::from_be_bytes(&[])
        );
        assert_eq!(
            Err(FieldContextError::ModulusMustBeOdd),
            Modulus::from_be_bytes(&[0x00, 0x62])
        );
        assert_eq!(
            Err(FieldContextError::ModulusMustBeNormalized),
            Modulus::from_be_bytes(&[0x00, 0x61])
        );
    }

    #[test]
    fn small_modulus_constants() {
        let m = Modulus::from_be_bytes(&[0x61]).unwrap();
        assert_eq!(8, m.padded_size());
        assert_eq!(1, m.limb_count());
        assert_eq!(&[97], m.limbs());
        assert_eq!(&[1], m.one());
        assert_eq!(u64::MAX, 97u64.wrapping_mul(m.mod_inv()));

        let expected = (BigUint::one() << 128) % 97u32;
        assert_eq!(expected, limbs_value(m.r2()));
        assert!(m.is_reduced(&[96]));
        assert!(!m.is_reduced(&[97]));
    }

    #[test]
    fn padding_rounds_up_to_whole_limbs() {
        let mut bytes = vec![0xffu8; 9];
        bytes[0] = 0x01;
        let m = Modulus::from_be_bytes(&bytes).unwrap();
        assert_eq!(16, m.padded_size());
        assert_eq!(&[u64::MAX, 1], m.limbs());
        assert_eq!(BigUint::from_bytes_be(&bytes), *m.value());
    }

    #[test]
    fn widest_modulus_is_accepted() {
        let m = Modulus::from_be_bytes(&[0xffu8; MAX_MODULUS_BYTES]).unwrap();
        assert_eq!(MAX_MODULUS_BYTES, m.padded_size());
        let r = BigUint::one() << (MAX_MODULUS_BYTES * 8);
        assert_eq!((&r * &r) % m.value(), limbs_value(m.r2()));
    }

    #[test]
    fn parses_hex_with_and_without_prefix() {
        let a: Modulus = "0x61".parse().unwrap();
        let b: Modulus = "61".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!("0x61", a.to_string());
        assert!(matches!(
            "0xzz".parse::<Modulus>(),
            Err(FieldContextError::InvalidModulusEncoding(_))
        ));
        assert_eq!(
            Err(FieldContextError::ModulusMustBeNormalized),
            "0x0061".parse::<Modulus>()
        );
    }

    #[test]
    fn arbitrary_always_yields_a_valid_modulus() {
        let data: Vec<u8> = (0..=255).collect();
        let mut u = Unstructured::new(&data);
        let m = Modulus::arbitrary(&mut u).unwrap();
        assert_eq!(Ok(m.clone()), Modulus::from_be_bytes(m.as_be_bytes()));

        let mut empty = Unstructured::new(&[]);
        let m = Modulus::arbitrary(&mut empty).unwrap();
        assert_eq!(&[1], m.as_be_bytes());
    }

    #[test]
    fn heap_size_counts_every_limb_array() {
        let m = Modulus::from_be_bytes(&[0x61]).unwrap();
        assert!(m.get_heap_size() >= 3 * std::mem::size_of::<u64>() + 1);
    }
}
