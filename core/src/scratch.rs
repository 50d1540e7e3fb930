//! Handle-addressed scratch arena.
//!
//! The arena is one flat run of limbs split into equal slots. Every access
//! goes through [`Scratch::span`], which is the only place a handle turns
//! into a limb offset.

use std::ops::Range;

use get_size2::GetSize;
use math::constants::LIMB_BYTES;

use crate::error::{FieldContextError, Result};

/// Largest number of slots a context may allocate.
pub const MAX_SCRATCH_SLOTS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scratch {
    limbs: Vec<u64>,
    slot_limbs: usize,
    slots: usize,
}

impl Scratch {
    /// Allocate `slots` zeroed slots of `slot_limbs` limbs each.
    pub fn new(slot_limbs: usize, slots: usize) -> Result<Self> {
        if slots > MAX_SCRATCH_SLOTS {
            return Err(FieldContextError::ScratchTooLarge(slots));
        }

        Ok(Self {
            limbs: vec![0; slot_limbs * slots],
            slot_limbs,
            slots,
        })
    }

    #[inline]
    pub fn slot_limbs(&self) -> usize {
        self.slot_limbs
    }

    #[inline]
    pub fn element_size_bytes(&self) -> usize {
        self.slot_limbs * LIMB_BYTES
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    #[inline]
    pub fn allocated_size_bytes(&self) -> usize {
        self.limbs.len() * LIMB_BYTES
    }

    /// Limb range covering slots `handle..handle + count`.
    fn span(&self, handle: usize, count: usize) -> Result<Range<usize>> {
        let end = handle
            .checked_add(count)
            .filter(|&end| end <= self.slots)
            .ok_or(FieldContextError::OutOfBounds {
                handle,
                count,
                capacity: self.slots,
            })?;
        Ok(handle * self.slot_limbs..end * self.slot_limbs)
    }

    /// Fail unless slots `handle..handle + count` all exist.
    #[inline]
    pub fn check(&self, handle: usize, count: usize) -> Result<()> {
        self.span(handle, count).map(|_| ())
    }

    pub fn slots(&self, handle: usize, count: usize) -> Result<&[u64]> {
        let range = self.span(handle, count)?;
        Ok(&self.limbs[range])
    }

    pub fn slots_mut(
        &mut self,
        handle: usize,
        count: usize,
    ) -> Result<&mut [u64]> {
        let range = self.span(handle, count)?;
        Ok(&mut self.limbs[range])
    }

    #[inline]
    pub fn slot(&self, handle: usize) -> Result<&[u64]> {
        self.slots(handle, 1)
    }

    #[inline]
    pub fn slot_mut(&mut self, handle: usize) -> Result<&mut [u64]> {
        self.slots_mut(handle, 1)
    }
}

impl GetSize for Scratch {
    fn get_heap_size(&self) -> usize {
        self.limbs.get_heap_size()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn sizes_follow_slot_width_and_count() {
        let scratch = Scratch::new(3, 10).unwrap();
        assert_eq!(24, scratch.element_size_bytes());
        assert_eq!(10, scratch.slot_count());
        assert_eq!(240, scratch.allocated_size_bytes());
        assert_eq!(240, scratch.get_heap_size());
    }

    #[test]
    fn capacity_is_capped() {
        assert!(Scratch::new(12, MAX_SCRATCH_SLOTS).is_ok());
        assert_eq!(
            Err(FieldContextError::ScratchTooLarge(MAX_SCRATCH_SLOTS + 1)),
            Scratch::new(1, MAX_SCRATCH_SLOTS + 1)
        );
    }

    #[test]
    fn slots_are_disjoint_and_start_zeroed() {
        let mut scratch = Scratch::new(2, 4).unwrap();
        scratch.slot_mut(1).unwrap().copy_from_slice(&[7, 8]);
        assert_eq!(&[0, 0], scratch.slot(0).unwrap());
        assert_eq!(&[7, 8], scratch.slot(1).unwrap());
        assert_eq!(&[0, 0, 7, 8, 0, 0], scratch.slots(0, 3).unwrap());
    }

    #[test]
    fn empty_range_at_the_end_is_in_bounds() {
        let scratch = Scratch::new(1, 4).unwrap();
        assert!(scratch.slots(4, 0).unwrap().is_empty());
        assert!(scratch.check(5, 0).is_err());
    }

    #[test]
    fn overflowing_range_is_out_of_bounds() {
        let scratch = Scratch::new(1, 4).unwrap();
        assert_eq!(
            Err(FieldContextError::OutOfBounds {
                handle: 1,
                count: usize::MAX,
                capacity: 4
            }),
            scratch.check(1, usize::MAX)
        );
    }

    #[proptest]
    fn access_succeeds_exactly_when_range_fits(
        #[strategy(0usize..300)] handle: usize,
        #[strategy(0usize..300)] count: usize,
        #[strategy(0usize..=MAX_SCRATCH_SLOTS)] slots: usize,
    ) {
        let scratch = Scratch::new(2, slots).unwrap();
        let fits = handle + count <= slots;
        prop_assert_eq!(fits, scratch.check(handle, count).is_ok());
        if fits {
            prop_assert_eq!(2 * count, scratch.slots(handle, count).unwrap().len());
        }
    }
}
