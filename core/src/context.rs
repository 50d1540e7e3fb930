//! Montgomery arithmetic over a fixed modulus, addressed through handles.
//!
//! A [`FieldContext`] owns a [`Modulus`], the kernel for its width, and a
//! [`Scratch`] arena. Callers [`store`](FieldContext::store) canonical
//! values into slots, combine slots with [`add_mod`](FieldContext::add_mod),
//! [`sub_mod`](FieldContext::sub_mod) and [`mul_mod`](FieldContext::mul_mod),
//! and [`load`](FieldContext::load) results back out. Slots always hold
//! Montgomery-form values below the modulus.

use get_size2::GetSize;
use math::constants::MAX_LIMBS;
use math::kernel::{self, MontgomeryKernel};
use math::limbs;
use math::MathError;

use crate::config::FieldConfig;
use crate::cost::{CostSchedule, Operation, OperationCosts};
use crate::error::{FieldContextError, Result};
use crate::modulus::Modulus;
use crate::scratch::Scratch;

#[derive(Debug, Clone)]
pub struct FieldContext {
    modulus: Modulus,
    kernel: &'static dyn MontgomeryKernel,
    scratch: Scratch,
    costs: OperationCosts,
}

impl FieldContext {
    /// Build a context for a big-endian modulus with `scratch_capacity`
    /// slots, priced by [`CostSchedule::DEFAULT`].
    pub fn new(modulus: &[u8], scratch_capacity: usize) -> Result<Self> {
        Self::with_schedule(modulus, scratch_capacity, &CostSchedule::DEFAULT)
    }

    pub fn with_schedule(
        modulus: &[u8],
        scratch_capacity: usize,
        schedule: &CostSchedule,
    ) -> Result<Self> {
        let modulus = Modulus::from_be_bytes(modulus)?;
        Self::from_modulus(modulus, scratch_capacity, schedule)
    }

    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        Self::from_modulus(
            config.modulus.clone(),
            config.scratch_capacity,
            &config.costs,
        )
    }

    /// Bind the kernel for the modulus width and allocate the arena.
    pub fn from_modulus(
        modulus: Modulus,
        scratch_capacity: usize,
        schedule: &CostSchedule,
    ) -> Result<Self> {
        let scratch = Scratch::new(modulus.limb_count(), scratch_capacity)?;
        let width = modulus.limb_count();
        let kernel = kernel::kernel(width)?;
        let costs = schedule
            .for_limbs(width)
            .ok_or(MathError::UnsupportedWidth(width))?;

        Ok(Self {
            modulus,
            kernel,
            scratch,
            costs,
        })
    }

    #[inline]
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// Limbs per element.
    #[inline]
    pub fn limbs(&self) -> usize {
        self.scratch.slot_limbs()
    }

    #[inline]
    pub fn element_size_bytes(&self) -> usize {
        self.scratch.element_size_bytes()
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.scratch.slot_count()
    }

    #[inline]
    pub fn allocated_size_bytes(&self) -> usize {
        self.scratch.allocated_size_bytes()
    }

    #[inline]
    pub fn costs(&self) -> OperationCosts {
        self.costs
    }

    fn expect_len(&self, found: usize, count: usize) -> Result<()> {
        let expected = count * self.element_size_bytes();
        if found != expected {
            return Err(FieldContextError::InvalidBufferLength {
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Write `count` big-endian canonical values from `src` into slots
    /// `dest..dest + count`, converting each into Montgomery form.
    ///
    /// Either every slot is written or none is: the range, the buffer
    /// length, and every value (`< modulus`) are checked before the first
    /// write.
    pub fn store(
        &mut self,
        dest: usize,
        count: usize,
        src: &[u8],
    ) -> Result<()> {
        self.scratch.check(dest, count)?;
        self.expect_len(src.len(), count)?;

        let n = self.limbs();
        let size = self.element_size_bytes();
        let mut value = [0u64; MAX_LIMBS];

        for (index, bytes) in src.chunks_exact(size).enumerate() {
            limbs::from_be_bytes(bytes, &mut value[..n])?;
            if !self.modulus.is_reduced(&value[..n]) {
                return Err(FieldContextError::ValueNotReduced { index });
            }
        }

        let slots = self.scratch.slots_mut(dest, count)?;
        let values = src.chunks_exact(size);
        for (slot, bytes) in slots.chunks_exact_mut(n).zip(values) {
            limbs::from_be_bytes(bytes, &mut value[..n])?;
            self.kernel.mul_mod(
                slot,
                &value[..n],
                self.modulus.r2(),
                self.modulus.limbs(),
                self.modulus.mod_inv(),
            );
        }
        Ok(())
    }

    /// Read slots `src..src + count` back to canonical form and write them
    /// into `dest` as consecutive big-endian values.
    pub fn load(
        &self,
        dest: &mut [u8],
        src: usize,
        count: usize,
    ) -> Result<()> {
        let slots = self.scratch.slots(src, count)?;
        self.expect_len(dest.len(), count)?;

        let n = self.limbs();
        let size = self.element_size_bytes();
        let mut canonical = [0u64; MAX_LIMBS];

        let values = slots.chunks_exact(n);
        for (bytes, slot) in dest.chunks_exact_mut(size).zip(values) {
            self.kernel.mul_mod(
                &mut canonical[..n],
                slot,
                self.modulus.one(),
                self.modulus.limbs(),
                self.modulus.mod_inv(),
            );
            limbs::to_be_bytes(&canonical[..n], bytes)?;
        }
        Ok(())
    }

    /// `slot[out] = slot[x] + slot[y] mod m`.
    #[inline]
    pub fn add_mod(&mut self, out: usize, x: usize, y: usize) -> Result<()> {
        self.apply(Operation::AddMod, out, x, y)
    }

    /// `slot[out] = slot[x] - slot[y] mod m`.
    #[inline]
    pub fn sub_mod(&mut self, out: usize, x: usize, y: usize) -> Result<()> {
        self.apply(Operation::SubMod, out, x, y)
    }

    /// `slot[out] = slot[x] * slot[y] mod m`, Montgomery-reduced.
    #[inline]
    pub fn mul_mod(&mut self, out: usize, x: usize, y: usize) -> Result<()> {
        self.apply(Operation::MulMod, out, x, y)
    }

    /// Run one kernel call. Operands are copied out before `out` is
    /// borrowed, so any of the three handles may coincide.
    pub fn apply(
        &mut self,
        op: Operation,
        out: usize,
        x: usize,
        y: usize,
    ) -> Result<()> {
        self.scratch.check(out.max(x).max(y), 1)?;

        let n = self.limbs();
        let mut lhs = [0u64; MAX_LIMBS];
        let mut rhs = [0u64; MAX_LIMBS];
        lhs[..n].copy_from_slice(self.scratch.slot(x)?);
        rhs[..n].copy_from_slice(self.scratch.slot(y)?);
        let (lhs, rhs) = (&lhs[..n], &rhs[..n]);

        let modulus = self.modulus.limbs();
        let dst = self.scratch.slot_mut(out)?;
        match op {
            Operation::AddMod => self.kernel.add_mod(dst, lhs, rhs, modulus),
            Operation::SubMod => self.kernel.sub_mod(dst, lhs, rhs, modulus),
            Operation::MulMod => self.kernel.mul_mod(
                dst,
                lhs,
                rhs,
                modulus,
                self.modulus.mod_inv(),
            ),
        }
        Ok(())
    }
}

impl GetSize for FieldContext {
    fn get_heap_size(&self) -> usize {
        self.modulus.get_heap_size() + self.scratch.get_heap_size()
    }
}
