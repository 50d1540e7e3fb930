//! Per-width operation prices published to the metering layer.
//!
//! The engine never charges these itself; a host reads
//! [`FieldContext::costs`](crate::context::FieldContext::costs) and meters
//! each call however it likes.

use math::constants::MAX_LIMBS;
use serde::{Deserialize, Serialize};

/// Arithmetic operations exposed by a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddMod,
    SubMod,
    MulMod,
}

/// Prices for one element width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationCosts {
    /// Shared by addition and subtraction.
    pub add_sub: u64,
    pub mul: u64,
}

impl OperationCosts {
    #[inline]
    pub const fn cost_of(self, op: Operation) -> u64 {
        match op {
            Operation::AddMod | Operation::SubMod => self.add_sub,
            Operation::MulMod => self.mul,
        }
    }
}

/// Prices for every supported width; entry `i` is for `i + 1` limbs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostSchedule {
    pub add_sub: [u64; MAX_LIMBS],
    pub mul: [u64; MAX_LIMBS],
}

impl CostSchedule {
    /// Addition stays near-flat in width; multiplication grows roughly with
    /// the square of the limb count.
    pub const DEFAULT: Self = Self {
        add_sub: [1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2],
        mul: [1, 1, 1, 2, 3, 3, 5, 6, 7, 9, 11, 12],
    };

    /// Prices for elements of `limbs` limbs, if that width is supported.
    #[inline]
    pub const fn for_limbs(&self, limbs: usize) -> Option<OperationCosts> {
        if limbs == 0 || limbs > MAX_LIMBS {
            return None;
        }
        Some(OperationCosts {
            add_sub: self.add_sub[limbs - 1],
            mul: self.mul[limbs - 1],
        })
    }
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_covers_exactly_the_supported_widths() {
        let schedule = CostSchedule::DEFAULT;
        assert_eq!(None, schedule.for_limbs(0));
        assert_eq!(None, schedule.for_limbs(MAX_LIMBS + 1));
        assert_eq!(
            Some(OperationCosts { add_sub: 1, mul: 1 }),
            schedule.for_limbs(1)
        );
        assert_eq!(
            Some(OperationCosts {
                add_sub: 2,
                mul: 12
            }),
            schedule.for_limbs(MAX_LIMBS)
        );
    }

    #[test]
    fn default_schedule_never_gets_cheaper_with_width() {
        let schedule = CostSchedule::default();
        assert!(schedule.add_sub.windows(2).all(|w| w[0] <= w[1]));
        assert!(schedule.mul.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn add_and_sub_share_a_price() {
        let costs = OperationCosts { add_sub: 4, mul: 9 };
        assert_eq!(4, costs.cost_of(Operation::AddMod));
        assert_eq!(4, costs.cost_of(Operation::SubMod));
        assert_eq!(9, costs.cost_of(Operation::MulMod));
    }

    #[test]
    fn schedule_round_trips_through_json() {
        let json = serde_json::to_string(&CostSchedule::DEFAULT).unwrap();
        let back: CostSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(CostSchedule::DEFAULT, back);

        let op: Operation = serde_json::from_str("\"mul_mod\"").unwrap();
        assert_eq!(Operation::MulMod, op);
    }
}
