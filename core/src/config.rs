//! Serializable description of a context.

use serde::{Deserialize, Serialize};

use crate::cost::CostSchedule;
use crate::modulus::Modulus;

/// Everything needed to build a [`FieldContext`](crate::context::FieldContext).
///
/// ```json
/// { "modulus": "0x61", "scratch_capacity": 4 }
/// ```
///
/// `costs` falls back to [`CostSchedule::DEFAULT`] when omitted. The modulus
/// is validated while deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub modulus: Modulus,
    pub scratch_capacity: usize,
    #[serde(default)]
    pub costs: CostSchedule,
}

impl FieldConfig {
    pub fn new(modulus: Modulus, scratch_capacity: usize) -> Self {
        Self {
            modulus,
            scratch_capacity,
            costs: CostSchedule::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_uses_default_costs() {
        let config: FieldConfig =
            serde_json::from_str(r#"{"modulus":"0x61","scratch_capacity":4}"#)
                .unwrap();
        assert_eq!(&[0x61], config.modulus.as_be_bytes());
        assert_eq!(4, config.scratch_capacity);
        assert_eq!(CostSchedule::DEFAULT, config.costs);
    }

    #[test]
    fn invalid_modulus_fails_to_deserialize() {
        let err = serde_json::from_str::<FieldConfig>(
            r#"{"modulus":"0x0061","scratch_capacity":4}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("leading zero"));
    }

    #[test]
    fn round_trips_through_json() {
        let mut config =
            FieldConfig::new("0x010000000000000001".parse().unwrap(), 16);
        config.costs.mul[1] = 42;
        let json = serde_json::to_string(&config).unwrap();
        let back: FieldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
