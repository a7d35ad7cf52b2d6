//! Parameter Entries and Positional Naming

use serde::{Deserialize, Serialize};

/// Parameter identifiers as the instrument expects them
pub mod names {
    pub const START_POTENTIAL: &str = "StartVoltage";
    pub const LOWER_POTENTIAL: &str = "FirstVertex";
    pub const UPPER_POTENTIAL: &str = "SecondVertex";
    pub const STEP_SIZE: &str = "Stepsize";
    pub const SCAN_RATE: &str = "Scanrate";
    pub const CYCLE: &str = "Cycle";
    pub const FIXED_WE_POTENTIAL: &str = "FixedWEPotential";
    pub const LPTIA_RTIA_SIZE: &str = "LPTIA_Resistor";
    pub const MAINS_FILTER: &str = "MainsFilter";
    pub const SINC2_OVERSAMPLING: &str = "Sinc2_Oversampling";
    pub const SINC3_OVERSAMPLING: &str = "Sinc3_Oversampling";
}

/// Number of entries a cyclic voltammetry parameter list must contain
pub const CV_NUM_PARAMETER: usize = 11;

/// Expected identifier for every position of a CV parameter list
pub const CV_PARAMETER_NAMES: [&str; CV_NUM_PARAMETER] = [
    names::START_POTENTIAL,
    names::LOWER_POTENTIAL,
    names::UPPER_POTENTIAL,
    names::STEP_SIZE,
    names::SCAN_RATE,
    names::CYCLE,
    names::FIXED_WE_POTENTIAL,
    names::LPTIA_RTIA_SIZE,
    names::MAINS_FILTER,
    names::SINC2_OVERSAMPLING,
    names::SINC3_OVERSAMPLING,
];

pub(crate) const FIRST_VERTEX_POS: usize = 1;
pub(crate) const SECOND_VERTEX_POS: usize = 2;
pub(crate) const FIXED_WE_POS: usize = 6;

/// A single `(name, value)` pair supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    pub value: f64,
}

impl ParameterEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl<S: Into<String>> From<(S, f64)> for ParameterEntry {
    fn from((name, value): (S, f64)) -> Self {
        Self::new(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        for (i, a) in CV_PARAMETER_NAMES.iter().enumerate() {
            for b in &CV_PARAMETER_NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_flag_positions() {
        assert_eq!(CV_PARAMETER_NAMES[FIRST_VERTEX_POS], "FirstVertex");
        assert_eq!(CV_PARAMETER_NAMES[SECOND_VERTEX_POS], "SecondVertex");
        assert_eq!(CV_PARAMETER_NAMES[FIXED_WE_POS], "FixedWEPotential");
    }

    #[test]
    fn test_entry_from_tuple() {
        let entry: ParameterEntry = ("Cycle", 2.0).into();
        assert_eq!(entry, ParameterEntry::new("Cycle", 2.0));
    }
}
