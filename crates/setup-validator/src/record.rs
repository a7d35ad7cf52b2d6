//! Typed CV Parameter Record
//!
//! Named-field form of the parameter list. Naming is settled when the
//! record is built (from a list or through serde), so only range and
//! scan-range checks remain for [`CvParameters::validate`].

use crate::bounds::compute_bounds;
use crate::error::SetupError;
use crate::limits::CvLimits;
use crate::parameter::{ParameterEntry, CV_NUM_PARAMETER, CV_PARAMETER_NAMES};
use crate::validator::{check_bound, check_scan_range, nan_vertex_position};
use serde::{Deserialize, Serialize};

/// Cyclic voltammetry parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvParameters {
    /// Potential the ramp starts at (mV)
    #[serde(rename = "StartVoltage")]
    pub start_voltage: f64,
    /// First vertex (mV)
    #[serde(rename = "FirstVertex")]
    pub first_vertex: f64,
    /// Second vertex (mV)
    #[serde(rename = "SecondVertex")]
    pub second_vertex: f64,
    /// Potential step (mV)
    #[serde(rename = "Stepsize")]
    pub step_size: f64,
    /// Scan rate (mV/s)
    #[serde(rename = "Scanrate")]
    pub scan_rate: f64,
    #[serde(rename = "Cycle")]
    pub cycle: f64,
    /// `1` pins the WE potential to the middle of the dynamic range
    #[serde(rename = "FixedWEPotential")]
    pub fixed_we_potential: f64,
    /// LPTIA feedback resistor (ohm)
    #[serde(rename = "LPTIA_Resistor")]
    pub lptia_resistor: f64,
    #[serde(rename = "MainsFilter")]
    pub mains_filter: f64,
    #[serde(rename = "Sinc2_Oversampling")]
    pub sinc2_oversampling: f64,
    #[serde(rename = "Sinc3_Oversampling")]
    pub sinc3_oversampling: f64,
}

impl CvParameters {
    fn values(&self) -> [f64; CV_NUM_PARAMETER] {
        [
            self.start_voltage,
            self.first_vertex,
            self.second_vertex,
            self.step_size,
            self.scan_rate,
            self.cycle,
            self.fixed_we_potential,
            self.lptia_resistor,
            self.mains_filter,
            self.sinc2_oversampling,
            self.sinc3_oversampling,
        ]
    }

    pub fn fixed_we(&self) -> bool {
        self.fixed_we_potential == 1.0
    }

    /// Range check per field in list order, then the scan range
    pub fn validate(&self, limits: &CvLimits) -> Result<(), SetupError> {
        let table = compute_bounds(self.first_vertex, self.second_vertex, self.fixed_we(), limits);
        let nan_vertex = nan_vertex_position(self.first_vertex, self.second_vertex);
        for (position, (value, bound)) in self.values().into_iter().zip(table).enumerate() {
            check_bound(position, value, &bound, nan_vertex)?;
        }
        check_scan_range(self.first_vertex, self.second_vertex, self.fixed_we(), limits)
    }

    /// Positional list form, as handed to the data handler
    pub fn to_entries(&self) -> Vec<ParameterEntry> {
        CV_PARAMETER_NAMES
            .iter()
            .zip(self.values())
            .map(|(name, value)| ParameterEntry::new(*name, value))
            .collect()
    }
}

impl TryFrom<&[ParameterEntry]> for CvParameters {
    type Error = SetupError;

    /// Checks arity and positional names only
    fn try_from(entries: &[ParameterEntry]) -> Result<Self, Self::Error> {
        if entries.len() != CV_NUM_PARAMETER {
            return Err(SetupError::AmountOfParameters {
                expected: CV_NUM_PARAMETER,
                found: entries.len(),
            });
        }
        let mut values = [0.0; CV_NUM_PARAMETER];
        for (position, (entry, expected)) in entries.iter().zip(CV_PARAMETER_NAMES).enumerate() {
            if entry.name != expected {
                return Err(SetupError::ParameterNotFound { position, expected });
            }
            values[position] = entry.value;
        }
        let [start_voltage, first_vertex, second_vertex, step_size, scan_rate, cycle, fixed_we_potential, lptia_resistor, mains_filter, sinc2_oversampling, sinc3_oversampling] =
            values;

        Ok(Self {
            start_voltage,
            first_vertex,
            second_vertex,
            step_size,
            scan_rate,
            cycle,
            fixed_we_potential,
            lptia_resistor,
            mains_filter,
            sinc2_oversampling,
            sinc3_oversampling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CvParameters {
        CvParameters {
            start_voltage: 0.0,
            first_vertex: 500.0,
            second_vertex: -500.0,
            step_size: 2.0,
            scan_rate: 50.0,
            cycle: 2.0,
            fixed_we_potential: 0.0,
            lptia_resistor: 10_000.0,
            mains_filter: 0.0,
            sinc2_oversampling: 667.0,
            sinc3_oversampling: 0.0,
        }
    }

    #[test]
    fn test_entries_parse_back() {
        let params = sample();
        let entries = params.to_entries();
        assert_eq!(entries[9], ParameterEntry::new("Sinc2_Oversampling", 667.0));
        assert_eq!(CvParameters::try_from(entries.as_slice()), Ok(params));
    }

    #[test]
    fn test_parse_reports_first_misnamed_entry() {
        let mut entries = sample().to_entries();
        entries[7].name = "LPTIA".to_string();
        entries[8].name = "Mains".to_string();
        assert_eq!(
            CvParameters::try_from(entries.as_slice()),
            Err(SetupError::ParameterNotFound {
                position: 7,
                expected: "LPTIA_Resistor"
            })
        );
    }

    #[test]
    fn test_parse_wrong_length() {
        let entries = sample().to_entries();
        assert!(matches!(
            CvParameters::try_from(&entries[..5]),
            Err(SetupError::AmountOfParameters { found: 5, .. })
        ));
    }

    #[test]
    fn test_validate() {
        let limits = CvLimits::default();
        assert!(sample().validate(&limits).is_ok());

        let too_slow = CvParameters {
            scan_rate: 5.0,
            ..sample()
        };
        assert!(matches!(
            too_slow.validate(&limits),
            Err(SetupError::ParameterOutOfBound { position: 4, .. })
        ));

        let wide = CvParameters {
            first_vertex: 1050.0,
            second_vertex: -1050.0,
            fixed_we_potential: 1.0,
            ..sample()
        };
        assert!(matches!(
            wide.validate(&limits),
            Err(SetupError::ScanRangeExceeded { .. })
        ));
    }

    #[test]
    fn test_nan_vertex_reported_at_its_position() {
        let params = CvParameters {
            second_vertex: f64::NAN,
            ..sample()
        };
        assert!(matches!(
            params.validate(&CvLimits::default()),
            Err(SetupError::ParameterOutOfBound { position: 2, .. })
        ));
    }

    #[test]
    fn test_deserialize_by_identifier() {
        let json = r#"{
            "StartVoltage": 0, "FirstVertex": 500, "SecondVertex": -500,
            "Stepsize": 2, "Scanrate": 50, "Cycle": 2, "FixedWEPotential": 0,
            "LPTIA_Resistor": 10000, "MainsFilter": 0,
            "Sinc2_Oversampling": 667, "Sinc3_Oversampling": 0
        }"#;
        let params: CvParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params, sample());

        let misnamed = json.replace("Scanrate", "ScanRate");
        assert!(serde_json::from_str::<CvParameters>(&misnamed).is_err());
    }
}
