//! Mode Limits for Cyclic Voltammetry

use crate::error::MAX_ERROR_OFFSET;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inconsistent limits
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitsError {
    /// Base leaves no room for the largest error offset
    #[error("Error base {base} exceeds maximum of {max}")]
    ErrorBaseTooLarge { base: u32, max: u32 },

    /// Range with lower above upper, or NaN
    #[error("{field} range [{lower}, {upper}] is empty")]
    EmptyRange {
        field: &'static str,
        lower: f64,
        upper: f64,
    },

    /// Envelope that is zero, negative or NaN
    #[error("{field} must be positive, got {value}")]
    NonPositiveEnvelope { field: &'static str, value: f64 },
}

/// Instrument limits applied to a CV parameter list.
///
/// Potentials are in mV, scan rates in mV/s and resistor sizes in ohm.
/// Every range is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvLimits {
    /// Half of the addressable span when the WE potential floats (mV)
    pub voltage_range: f64,
    /// Addressable span when the WE potential is fixed (mV)
    pub voltage_range_fixed_we: f64,
    /// Step size range (mV)
    pub step_size: (f64, f64),
    /// Scan rate range (mV/s)
    pub scan_rate: (f64, f64),
    /// Cycle count range
    pub cycle: (f64, f64),
    /// Fixed working electrode potential flag
    pub fixed_we_potential: (f64, f64),
    /// LPTIA feedback resistor, open up to 512k (ohm)
    pub lptia_resistor: (f64, f64),
    /// Mains filter flag
    pub mains_filter: (f64, f64),
    /// Sinc2 oversampling rate, 0 disables the filter
    pub sinc2_oversampling: (f64, f64),
    /// Sinc3 oversampling rate, 0 disables the filter
    pub sinc3_oversampling: (f64, f64),
    /// Offset added to every setup error code
    pub error_base: u32,
}

impl Default for CvLimits {
    fn default() -> Self {
        Self {
            voltage_range: 2000.0,
            voltage_range_fixed_we: 2100.0,
            step_size: (0.537, 200.0),
            scan_rate: (10.0, 1250.0),
            cycle: (1.0, 255.0),
            fixed_we_potential: (0.0, 1.0),
            lptia_resistor: (0.0, 512_000.0),
            mains_filter: (0.0, 1.0),
            sinc2_oversampling: (0.0, 1333.0),
            sinc3_oversampling: (0.0, 2.0),
            error_base: 11_000,
        }
    }
}

impl CvLimits {
    /// Largest `error_base` whose codes all fit in a `u32`
    pub const MAX_ERROR_BASE: u32 = u32::MAX - MAX_ERROR_OFFSET;

    /// Check the limits are usable before validating against them
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.error_base > Self::MAX_ERROR_BASE {
            return Err(LimitsError::ErrorBaseTooLarge {
                base: self.error_base,
                max: Self::MAX_ERROR_BASE,
            });
        }
        for (field, value) in [
            ("voltage_range", self.voltage_range),
            ("voltage_range_fixed_we", self.voltage_range_fixed_we),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(LimitsError::NonPositiveEnvelope { field, value });
            }
        }
        let ranges = [
            ("step_size", self.step_size),
            ("scan_rate", self.scan_rate),
            ("cycle", self.cycle),
            ("fixed_we_potential", self.fixed_we_potential),
            ("lptia_resistor", self.lptia_resistor),
            ("mains_filter", self.mains_filter),
            ("sinc2_oversampling", self.sinc2_oversampling),
            ("sinc3_oversampling", self.sinc3_oversampling),
        ];
        for (field, (lower, upper)) in ranges {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(LimitsError::EmptyRange {
                    field,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }

    /// Envelope the vertex span has to stay below
    pub fn envelope(&self, fixed_we: bool) -> f64 {
        if fixed_we {
            self.voltage_range_fixed_we
        } else {
            self.voltage_range * 2.0
        }
    }
}
