//! Setup Error Types and Codes

use crate::parameter::{CV_NUM_PARAMETER, CV_PARAMETER_NAMES};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const AMOUNT_PARAMETER: u32 = 1;
const SCAN_RANGE_ERROR: u32 = 2;
const POTENTIAL_STEPS_MISMATCH: u32 = 3;
const TOO_MANY_PARAMETERS: u32 = 4;
const PARAM_NOT_FOUND: u32 = 100;
const PARAM_OUT_OF_BOUND: u32 = 200;

/// Largest offset a CV setup code can carry above the base
pub(crate) const MAX_ERROR_OFFSET: u32 = PARAM_OUT_OF_BOUND + CV_NUM_PARAMETER as u32 - 1;

/// Reasons a parameter list is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// List has the wrong number of entries
    #[error("Expected {expected} parameters, got {found}")]
    AmountOfParameters { expected: usize, found: usize },

    /// Vertex span meets or exceeds the voltage envelope
    #[error("Scan range {span} mV exceeds envelope of {envelope} mV")]
    ScanRangeExceeded { span: f64, envelope: f64 },

    /// Potential steps and pulse lengths differ in count (pulse modes only)
    #[error("Amount of potential steps doesn't match amount of pulse lengths")]
    PotentialStepsMismatch,

    /// Too many entries (list based modes only)
    #[error("Too many parameters in list")]
    TooManyParameters,

    /// Entry at `position` is misnamed or missing
    #[error("{expected} named wrong or not found as entry {position}")]
    ParameterNotFound {
        position: usize,
        expected: &'static str,
    },

    /// Entry at `position` is outside its bound
    #[error("{name} value {value} is out of range [{lower}, {upper}]")]
    ParameterOutOfBound {
        position: usize,
        name: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },
}

impl SetupError {
    /// Flat error code for this failure.
    ///
    /// Saturates at `u32::MAX` so a rejection never wraps to the success code.
    pub fn code(&self, base: u32) -> ErrorCode {
        let offset = match self {
            SetupError::AmountOfParameters { .. } => AMOUNT_PARAMETER,
            SetupError::ScanRangeExceeded { .. } => SCAN_RANGE_ERROR,
            SetupError::PotentialStepsMismatch => POTENTIAL_STEPS_MISMATCH,
            SetupError::TooManyParameters => TOO_MANY_PARAMETERS,
            SetupError::ParameterNotFound { position, .. } => PARAM_NOT_FOUND + *position as u32,
            SetupError::ParameterOutOfBound { position, .. } => {
                PARAM_OUT_OF_BOUND + *position as u32
            }
        };
        ErrorCode(base.saturating_add(offset))
    }
}

/// Integer status returned by a setup call, `0` on success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub const SUCCESS: ErrorCode = ErrorCode(0);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Human readable text for a CV setup code, `None` if the code is unknown
    pub fn describe(self, base: u32) -> Option<String> {
        if self.is_success() {
            return Some("No error occurred, setup successful".to_string());
        }
        let offset = self.0.checked_sub(base)?;
        let name = |index: u32| CV_PARAMETER_NAMES.get(index as usize).copied();

        match offset {
            AMOUNT_PARAMETER => Some("List contains wrong amount of parameters".to_string()),
            SCAN_RANGE_ERROR => Some("Scan range exceeded by given parameters".to_string()),
            POTENTIAL_STEPS_MISMATCH => Some(
                "Amount of potential steps doesn't match amount of pulse lengths".to_string(),
            ),
            TOO_MANY_PARAMETERS => Some("Too many parameters in list".to_string()),
            o if (PARAM_NOT_FOUND..PARAM_OUT_OF_BOUND).contains(&o) => {
                let index = o - PARAM_NOT_FOUND;
                name(index).map(|n| {
                    format!("{} named wrong or not found as entry {}", n, index + 1)
                })
            }
            o if o >= PARAM_OUT_OF_BOUND => {
                name(o - PARAM_OUT_OF_BOUND).map(|n| format!("{} out of bounds", n))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u32 = 11_000;

    #[test]
    fn test_code_layout() {
        let amount = SetupError::AmountOfParameters {
            expected: 11,
            found: 3,
        };
        assert_eq!(amount.code(BASE), ErrorCode(11_001));
        assert_eq!(
            SetupError::ScanRangeExceeded {
                span: 4000.0,
                envelope: 4000.0
            }
            .code(BASE),
            ErrorCode(11_002)
        );
        assert_eq!(SetupError::PotentialStepsMismatch.code(BASE), ErrorCode(11_003));
        assert_eq!(SetupError::TooManyParameters.code(BASE), ErrorCode(11_004));
        assert_eq!(
            SetupError::ParameterNotFound {
                position: 10,
                expected: "Sinc3_Oversampling"
            }
            .code(BASE),
            ErrorCode(11_110)
        );
        assert_eq!(
            SetupError::ParameterOutOfBound {
                position: 3,
                name: "Stepsize",
                value: 0.0,
                lower: 0.537,
                upper: 200.0
            }
            .code(BASE),
            ErrorCode(11_203)
        );
    }

    #[test]
    fn test_code_never_wraps_to_success() {
        let amount = SetupError::AmountOfParameters {
            expected: 11,
            found: 0,
        };
        assert_eq!(amount.code(u32::MAX), ErrorCode(u32::MAX));
        assert!(!amount.code(u32::MAX).is_success());

        let last = SetupError::ParameterOutOfBound {
            position: 10,
            name: "Sinc3_Oversampling",
            value: 4.0,
            lower: 0.0,
            upper: 2.0,
        };
        let base = u32::MAX - MAX_ERROR_OFFSET;
        assert_eq!(last.code(base), ErrorCode(u32::MAX));
    }

    #[test]
    fn test_describe() {
        assert!(ErrorCode::SUCCESS.describe(BASE).is_some());
        assert_eq!(
            ErrorCode(11_203).describe(BASE).as_deref(),
            Some("Stepsize out of bounds")
        );
        assert_eq!(
            ErrorCode(11_100).describe(BASE).as_deref(),
            Some("StartVoltage named wrong or not found as entry 1")
        );
        assert_eq!(ErrorCode(11_111).describe(BASE), None);
        assert_eq!(ErrorCode(11_211).describe(BASE), None);
        assert_eq!(ErrorCode(11_050).describe(BASE), None);
        assert_eq!(ErrorCode(42).describe(BASE), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode(11_002).to_string(), "11002");
        assert!(ErrorCode::SUCCESS.is_success());
        assert!(!ErrorCode(11_001).is_success());
    }
}
