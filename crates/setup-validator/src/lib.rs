//! Experiment Setup Validation
//!
//! Checks the parameter list of a cyclic voltammetry run against positional
//! naming, per-field ranges and the scan-range envelope before the list is
//! handed to the measurement pipeline.

mod bounds;
mod error;
mod handling;
mod limits;
mod parameter;
mod record;
mod validator;

pub use bounds::{compute_bounds, scan_span, ReferenceBound, ReferenceTable};
pub use error::{ErrorCode, SetupError};
pub use handling::{DataHandling, ExperimentType};
pub use limits::{CvLimits, LimitsError};
pub use parameter::{names, ParameterEntry, CV_NUM_PARAMETER, CV_PARAMETER_NAMES};
pub use record::CvParameters;
pub use validator::{SetupBehavior, SetupCv};
