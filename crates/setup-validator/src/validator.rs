//! Setup Validator for Cyclic Voltammetry

use crate::bounds::{compute_bounds, scan_span, ReferenceBound};
use crate::error::{ErrorCode, SetupError};
use crate::handling::{DataHandling, ExperimentType};
use crate::limits::CvLimits;
use crate::parameter::{
    ParameterEntry, CV_NUM_PARAMETER, FIRST_VERTEX_POS, FIXED_WE_POS, SECOND_VERTEX_POS,
};
use tracing::{debug, info};

/// Setup step shared by all experiment modes
pub trait SetupBehavior {
    /// Mode this behavior configures
    fn experiment_type(&self) -> ExperimentType;

    /// Validate `parameters` and hand them on when accepted.
    ///
    /// Returns [`ErrorCode::SUCCESS`] or the code of the first failed check.
    fn setup(&self, parameters: &[ParameterEntry]) -> ErrorCode;
}

/// Setup behavior for cyclic voltammetry
pub struct SetupCv<H> {
    handler: H,
    limits: CvLimits,
}

impl<H: DataHandling> SetupCv<H> {
    /// Create a new setup behavior with default limits
    pub fn new(handler: H) -> Self {
        Self::with_limits(handler, CvLimits::default())
    }

    /// Create a new setup behavior with given limits
    pub fn with_limits(handler: H, limits: CvLimits) -> Self {
        Self { handler, limits }
    }

    pub fn limits(&self) -> &CvLimits {
        &self.limits
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run every check without touching the handler
    pub fn validate(&self, parameters: &[ParameterEntry]) -> Result<(), SetupError> {
        validate_parameters(parameters, &self.limits)
    }
}

impl<H: DataHandling> SetupBehavior for SetupCv<H> {
    fn experiment_type(&self) -> ExperimentType {
        ExperimentType::CyclicVoltammetry
    }

    fn setup(&self, parameters: &[ParameterEntry]) -> ErrorCode {
        if let Err(err) = self.validate(parameters) {
            let code = err.code(self.limits.error_base);
            debug!(%code, "CV setup rejected: {}", err);
            return code;
        }

        info!("CV setup accepted with {} parameters", parameters.len());
        self.handler.save_experiment_type(self.experiment_type());
        self.handler.save_experiment_parameters(parameters);
        self.handler.setup_export_files();

        ErrorCode::SUCCESS
    }
}

/// Arity, then name and bound per position, then the scan range.
pub(crate) fn validate_parameters(
    parameters: &[ParameterEntry],
    limits: &CvLimits,
) -> Result<(), SetupError> {
    if parameters.len() != CV_NUM_PARAMETER {
        return Err(SetupError::AmountOfParameters {
            expected: CV_NUM_PARAMETER,
            found: parameters.len(),
        });
    }

    let first_vertex = parameters[FIRST_VERTEX_POS].value;
    let second_vertex = parameters[SECOND_VERTEX_POS].value;
    let fixed_we = parameters[FIXED_WE_POS].value == 1.0;
    let table = compute_bounds(first_vertex, second_vertex, fixed_we, limits);
    let nan_vertex = nan_vertex_position(first_vertex, second_vertex);

    for (position, (entry, bound)) in parameters.iter().zip(table.iter()).enumerate() {
        if entry.name != bound.name {
            return Err(SetupError::ParameterNotFound {
                position,
                expected: bound.name,
            });
        }
        check_bound(position, entry.value, bound, nan_vertex)?;
    }

    check_scan_range(first_vertex, second_vertex, fixed_we, limits)
}

/// Position of the first vertex that is NaN, if any
pub(crate) fn nan_vertex_position(first_vertex: f64, second_vertex: f64) -> Option<usize> {
    if first_vertex.is_nan() {
        Some(FIRST_VERTEX_POS)
    } else if second_vertex.is_nan() {
        Some(SECOND_VERTEX_POS)
    } else {
        None
    }
}

/// Range check for one position.
///
/// A NaN vertex leaves every vertex-derived bound undefined, so those
/// positions only fail at the NaN vertex itself.
pub(crate) fn check_bound(
    position: usize,
    value: f64,
    bound: &ReferenceBound,
    nan_vertex: Option<usize>,
) -> Result<(), SetupError> {
    let in_bound = match nan_vertex {
        Some(nan_position) if position <= SECOND_VERTEX_POS => position != nan_position,
        _ => bound.contains(value),
    };
    if in_bound {
        Ok(())
    } else {
        Err(SetupError::ParameterOutOfBound {
            position,
            name: bound.name,
            value,
            lower: bound.lower,
            upper: bound.upper,
        })
    }
}

/// The span must stay strictly below the envelope.
pub(crate) fn check_scan_range(
    first_vertex: f64,
    second_vertex: f64,
    fixed_we: bool,
    limits: &CvLimits,
) -> Result<(), SetupError> {
    let span = scan_span(first_vertex, second_vertex);
    let envelope = limits.envelope(fixed_we);
    if span >= envelope {
        Err(SetupError::ScanRangeExceeded { span, envelope })
    } else {
        Ok(())
    }
}
