//! Persistence Collaborator Contract

use crate::parameter::ParameterEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Experiment modes known to the setup layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentType {
    #[serde(rename = "CV")]
    CyclicVoltammetry,
}

impl ExperimentType {
    /// Short mode identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentType::CyclicVoltammetry => "CV",
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives accepted experiments.
///
/// Called only after a parameter list passed every check. Implementations
/// own their failure handling; nothing is reported back to the validator.
pub trait DataHandling {
    /// Record which experiment mode was accepted
    fn save_experiment_type(&self, experiment: ExperimentType);

    /// Record the validated parameter list
    fn save_experiment_parameters(&self, parameters: &[ParameterEntry]);

    /// Prepare export infrastructure for the configured experiment
    fn setup_export_files(&self);
}

impl<T: DataHandling + ?Sized> DataHandling for &T {
    fn save_experiment_type(&self, experiment: ExperimentType) {
        (**self).save_experiment_type(experiment)
    }

    fn save_experiment_parameters(&self, parameters: &[ParameterEntry]) {
        (**self).save_experiment_parameters(parameters)
    }

    fn setup_export_files(&self) {
        (**self).setup_export_files()
    }
}

impl<T: DataHandling + ?Sized> DataHandling for Arc<T> {
    fn save_experiment_type(&self, experiment: ExperimentType) {
        (**self).save_experiment_type(experiment)
    }

    fn save_experiment_parameters(&self, parameters: &[ParameterEntry]) {
        (**self).save_experiment_parameters(parameters)
    }

    fn setup_export_files(&self) {
        (**self).setup_export_files()
    }
}
