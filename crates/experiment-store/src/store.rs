//! In-Memory Experiment Store

use crate::StoreError;
use serde::{Deserialize, Serialize};
use setup_validator::{DataHandling, ExperimentType, ParameterEntry};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

/// Column headers of the CV export file
const CV_EXPORT_COLUMNS: [&str; 4] = ["Time [ms]", "Potential [mV]", "Current [uA]", "Cycle"];

/// Layout of the export prepared for an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLayout {
    pub experiment: ExperimentType,
    pub columns: Vec<String>,
}

impl ExportLayout {
    /// Layout for the given experiment mode
    pub fn for_experiment(experiment: ExperimentType) -> Self {
        let columns = match experiment {
            ExperimentType::CyclicVoltammetry => CV_EXPORT_COLUMNS,
        };
        Self {
            experiment,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// One collaborator call as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    ExperimentType(ExperimentType),
    Parameters(usize),
    ExportFiles,
}

/// Accepted experiment as handed to the measurement pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedExperiment {
    pub experiment: ExperimentType,
    pub parameters: Vec<ParameterEntry>,
    pub export: Option<ExportLayout>,
}

impl AcceptedExperiment {
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::SerializationError(e.to_string()))
    }
}

#[derive(Debug, Default)]
struct StoreState {
    experiment: Option<ExperimentType>,
    parameters: Vec<ParameterEntry>,
    export: Option<ExportLayout>,
    events: VecDeque<StoreEvent>,
}

/// Store for the most recently accepted experiment
pub struct ExperimentStore {
    state: Mutex<StoreState>,
    /// Max journal entries kept
    max_events: usize,
}

impl ExperimentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::with_journal_limit(1_000)
    }

    /// Create a new store keeping at most `max_events` journal entries
    pub fn with_journal_limit(max_events: usize) -> Self {
        debug!("Creating experiment store (journal limit {})", max_events);
        Self {
            state: Mutex::new(StoreState::default()),
            max_events,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    /// Apply `f` to the state and journal `event`; errors are logged only
    fn record(&self, event: StoreEvent, f: impl FnOnce(&mut StoreState)) {
        match self.lock() {
            Ok(mut state) => {
                f(&mut *state);
                while state.events.len() >= self.max_events.max(1) {
                    state.events.pop_front();
                }
                state.events.push_back(event);
            }
            Err(e) => error!("Dropping {:?}: {}", event, e),
        }
    }

    /// Accepted experiment mode
    pub fn experiment_type(&self) -> Result<ExperimentType, StoreError> {
        self.lock()?.experiment.ok_or(StoreError::NotConfigured)
    }

    /// Accepted parameter list, empty before the first accepted setup
    pub fn parameters(&self) -> Result<Vec<ParameterEntry>, StoreError> {
        Ok(self.lock()?.parameters.clone())
    }

    pub fn export_layout(&self) -> Result<Option<ExportLayout>, StoreError> {
        Ok(self.lock()?.export.clone())
    }

    /// Journal of collaborator calls, oldest first
    pub fn events(&self) -> Vec<StoreEvent> {
        self.lock()
            .map(|s| s.events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Current accepted experiment, if any
    pub fn snapshot(&self) -> Result<AcceptedExperiment, StoreError> {
        let state = self.lock()?;
        let experiment = state.experiment.ok_or(StoreError::NotConfigured)?;
        Ok(AcceptedExperiment {
            experiment,
            parameters: state.parameters.clone(),
            export: state.export.clone(),
        })
    }

    /// Clear all data
    pub fn clear(&self) {
        match self.lock() {
            Ok(mut state) => *state = StoreState::default(),
            Err(e) => error!("Dropping clear: {}", e),
        }
    }
}

impl Default for ExperimentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataHandling for ExperimentStore {
    fn save_experiment_type(&self, experiment: ExperimentType) {
        info!("Saving experiment type {}", experiment);
        self.record(StoreEvent::ExperimentType(experiment), |state| {
            if state.experiment != Some(experiment) {
                state.export = None;
            }
            state.experiment = Some(experiment);
        });
    }

    fn save_experiment_parameters(&self, parameters: &[ParameterEntry]) {
        debug!("Saving {} experiment parameters", parameters.len());
        self.record(StoreEvent::Parameters(parameters.len()), |state| {
            state.parameters = parameters.to_vec();
        });
    }

    fn setup_export_files(&self) {
        self.record(StoreEvent::ExportFiles, |state| match state.experiment {
            Some(experiment) => {
                state.export = Some(ExportLayout::for_experiment(experiment));
            }
            None => warn!("Export requested before an experiment type was saved"),
        });
    }
}
