//! Setup CLI support: logging, limits loading and parameter files.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use experiment_store::ExperimentStore;
use serde::Deserialize;
use setup_validator::{CvLimits, CvParameters, ErrorCode, ParameterEntry, SetupBehavior, SetupCv};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Prefix of environment overrides, e.g. `FREISTAT_ERROR_BASE`
pub const ENV_PREFIX: &str = "FREISTAT";

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    // Already installed when embedded in a larger process
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Load limits from defaults, an optional file and the environment
pub fn load_limits(path: Option<&Path>) -> Result<CvLimits> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    limits_from(builder)
}

fn limits_from(builder: ConfigBuilder<DefaultState>) -> Result<CvLimits> {
    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read limits configuration")?;
    let limits: CvLimits = settings
        .try_deserialize()
        .context("Invalid limits configuration")?;
    limits.validate().context("Invalid limits configuration")?;
    Ok(limits)
}

/// Parameter file contents: positional pairs or a named record
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParameterFile {
    List(Vec<(String, f64)>),
    Record(CvParameters),
}

/// Parse a JSON parameter file into the positional list form
pub fn parse_parameters(json: &str) -> Result<Vec<ParameterEntry>> {
    let file: ParameterFile =
        serde_json::from_str(json).context("Parameter file is neither a pair list nor a CV record")?;
    Ok(match file {
        ParameterFile::List(pairs) => pairs.into_iter().map(ParameterEntry::from).collect(),
        ParameterFile::Record(record) => record.to_entries(),
    })
}

pub fn load_parameters(path: &Path) -> Result<Vec<ParameterEntry>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_parameters(&json)
}

/// Outcome of one setup run
#[derive(Debug)]
pub struct Outcome {
    pub code: ErrorCode,
    pub description: String,
    /// Accepted experiment as JSON, present on success
    pub accepted: Option<String>,
}

/// Validate `parameters` against `limits` and collect the result
pub fn run_setup(parameters: &[ParameterEntry], limits: CvLimits) -> Result<Outcome> {
    let base = limits.error_base;
    let store = ExperimentStore::new();
    let setup = SetupCv::with_limits(&store, limits);

    let code = setup.setup(parameters);
    info!("{} setup finished with code {}", setup.experiment_type(), code);

    let accepted = if code.is_success() {
        Some(store.snapshot()?.to_json()?)
    } else {
        None
    };
    Ok(Outcome {
        code,
        description: code
            .describe(base)
            .unwrap_or_else(|| "Unknown error code".to_string()),
        accepted,
    })
}
