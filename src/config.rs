use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::{debug, info};

use crate::domain::RunParameters;
use crate::error::{AnalysisError, Result};

pub mod constant {
    use crate::domain::RunParameters;

    pub(crate) const STATISTICS_CSV: &str = "./statistics.csv";
    pub(crate) const PLOT_CSV: &str = "./statistics_smaller.csv";
    pub(crate) const GRAPHS_DIR: &str = "./graphs/";
    pub(crate) const RUNS_GLOB: &str = "./output_*/";
    pub(crate) const SURFACE_FILE: &str = "surfaces.svg";
    pub(crate) const RUN_DATA_FILE: &str = "run_data.csv";
    pub(crate) const STATISTICS_FILE: &str = "statistics.txt";

    // Solver defaults
    pub(crate) const GRAPHS_GLOB: &str = "./instances/*.txt";
    pub(crate) const OUTPUT_ROOT: &str = ".";
    pub const DEFAULT_PARAMETERS: RunParameters = RunParameters {
        ants: 10,
        iterations: 1000,
        evap_coeff: 0.5,
        rand_chance: 0.3,
        pher_weight: 1.0,
        heur_weight: 1.0,
    };
    pub const TRY_COUNT: u32 = 100;
    pub const SEED: u64 = 12345;

    pub const GROUP_KEY: &str = "graph_name";
    pub const DROP_COLUMNS: [&str; 2] = ["graph_name", "iterations"];
    pub const SORT_KEY: &str = "average_route";

    // Sweep axes of the surface grid: one row per iteration count, one column per ant count
    pub const ANT_COUNTS: [u32; 3] = [5, 10, 20];
    pub const ITERATION_COUNTS: [u32; 5] = [10, 30, 50, 100, 300];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(AnalysisError::UnknownReportFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub statistics_csv: PathBuf,
    pub plot_csv: PathBuf,
    pub graphs_dir: PathBuf,
    pub runs_glob: String,
    pub report_format: ReportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            statistics_csv: PathBuf::from(constant::STATISTICS_CSV),
            plot_csv: PathBuf::from(constant::PLOT_CSV),
            graphs_dir: PathBuf::from(constant::GRAPHS_DIR),
            runs_glob: constant::RUNS_GLOB.to_string(),
            report_format: ReportFormat::Text,
        }
    }
}

impl Settings {
    /// Defaults overridden by `ACO_*` variables from the environment or a `.env` file
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = lookup("ACO_STATISTICS_CSV") {
            settings.statistics_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup("ACO_PLOT_CSV") {
            settings.plot_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup("ACO_GRAPHS_DIR") {
            settings.graphs_dir = PathBuf::from(path);
        }
        if let Some(pattern) = lookup("ACO_RUNS_GLOB") {
            settings.runs_glob = pattern;
        }
        if let Some(format) = lookup("ACO_REPORT_FORMAT") {
            settings.report_format = format.parse()?;
            info!("Report format set to {:?} from environment", settings.report_format);
        }

        debug!("Settings: {:?}", settings);
        Ok(settings)
    }

    pub fn surface_path(&self) -> PathBuf {
        self.graphs_dir.join(constant::SURFACE_FILE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Repeated runs per graph, summarized into an output directory
    Batch,
    /// One run per graph, best tour printed as a DOT graph
    Single,
}

impl FromStr for SolveMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batch" => Ok(SolveMode::Batch),
            "single" => Ok(SolveMode::Single),
            other => Err(AnalysisError::InvalidSetting {
                key: "ACO_SOLVE_MODE".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolverSettings {
    pub graphs_glob: String,
    pub output_root: PathBuf,
    pub params: RunParameters,
    pub mode: SolveMode,
    pub try_count: u32,
    pub seed: u64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            graphs_glob: constant::GRAPHS_GLOB.to_string(),
            output_root: PathBuf::from(constant::OUTPUT_ROOT),
            params: constant::DEFAULT_PARAMETERS,
            mode: SolveMode::Batch,
            try_count: constant::TRY_COUNT,
            seed: constant::SEED,
        }
    }
}

impl SolverSettings {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = SolverSettings::default();

        if let Some(pattern) = lookup("ACO_GRAPHS_GLOB") {
            settings.graphs_glob = pattern;
        }
        if let Some(path) = lookup("ACO_OUTPUT_ROOT") {
            settings.output_root = PathBuf::from(path);
        }
        if let Some(mode) = lookup("ACO_SOLVE_MODE") {
            settings.mode = mode.parse()?;
        }

        let params = &mut settings.params;
        override_with(&lookup, "ACO_ANTS", &mut params.ants)?;
        override_with(&lookup, "ACO_ITERATIONS", &mut params.iterations)?;
        override_with(&lookup, "ACO_EVAP_COEFF", &mut params.evap_coeff)?;
        override_with(&lookup, "ACO_RAND_CHANCE", &mut params.rand_chance)?;
        override_with(&lookup, "ACO_PHER_WEIGHT", &mut params.pher_weight)?;
        override_with(&lookup, "ACO_HEUR_WEIGHT", &mut params.heur_weight)?;
        override_with(&lookup, "ACO_TRY_COUNT", &mut settings.try_count)?;
        override_with(&lookup, "ACO_SEED", &mut settings.seed)?;

        if settings.try_count == 0 {
            return Err(AnalysisError::InvalidSetting {
                key: "ACO_TRY_COUNT".to_string(),
                value: "0".to_string(),
            });
        }

        debug!("Solver settings: {:?}", settings);
        Ok(settings)
    }
}

fn override_with<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| AnalysisError::InvalidSetting {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}
