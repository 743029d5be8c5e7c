pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod plot;
pub mod report;
pub mod solver;
pub mod utils;

pub use domain::{Column, ExperimentRun, ExperimentTable, RunParameters, Value};
pub use error::{AnalysisError, Result};
pub use report::report;
