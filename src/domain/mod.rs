pub mod table;
pub mod types;

pub use table::ExperimentTable;
pub use types::{Column, ExperimentRun, RunParameters, Value};
