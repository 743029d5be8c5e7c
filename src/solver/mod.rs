pub mod batch;
pub mod colony;
pub mod graph;
pub mod output;

pub use batch::{run_batch, BatchRunData};
pub use colony::Colony;
pub use graph::{distance_matrix, load_graph, parse_graph, GraphNode};
pub use output::{output_dir_name, RunOutput};

use std::error::Error;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{info, span, warn, Level};

use crate::config::{SolveMode, SolverSettings};
use crate::utils::init_tracing_and_env;

fn graph_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Solves every graph matching `ACO_GRAPHS_GLOB` with one parameter combination.
///
/// Batch mode writes `output_<params>/` for the collector and echoes each
/// summary line; single mode prints the best tour of each graph as DOT.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let settings = SolverSettings::from_env()?;

    let graphs = glob(&settings.graphs_glob)?.collect::<Result<Vec<PathBuf>, _>>()?;
    if graphs.is_empty() {
        warn!("No graph files match '{}'", settings.graphs_glob);
    }
    info!(
        "Solving {} graphs with {:?} ({:?} mode)",
        graphs.len(),
        settings.params,
        settings.mode
    );

    match settings.mode {
        SolveMode::Batch => {
            let dir = settings.output_root.join(output_dir_name(&settings.params));
            let mut output = RunOutput::create(&dir, &settings.params)?;

            for path in &graphs {
                let name = graph_name(path);
                let span = span!(Level::INFO, "batch", graph = %name, tries = settings.try_count);
                let _guard = span.enter();

                let colony = Colony::new(load_graph(path)?, settings.params, settings.seed)?;
                let stats = run_batch(&colony, settings.try_count, settings.seed);
                println!("{}", output.append(&name, &stats)?);
            }
            info!("Wrote {} summaries to {}", graphs.len(), output.dir().display());
        }
        SolveMode::Single => {
            for path in &graphs {
                let name = graph_name(path);
                let span = span!(Level::INFO, "solve", graph = %name);
                let _guard = span.enter();

                let mut colony = Colony::new(load_graph(path)?, settings.params, settings.seed)?;
                let length = colony.do_all_iterations();
                info!("Found solution with length {}", length);
                println!("{}", colony.solution_to_graphviz());
            }
        }
    }
    Ok(())
}
