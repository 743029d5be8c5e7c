pub mod panels;
pub mod render;
pub mod surface;

pub use panels::{build_panels, sweep_grid, Panel, PanelSpec};
pub use render::render_sweep;
pub use surface::SurfaceGrid;

use std::error::Error;

use tracing::{info, span, Level};

use crate::config::constant::{ANT_COUNTS, ITERATION_COUNTS};
use crate::config::Settings;
use crate::domain::ExperimentTable;
use crate::utils::{init_tracing_and_env, prepare_output_dir};

/// Renders the ants × iterations surface sweep of the plot CSV
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let settings = Settings::from_env()?;

    let table = {
        let span = span!(Level::INFO, "load");
        let _guard = span.enter();
        ExperimentTable::from_path(&settings.plot_csv)?
    };

    prepare_output_dir(&settings.graphs_dir)?;

    let panels = build_panels(&table, &ANT_COUNTS, &ITERATION_COUNTS)?;
    let path = settings.surface_path();
    {
        let span = span!(Level::INFO, "render");
        let _guard = span.enter();
        render_sweep(&path, &panels, ITERATION_COUNTS.len(), ANT_COUNTS.len())?;
    }

    info!("Surface sweep written to {}", path.display());
    Ok(())
}
