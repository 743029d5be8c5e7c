pub mod export;
pub mod grouped;
pub mod render;

pub use export::GroupExporter;
pub use grouped::{report, GroupView, GroupedReport, ReportGroup, ReportRow};
pub use render::{write_json, write_text};

use std::error::Error;
use std::io::{self, IsTerminal, Write};

use tracing::{info, span, Level};

use crate::config::constant::{DROP_COLUMNS, GROUP_KEY, SORT_KEY};
use crate::config::{ReportFormat, Settings};
use crate::domain::ExperimentTable;
use crate::utils::{init_tracing_and_env, prepare_output_dir};

/// Prints each graph's runs ordered by average route and exports them as CSV
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let settings = Settings::from_env()?;

    let table = {
        let span = span!(Level::INFO, "load");
        let _guard = span.enter();
        ExperimentTable::from_path(&settings.statistics_csv)?
    };

    prepare_output_dir(&settings.graphs_dir)?;

    let span = span!(Level::INFO, "report", group_key = GROUP_KEY, sort_key = SORT_KEY);
    let _guard = span.enter();

    let stdout = io::stdout();
    let colored = stdout.is_terminal();
    let mut out = stdout.lock();

    let groups = match settings.report_format {
        ReportFormat::Text => {
            write_text(&mut out, report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY)?, colored)?
        }
        ReportFormat::Json => write_json(&mut out, report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY)?)?,
    };
    out.flush()?;

    let mut exporter = GroupExporter::new(&settings.graphs_dir);
    for group in report(&table, GROUP_KEY, &DROP_COLUMNS, SORT_KEY)? {
        exporter.export(&group)?;
    }

    info!(
        "Reported {} groups from {} runs, exported to {}",
        groups,
        table.len(),
        settings.graphs_dir.display()
    );
    Ok(())
}
