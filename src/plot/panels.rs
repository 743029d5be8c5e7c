use tracing::{debug, warn};

use crate::domain::{Column, ExperimentTable};
use crate::error::Result;
use crate::plot::surface::SurfaceGrid;

/// Metrics drawn on every panel, in legend order
pub const SURFACE_METRICS: [Column; 3] = [
    Column::ShortestRoute,
    Column::LongestRoute,
    Column::AverageRoute,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub ants: u32,
    pub iterations: u32,
}

impl PanelSpec {
    pub fn caption(&self) -> String {
        format!("{} ants, {} iterations", self.ants, self.iterations)
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub spec: PanelSpec,
    /// Runs matching the panel's ants and iterations
    pub run_count: usize,
    pub surfaces: Vec<SurfaceGrid>,
}

impl Panel {
    pub fn has_runs(&self) -> bool {
        self.run_count > 0
    }

    /// A surface needs at least two distinct values on both axes
    pub fn has_surface(&self) -> bool {
        self.surfaces.iter().any(|s| !s.quads().is_empty())
    }
}

/// Row-major sweep: one row per iteration count, one column per ant count
pub fn sweep_grid(ant_counts: &[u32], iteration_counts: &[u32]) -> Vec<PanelSpec> {
    iteration_counts
        .iter()
        .flat_map(|&iterations| {
            ant_counts
                .iter()
                .map(move |&ants| PanelSpec { ants, iterations })
        })
        .collect()
}

pub fn build_panels(
    table: &ExperimentTable,
    ant_counts: &[u32],
    iteration_counts: &[u32],
) -> Result<Vec<Panel>> {
    let mut panels = Vec::new();
    for spec in sweep_grid(ant_counts, iteration_counts) {
        let cell = table.with_ants_and_iterations(spec.ants, spec.iterations);
        if cell.is_empty() {
            warn!("No runs for {}", spec.caption());
        } else {
            debug!("{}: {} runs", spec.caption(), cell.len());
        }

        let surfaces = SURFACE_METRICS
            .iter()
            .map(|&metric| SurfaceGrid::from_runs(cell.runs(), metric))
            .collect::<Result<Vec<_>>>()?;
        panels.push(Panel {
            spec,
            run_count: cell.len(),
            surfaces,
        });
    }
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constant::{ANT_COUNTS, ITERATION_COUNTS};
    use crate::fixtures::data_generator::generate_experiment_table;

    #[test]
    fn sweep_is_row_major_by_iterations() {
        let specs = sweep_grid(&ANT_COUNTS, &ITERATION_COUNTS);
        assert_eq!(specs.len(), 15);
        assert_eq!(specs[0], PanelSpec { ants: 5, iterations: 10 });
        assert_eq!(specs[2], PanelSpec { ants: 20, iterations: 10 });
        assert_eq!(specs[3], PanelSpec { ants: 5, iterations: 30 });
        assert_eq!(specs[14], PanelSpec { ants: 20, iterations: 300 });
    }

    #[test]
    fn panels_without_runs_are_kept_empty() {
        let table = generate_experiment_table(3, &["A", "B"], &[5, 10], &[10]);
        let panels = build_panels(&table, &[5, 20], &[10]).unwrap();

        assert_eq!(panels.len(), 2);
        assert!(panels[0].has_runs());
        assert!(panels[0].has_surface());
        assert_eq!(panels[0].surfaces.len(), 3);
        assert_eq!(panels[0].surfaces[2].metric(), Column::AverageRoute);
        assert_eq!(panels[0].surfaces[0].xs(), &[1.0, 2.0, 3.0]);
        assert!(!panels[1].has_runs());
        assert!(!panels[1].has_surface());
    }

    #[test]
    fn single_weight_panels_have_runs_but_no_surface() {
        let runs: Vec<_> = generate_experiment_table(5, &["A"], &[5], &[10])
            .runs()
            .iter()
            .filter(|run| run.pher_weight == 1.0)
            .cloned()
            .collect();
        let table = ExperimentTable::new(runs);
        let panel = &build_panels(&table, &[5], &[10]).unwrap()[0];

        assert_eq!(panel.run_count, table.len());
        assert!(panel.has_runs());
        assert!(!panel.has_surface());
        assert_eq!(panel.surfaces[0].xs(), &[1.0]);
    }
}
