use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::plot::panels::Panel;

const PANEL_SIZE: (u32, u32) = (480, 420);
const SURFACE_COLORS: [RGBColor; 3] = [RED, BLUE, GREEN];

fn plot_error<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Plot(err.to_string())
}

/// Renders `panels` row-major into a `rows` × `cols` SVG document
pub fn render_sweep(path: &Path, panels: &[Panel], rows: usize, cols: usize) -> Result<()> {
    let size = (PANEL_SIZE.0 * cols as u32, PANEL_SIZE.1 * rows as u32);
    info!("Rendering {} panels ({}x{}) to {}", panels.len(), rows, cols, path.display());

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let areas = root.split_evenly((rows, cols));
    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, panel)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<()> {
    let caption = panel.spec.caption();
    if !panel.has_surface() {
        debug!("{}: {} runs, nothing to draw", caption, panel.run_count);
        area.titled(&title_without_surface(panel), ("sans-serif", 16))
            .map_err(plot_error)?;
        return Ok(());
    }

    // Every surface of a panel shares the same runs, hence the same axes
    let axes = &panel.surfaces[0];
    let x_range = padded(axes.xs()[0], axes.xs()[axes.xs().len() - 1], 0.5);
    let z_range = padded(axes.zs()[0], axes.zs()[axes.zs().len() - 1], 0.5);
    let (lo, hi) = panel
        .surfaces
        .iter()
        .filter_map(|s| s.value_range())
        .fold((f64::MAX, f64::MIN), |(lo, hi), (l, h)| (lo.min(l), hi.max(h)));
    let y_range = padded(lo, hi, (hi - lo).abs() * 0.05 + 1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(&caption, ("sans-serif", 16))
        .margin(10)
        .build_cartesian_3d(x_range, y_range, z_range)
        .map_err(plot_error)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart.configure_axes().draw().map_err(plot_error)?;

    for (surface, &color) in panel.surfaces.iter().zip(SURFACE_COLORS.iter()) {
        chart
            .draw_series(
                surface
                    .quads()
                    .into_iter()
                    .map(move |quad| Polygon::new(quad.to_vec(), color.mix(0.5).filled())),
            )
            .map_err(plot_error)?
            .label(surface.metric().name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

/// Caption of a panel whose runs do not span a pher × heur plane
fn title_without_surface(panel: &Panel) -> String {
    let caption = panel.spec.caption();
    if panel.has_runs() {
        format!("{} ({} runs, single weight)", caption, panel.run_count)
    } else {
        format!("{} (no data)", caption)
    }
}

/// Widens a range so that a degenerate axis still has extent
fn padded(lo: f64, hi: f64, pad: f64) -> Range<f64> {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - pad)..(hi + pad)
    } else {
        lo..hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExperimentTable;
    use crate::fixtures::data_generator::generate_experiment_table;
    use crate::plot::panels::build_panels;

    #[test]
    fn degenerate_ranges_are_widened() {
        assert_eq!(padded(2.0, 2.0, 0.5), 1.5..2.5);
        assert_eq!(padded(1.0, 3.0, 0.5), 1.0..3.0);
    }

    #[test]
    fn panels_with_runs_are_not_captioned_empty() {
        let runs: Vec<_> = generate_experiment_table(5, &["A"], &[5], &[10])
            .runs()
            .iter()
            .filter(|run| run.heur_weight == 1.0)
            .cloned()
            .collect();
        let table = ExperimentTable::new(runs);
        let panels = build_panels(&table, &[5, 10], &[10]).unwrap();

        let title = title_without_surface(&panels[0]);
        assert!(!title.contains("no data"), "{}", title);
        assert!(title.starts_with("5 ants, 10 iterations ("));
        assert_eq!(title_without_surface(&panels[1]), "10 ants, 10 iterations (no data)");
    }
}
