use std::cmp::Ordering;

use crate::domain::{Column, ExperimentRun};
use crate::error::{AnalysisError, Result};

/// Mean of a metric over the `pher_weight` × `heur_weight` plane.
///
/// `xs` are the distinct pheromone weights and `zs` the distinct heuristic
/// weights, both ascending. A cell is `None` when no run sits at that
/// coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    metric: Column,
    xs: Vec<f64>,
    zs: Vec<f64>,
    cells: Vec<Vec<Option<f64>>>,
}

impl SurfaceGrid {
    pub fn from_runs(runs: &[ExperimentRun], metric: Column) -> Result<Self> {
        if !metric.is_numeric() {
            return Err(AnalysisError::NonNumericColumn(metric.to_string()));
        }

        let xs = distinct_sorted(runs.iter().map(|r| r.pher_weight));
        let zs = distinct_sorted(runs.iter().map(|r| r.heur_weight));

        let mut sums = vec![vec![(0.0, 0usize); zs.len()]; xs.len()];
        for run in runs {
            let (Some(xi), Some(zi)) = (position(&xs, run.pher_weight), position(&zs, run.heur_weight)) else {
                continue;
            };
            if let Some(value) = run.numeric(metric) {
                let cell = &mut sums[xi][zi];
                cell.0 += value;
                cell.1 += 1;
            }
        }

        let cells = sums
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                    .collect()
            })
            .collect();

        Ok(Self { metric, xs, zs, cells })
    }

    pub fn metric(&self) -> Column {
        self.metric
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn zs(&self) -> &[f64] {
        &self.zs
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() || self.zs.is_empty()
    }

    pub fn value_at(&self, xi: usize, zi: usize) -> Option<f64> {
        self.cells.get(xi)?.get(zi).copied().flatten()
    }

    /// Lowest and highest populated cell
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Quadrilaterals between neighbouring cells as `(x, value, z)` corners.
    /// Quads touching an empty cell are skipped.
    pub fn quads(&self) -> Vec<[(f64, f64, f64); 4]> {
        let mut quads = Vec::new();
        for xi in 0..self.xs.len().saturating_sub(1) {
            for zi in 0..self.zs.len().saturating_sub(1) {
                let corners = [(xi, zi), (xi + 1, zi), (xi + 1, zi + 1), (xi, zi + 1)];
                let points: Option<Vec<(f64, f64, f64)>> = corners
                    .iter()
                    .map(|&(x, z)| self.value_at(x, z).map(|v| (self.xs[x], v, self.zs[z])))
                    .collect();
                if let Some(p) = points {
                    quads.push([p[0], p[1], p[2], p[3]]);
                }
            }
        }
        quads
    }
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
    values
}

fn position(axis: &[f64], value: f64) -> Option<usize> {
    axis.binary_search_by(|axis_value| axis_value.total_cmp(&value)).ok()
}
