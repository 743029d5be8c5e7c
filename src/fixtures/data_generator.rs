use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::{ExperimentRun, ExperimentTable};

const EVAP_COEFFS: [f64; 2] = [0.1, 0.5];
const RAND_CHANCES: [f64; 2] = [0.0, 0.3];
const PHER_WEIGHTS: [f64; 3] = [1.0, 2.0, 3.0];
const HEUR_WEIGHTS: [f64; 3] = [1.0, 2.0, 3.0];

/// Generates a deterministic parameter sweep the way the collector lays it out:
/// one block per parameter combination, one row per graph inside each block.
///
/// Every `(ants, iterations)` pair gets the full evaporation / random-chance /
/// weight sweep, so each surface panel is fully populated.
pub fn generate_experiment_table(
    seed: u64,
    graph_names: &[&str],
    ant_counts: &[u32],
    iteration_counts: &[u32],
) -> ExperimentTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let baselines: Vec<f64> = graph_names
        .iter()
        .map(|_| rng.gen_range(400.0..800.0))
        .collect();

    let mut runs = Vec::new();
    for &ants in ant_counts {
        for &iterations in iteration_counts {
            for &evap_coeff in &EVAP_COEFFS {
                for &rand_chance in &RAND_CHANCES {
                    for &pher_weight in &PHER_WEIGHTS {
                        for &heur_weight in &HEUR_WEIGHTS {
                            for (graph_name, baseline) in graph_names.iter().zip(&baselines) {
                                let shortest_route = baseline * rng.gen_range(1.0..1.2);
                                let average_route = shortest_route * rng.gen_range(1.0..1.15);
                                let longest_route = average_route * rng.gen_range(1.0..1.2);
                                runs.push(ExperimentRun {
                                    ants,
                                    iterations,
                                    evap_coeff,
                                    rand_chance,
                                    pher_weight,
                                    heur_weight,
                                    graph_name: graph_name.to_string(),
                                    shortest_route,
                                    longest_route,
                                    average_route,
                                    time_for_stat_run: (ants as u64 * iterations as u64) / 10
                                        + rng.gen_range(0..5),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    debug!("Generated {} synthetic experiment runs", runs.len());
    ExperimentTable::new(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        let a = generate_experiment_table(64, &["A", "B"], &[5, 10], &[10]);
        let b = generate_experiment_table(64, &["A", "B"], &[5, 10], &[10]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2 * 2 * 2 * 2 * 3 * 3);
    }

    #[test]
    fn route_lengths_are_ordered() {
        let table = generate_experiment_table(1, &["A"], &[5], &[10, 30]);
        for run in table.runs() {
            assert!(run.shortest_route <= run.average_route);
            assert!(run.average_route <= run.longest_route);
        }
    }
}
