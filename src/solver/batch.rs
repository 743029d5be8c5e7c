use rayon::prelude::*;
use tracing::debug;

use crate::solver::colony::Colony;

/// Shortest, longest and mean best-tour length over repeated colony runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRunData {
    pub min_result: f64,
    pub max_result: f64,
    pub average: f64,
    pub run_count: u32,
}

impl Default for BatchRunData {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchRunData {
    pub fn new() -> Self {
        Self {
            min_result: f64::MAX,
            max_result: f64::MIN,
            average: 0.0,
            run_count: 0,
        }
    }

    pub fn add_run(&mut self, result: f64) {
        self.max_result = self.max_result.max(result);
        self.min_result = self.min_result.min(result);
        let previous_sum = self.average * self.run_count as f64;
        self.run_count += 1;
        self.average = (previous_sum + result) / self.run_count as f64;
    }

    /// Merges another batch; the average is weighted by run counts
    pub fn add_batch(&mut self, other: BatchRunData) {
        if other.run_count == 0 {
            return;
        }
        self.max_result = self.max_result.max(other.max_result);
        self.min_result = self.min_result.min(other.min_result);
        let self_sum = self.average * self.run_count as f64;
        let other_sum = other.average * other.run_count as f64;
        self.run_count += other.run_count;
        self.average = (self_sum + other_sum) / self.run_count as f64;
    }

    /// The summary line of `statistics.txt` for one graph
    pub fn summary_line(&self, graph_name: &str) -> String {
        format!(
            "File {}: Finished {} runs. Longest found route is {}, shortest found route is {}. The average length is {}",
            graph_name, self.run_count, self.max_result, self.min_result, self.average
        )
    }
}

/// Splits `tries` as evenly as possible across `workers`
fn split_tries(tries: u32, workers: u32) -> Vec<u32> {
    let workers = workers.clamp(1, tries.max(1));
    (0..workers)
        .map(|i| tries / workers + u32::from(i < tries % workers))
        .filter(|&n| n > 0)
        .collect()
}

/// Runs `colony` from scratch `tries` times on the rayon pool. Each worker
/// clones the colony and reseeds it from `seed` and its worker index.
pub fn run_batch(colony: &Colony, tries: u32, seed: u64) -> BatchRunData {
    let chunks = split_tries(tries, rayon::current_num_threads() as u32);
    debug!("{} tries over {} workers", tries, chunks.len());

    chunks
        .par_iter()
        .enumerate()
        .map(|(worker, &count)| {
            let mut local = colony.clone();
            local.reset();
            local.reseed(seed.wrapping_add(worker as u64));

            let mut stats = BatchRunData::new();
            for _ in 0..count {
                stats.add_run(local.do_all_iterations());
                local.reset();
            }
            stats
        })
        .reduce(BatchRunData::new, |mut acc, batch| {
            acc.add_batch(batch);
            acc
        })
}
