use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, span, trace, Level};

use crate::domain::RunParameters;
use crate::error::{AnalysisError, Result};
use crate::solver::graph::{distance_matrix, GraphNode};

const INITIAL_PHEROMONE: f64 = 0.01;
const MIN_PHEROMONE: f64 = 1e-9;

/// Ant colony over a closed tour that starts and ends at the first node.
///
/// Each iteration every ant builds a full tour: with probability `rand_chance`
/// the next node is picked uniformly, otherwise by roulette over
/// `pheromone^pher_weight * (1 / distance)^heur_weight`. Pheromone is then
/// scaled by `evap_coeff` and every ant deposits `1 / tour length` on its edges.
#[derive(Debug, Clone)]
pub struct Colony {
    params: RunParameters,
    nodes: Vec<GraphNode>,
    distances: Vec<Vec<f64>>,
    pheromones: Vec<Vec<f64>>,
    best_tour: Vec<usize>,
    best_length: f64,
    rng: ChaCha8Rng,
}

impl Colony {
    pub fn new(nodes: Vec<GraphNode>, params: RunParameters, seed: u64) -> Result<Self> {
        validate(&params)?;
        if nodes.len() < 2 {
            return Err(AnalysisError::MalformedGraph(format!(
                "a tour needs at least two nodes, found {}",
                nodes.len()
            )));
        }

        let n = nodes.len();
        Ok(Self {
            params,
            distances: distance_matrix(&nodes),
            nodes,
            pheromones: vec![vec![INITIAL_PHEROMONE; n]; n],
            best_tour: Vec::new(),
            best_length: f64::MAX,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// `f64::MAX` until the first tour is found
    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Node positions of the best tour, starting at 0; the closing edge is implied
    pub fn best_tour(&self) -> &[usize] {
        &self.best_tour
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Forgets the best tour and the pheromone trails; the random stream continues
    pub fn reset(&mut self) {
        for row in &mut self.pheromones {
            row.fill(INITIAL_PHEROMONE);
        }
        self.best_tour.clear();
        self.best_length = f64::MAX;
    }

    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let open: f64 = tour.windows(2).map(|w| self.distances[w[0]][w[1]]).sum();
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => open + self.distances[last][first],
            _ => 0.0,
        }
    }

    /// Greedy warm-up followed by `iterations` colony iterations; returns the best length
    pub fn do_all_iterations(&mut self) -> f64 {
        let span = span!(Level::DEBUG, "colony", nodes = self.nodes.len(), ants = self.params.ants);
        let _guard = span.enter();

        let greedy = self.nearest_neighbour_tour();
        let greedy_length = self.tour_length(&greedy);
        self.update_pheromones(&[(greedy.clone(), greedy_length)]);
        self.consider(&greedy, greedy_length);

        for iteration in 0..self.params.iterations {
            self.do_iteration();
            trace!("Iteration {}: best {:.2}", iteration, self.best_length);
        }

        debug!("Best tour length {:.2}", self.best_length);
        self.best_length
    }

    pub fn do_iteration(&mut self) {
        let tours: Vec<(Vec<usize>, f64)> = (0..self.params.ants)
            .map(|_| {
                let tour = self.construct_tour();
                let length = self.tour_length(&tour);
                (tour, length)
            })
            .collect();

        self.update_pheromones(&tours);
        for (tour, length) in &tours {
            self.consider(tour, *length);
        }
    }

    fn consider(&mut self, tour: &[usize], length: f64) {
        if length < self.best_length {
            self.best_length = length;
            self.best_tour = tour.to_vec();
        }
    }

    fn construct_tour(&mut self) -> Vec<usize> {
        let mut tour = Vec::with_capacity(self.nodes.len());
        let mut unvisited: Vec<usize> = (1..self.nodes.len()).collect();
        let mut at = 0;
        tour.push(at);

        while !unvisited.is_empty() {
            let pick = self.choose_next(at, &unvisited);
            at = unvisited.swap_remove(pick);
            tour.push(at);
        }
        tour
    }

    /// Index into `unvisited` of the next node
    fn choose_next(&mut self, from: usize, unvisited: &[usize]) -> usize {
        if self.rng.gen::<f64>() < self.params.rand_chance {
            return self.rng.gen_range(0..unvisited.len());
        }

        let weights: Vec<f64> = unvisited.iter().map(|&to| self.attractiveness(from, to)).collect();
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return self.rng.gen_range(0..unvisited.len());
        }

        let target = self.rng.gen::<f64>() * total;
        let mut so_far = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            so_far += weight;
            if so_far > target {
                return index;
            }
        }
        weights.len() - 1
    }

    fn attractiveness(&self, from: usize, to: usize) -> f64 {
        let heuristic = self.distances[from][to].max(f64::EPSILON).recip();
        self.pheromones[from][to].powf(self.params.pher_weight) * heuristic.powf(self.params.heur_weight)
    }

    fn update_pheromones(&mut self, tours: &[(Vec<usize>, f64)]) {
        let retained = self.params.evap_coeff;
        for row in &mut self.pheromones {
            for strength in row.iter_mut() {
                *strength = (*strength * retained).max(MIN_PHEROMONE);
            }
        }

        for (tour, length) in tours {
            if *length <= 0.0 {
                continue;
            }
            let deposit = length.recip();
            let closing = [tour[tour.len() - 1], tour[0]];
            for edge in tour.windows(2).chain(std::iter::once(&closing[..])) {
                self.pheromones[edge[0]][edge[1]] += deposit;
                self.pheromones[edge[1]][edge[0]] += deposit;
            }
        }
    }

    /// Always visits the closest unvisited node; ties go to the lower position
    fn nearest_neighbour_tour(&self) -> Vec<usize> {
        let mut tour = vec![0];
        let mut unvisited: Vec<usize> = (1..self.nodes.len()).collect();
        while !unvisited.is_empty() {
            let at = tour[tour.len() - 1];
            let (pick, _) = unvisited
                .iter()
                .enumerate()
                .min_by(|(_, &a), (_, &b)| {
                    self.distances[at][a].total_cmp(&self.distances[at][b]).then(a.cmp(&b))
                })
                .unwrap_or((0, &0));
            tour.push(unvisited.remove(pick));
        }
        tour
    }

    /// The best tour as a neato-laid-out DOT digraph
    pub fn solution_to_graphviz(&self) -> String {
        let nodes: String = self.nodes.iter().map(|n| format!("{}\n", n.to_graphviz())).collect();
        let edges: String = self
            .best_tour
            .iter()
            .zip(self.best_tour.iter().cycle().skip(1))
            .map(|(&a, &b)| format!("{} -> {}\n", self.nodes[a].id, self.nodes[b].id))
            .collect();

        format!(
            "digraph D {{\nlayout = \"neato\"\nlabelloc = \"t\"\nlabel = \"Solution length is {}\"\n{}\n{}}}\n",
            self.best_length, nodes, edges
        )
    }
}

fn validate(params: &RunParameters) -> Result<()> {
    let invalid = |what: &str| Err(AnalysisError::InvalidParameters(what.to_string()));
    if params.ants == 0 {
        return invalid("ants must be at least 1");
    }
    if !(0.0..=1.0).contains(&params.evap_coeff) {
        return invalid("evap_coeff must be within [0, 1]");
    }
    if !(0.0..=1.0).contains(&params.rand_chance) {
        return invalid("rand_chance must be within [0, 1]");
    }
    if !(params.pher_weight.is_finite() && params.heur_weight.is_finite()) {
        return invalid("pheromone and heuristic weights must be finite");
    }
    Ok(())
}
