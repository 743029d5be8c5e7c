use aco_stats::solver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    solver::run()
}
