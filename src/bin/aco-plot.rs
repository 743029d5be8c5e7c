use aco_stats::plot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    plot::run()
}
