use aco_stats::collector;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    collector::run()
}
