use aco_stats::report;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    report::run()
}
