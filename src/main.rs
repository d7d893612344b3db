//! CLI entry point for multipoint histogram texture scoring

use clap::Parser;
use multipoint::io::cli::{BatchEvaluator, Cli};

fn main() -> multipoint::Result<()> {
    let cli = Cli::parse();
    let mut evaluator = BatchEvaluator::new(cli);
    evaluator.run()
}
