//! Main entry point for the testtree binary.

use clap::Parser;
use testtree::cli::{Args, Command};
use testtree::discovery::discover;

fn main() {
    env_logger::init();
    let args = Args::parse();

    let code = match args.command {
        Command::Discover(ref discover_args) => match discover(discover_args) {
            Ok(report) => {
                let json = serde_json::to_string_pretty(&report)
                    .expect("Failed to serialize discovery report");
                println!("{json}");
                log::info!("{}", report.summarize());
                if report.is_success() {
                    0
                } else {
                    1
                }
            }
            Err(err) => {
                eprintln!("discovery failed: {err}");
                1
            }
        },
    };
    std::process::exit(code);
}
