use clap::Parser;
use hypermanager::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
