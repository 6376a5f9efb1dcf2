use clap::Parser;
use sharpelab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    sharpelab::logging::init();
    run(Cli::parse())
}
