use blueprint::cli::cmd::Commands;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CommandLine {
    #[clap(subcommand)]
    command: Commands,
}

pub fn main() -> ExitCode {
    let command_line = CommandLine::parse();

    // Configure logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Dispatch command
    match &command_line.command {
        Commands::Check { .. } => blueprint::cli::cmd::check::run(command_line.command),
        Commands::Convert { .. } => blueprint::cli::cmd::convert::run(command_line.command),
    }
}
