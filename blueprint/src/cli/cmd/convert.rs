use super::check::find_config;
use crate::config::ConfigPath;
use anyhow::{Result, anyhow};
use std::process::ExitCode;
use tracing::{error, info};

/// Read a customization in one format and write it in the format of `output`.
pub fn convert(path: &str, output: &str) -> Result<ConfigPath> {
    let input = find_config(path)?;
    let destination = ConfigPath::from_path(output)
        .ok_or_else(|| anyhow!("Output must end in .json or .toml: {output}"))?;

    let fsc = input.load()?;
    destination.write(&fsc)?;

    info!(from = %input.format(), to = %destination.format(), "Wrote {}", destination);
    Ok(destination)
}

pub fn run(cmd: super::Commands) -> ExitCode {
    match cmd {
        super::Commands::Convert { path, output } => match convert(&path, &output) {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = ?err, "Failed to convert customization");
                ExitCode::FAILURE
            }
        },
        _ => ExitCode::FAILURE,
    }
}
