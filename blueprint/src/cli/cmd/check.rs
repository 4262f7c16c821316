use crate::config::ConfigPath;
use crate::filesystem::FilesystemCustomization;
use crate::size::Size;
use anyhow::{Result, anyhow};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error};
use validator::Validate;

/// Resolve a command line path to a customization file.
pub(super) fn find_config(path: &str) -> Result<ConfigPath> {
    let found = if Path::new(path).is_dir() {
        ConfigPath::from_dir(path)
    } else {
        ConfigPath::from_path(path)
    };

    found.ok_or_else(|| anyhow!("No JSON or TOML customization found at {path}"))
}

/// Load a customization and make sure its mountpoint is usable.
pub fn check(path: &str) -> Result<FilesystemCustomization> {
    let fsc = find_config(path)?.load()?;
    debug!("Loaded: {:#?}", &fsc);

    fsc.validate()?;
    Ok(fsc)
}

pub fn run(cmd: super::Commands) -> ExitCode {
    match cmd {
        super::Commands::Check { path } => match check(&path) {
            Ok(fsc) => {
                println!("mountpoint: {}", fsc.mountpoint);
                println!("minimum size: {} bytes ({})", fsc.min_size, Size(fsc.min_size));
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = ?err, "Failed to check customization");
                ExitCode::FAILURE
            }
        },
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Format;

    #[test]
    fn test_find_config() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dir_path = dir.path().to_string_lossy().to_string();
        assert!(find_config(&dir_path).is_err());

        std::fs::write(
            dir.path().join("filesystem.toml"),
            "mountpoint = \"/\"\nsize = 1024\n",
        )?;
        assert_eq!(find_config(&dir_path)?.format(), Format::Toml);
        assert_eq!(find_config("boot.json")?.format(), Format::Json);
        assert!(find_config("boot.ini").is_err());
        Ok(())
    }

    #[test_log::test]
    fn test_check() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{"mountpoint": "/boot", "minsize": "1 GiB"}"#)?;
        let relative = dir.path().join("relative.json");
        std::fs::write(&relative, r#"{"mountpoint": "boot", "minsize": 1}"#)?;

        let fsc = check(&good.to_string_lossy())?;
        assert_eq!(fsc.min_size, 1073741824);
        assert!(check(&relative.to_string_lossy()).is_err());
        Ok(())
    }
}
