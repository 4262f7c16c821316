use anyhow::{Context, Result};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::Format;
use crate::filesystem::FilesystemCustomization;

/// Represents a filesystem customization file. This mainly helps sort out the two
/// supported formats, which differ in their key names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigPath {
    Json(PathBuf),
    Toml(PathBuf),
}

impl ConfigPath {
    /// Choose the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<ConfigPath> {
        let path = path.as_ref();
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "json" => Some(ConfigPath::Json(path.to_path_buf())),
            "toml" => Some(ConfigPath::Toml(path.to_path_buf())),
            _ => None,
        }
    }

    /// Check for a customization file in the given directory.
    pub fn from_dir(path: impl AsRef<Path>) -> Option<ConfigPath> {
        let path = path.as_ref();

        if path.join("filesystem.json").exists() {
            return Some(ConfigPath::Json(path.join("filesystem.json")));
        }

        if path.join("filesystem.toml").exists() {
            return Some(ConfigPath::Toml(path.join("filesystem.toml")));
        }

        None
    }

    pub fn format(&self) -> Format {
        match self {
            ConfigPath::Json(_) => Format::Json,
            ConfigPath::Toml(_) => Format::Toml,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigPath::Json(path) | ConfigPath::Toml(path) => path,
        }
    }

    /// Read and decode the customization.
    pub fn load(&self) -> Result<FilesystemCustomization> {
        let raw = std::fs::read(self.path())
            .with_context(|| format!("Failed to read {}", self))?;
        debug!(path = %self, format = %self.format(), "Loading filesystem customization");

        FilesystemCustomization::decode(self.format(), &raw)
            .with_context(|| format!("Failed to decode {}", self))
    }

    /// Write a new customization file.
    pub fn write(&self, fsc: &FilesystemCustomization) -> Result<()> {
        let content = match self {
            ConfigPath::Json(_) => serde_json::to_vec_pretty(&fsc.to_json())?,
            ConfigPath::Toml(_) => toml::to_string_pretty(&fsc.to_toml())?.into_bytes(),
        };

        std::fs::write(self.path(), content).with_context(|| format!("Failed to write {}", self))
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.path().to_string_lossy().fmt(f)
    }
}
