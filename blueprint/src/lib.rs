//! Filesystem customizations for image blueprints.
//!
//! A customization names a mountpoint and the minimum size of the filesystem mounted
//! there. Blueprints are written in either JSON or TOML, and the two formats disagree
//! on the name of the size key (`minsize` and `size` respectively).

pub mod cli;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod size;
pub mod value;

pub use error::{DecodeError, Format};
pub use filesystem::FilesystemCustomization;
