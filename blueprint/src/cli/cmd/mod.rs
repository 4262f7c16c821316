pub mod check;
pub mod convert;

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Commands {
    /// Decode and validate a filesystem customization
    Check {
        /// A customization file, or a directory containing filesystem.json or
        /// filesystem.toml
        #[clap(index = 1)]
        path: String,
    },

    /// Rewrite a customization in another format
    Convert {
        /// The customization file to read
        #[clap(index = 1)]
        path: String,

        /// The destination (format is chosen by extension)
        #[clap(long)]
        output: String,
    },
}
