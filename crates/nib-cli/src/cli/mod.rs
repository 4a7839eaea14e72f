//! Command-line interface definition for nib.
//!
//! - `nib build` - build the app named by the config's `type`
//! - `nib build-react-app` / `nib build-web-app` - build with a specific preset
//! - `nib clean-app` - delete the build output
//! - `nib check` - print the fully resolved user config

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, CleanArgs, Command, ProjectArgs};

/// nib - build React and web apps without writing bundler config
#[derive(Parser, Debug)]
#[command(
    name = "nib",
    version,
    about = "Build React and web apps from a small config file",
    long_about = "nib reads nib.config.toml, upgrades deprecated settings, merges them with\n\
                  the preset for your project type and runs your bundler over the result."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
