use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the app described by the config file's `type`
    ///
    /// Requires a config file naming `react-app` or `web-app`.
    Build(BuildArgs),

    /// Build a React app
    #[command(name = "build-react-app")]
    BuildReactApp(BuildArgs),

    /// Build a plain web app
    #[command(name = "build-web-app")]
    BuildWebApp(BuildArgs),

    /// Delete the build output directory's contents
    #[command(name = "clean-app")]
    CleanApp(CleanArgs),

    /// Print the resolved config as JSON
    ///
    /// Shows the config after deprecated settings have been moved and
    /// defaults filled in.
    Check(CheckArgs),
}

impl Command {
    /// Name the command was invoked as; config factories see this.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build(_) => "build",
            Command::BuildReactApp(_) => "build-react-app",
            Command::BuildWebApp(_) => "build-web-app",
            Command::CleanApp(_) => "clean-app",
            Command::Check(_) => "check",
        }
    }
}

/// Where the project and its config live.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Config file, relative to the project directory
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Config file as an absolute path
    #[arg(long, value_name = "PATH", conflicts_with = "config")]
    pub abs_config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Bundler command, run with the resolved config on stdin
    ///
    /// Example: --bundler "node scripts/bundle.js"
    #[arg(long, value_name = "CMD")]
    pub bundler: Option<String>,

    /// Output directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Directory of static files copied into the output
    #[arg(long, value_name = "DIR")]
    pub public_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Fail when there is no config file or it has no `type`
    #[arg(long)]
    pub required: bool,
}
