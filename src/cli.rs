//! CLI argument parsing module for nodella

use crate::release::NODE_DIST_INDEX_URL;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Package manager used to install dependencies and run scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerKind {
    Npm,
    Yarn,
}

/// Tool used to install and switch Node.js versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VersionManagerKind {
    #[default]
    Nvm,
    Fnm,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Step announcements and live subprocess output
    #[default]
    Debug,
    /// Results only
    Info,
}

/// Shown above the usage line in `--help`
const BANNER: &str = r"
  ███╗   ██╗ ██████╗ ██████╗ ███████╗██╗     ██╗      █████╗
  ████╗  ██║██╔═══██╗██╔══██╗██╔════╝██║     ██║     ██╔══██╗
  ██╔██╗ ██║██║   ██║██║  ██║█████╗  ██║     ██║     ███████║
  ██║╚██╗██║██║   ██║██║  ██║██╔══╝  ██║     ██║     ██╔══██║
  ██║ ╚████║╚██████╔╝██████╔╝███████╗███████╗███████╗██║  ██║
  ╚═╝  ╚═══╝ ╚═════╝ ╚═════╝ ╚══════╝╚══════╝╚══════╝╚═╝  ╚═╝";

/// Test Node.js version upgrades on your code
#[derive(Parser, Debug, Clone)]
#[command(
    name = "nodella",
    version,
    disable_version_flag = true,
    about = "Test Node.js version upgrades on your code",
    before_help = BANNER,
    after_help = "Example: nodella --manager npm --target lts --no-build"
)]
pub struct CliArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".", env = "NODELLA_PATH")]
    pub path: PathBuf,

    /// Package manager
    #[arg(long, value_enum, env = "NODELLA_MANAGER")]
    pub manager: PackageManagerKind,

    /// Target Node.js version: 'latest', 'lts', a major (20), a minor line (20.1) or a full version
    #[arg(long, default_value = "latest", env = "NODELLA_TARGET")]
    pub target: String,

    /// Build script name
    #[arg(long, default_value = "build", env = "NODELLA_BUILD")]
    pub build: String,

    /// Test script name
    #[arg(long, default_value = "test", env = "NODELLA_TEST")]
    pub test: String,

    /// Skip the build script
    #[arg(long)]
    pub no_build: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Debug, env = "NODELLA_LOG")]
    pub log: LogLevel,

    /// Node.js version manager
    #[arg(long, value_enum, default_value_t = VersionManagerKind::Nvm, env = "NODELLA_VERSION_MANAGER")]
    pub version_manager: VersionManagerKind,

    /// Release index URL (for mirrors of nodejs.org/dist)
    #[arg(long, default_value = NODE_DIST_INDEX_URL, env = "NODELLA_INDEX_URL")]
    pub index_url: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}

impl CliArgs {
    /// Check if the build script should run
    pub fn should_build(&self) -> bool {
        !self.no_build
    }
}
