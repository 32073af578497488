//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `migrate`: Migrate the project in the app root to the target framework version
//! - `init`: Initialize a taro-migrate configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct MigrateArgs {
    /// Project root containing package.json (default: current directory)
    #[arg(long)]
    pub app_root: Option<PathBuf>,

    /// Source directory relative to the app root (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Major framework version to migrate to
    #[arg(long, default_value_t = 3)]
    pub target_version: u32,

    /// Platform suffix preferred when resolving sources, e.g. weapp (overrides config file)
    #[arg(long, env = "TARO_ENV")]
    pub platform: Option<String>,

    /// Report what would be generated without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct MigrateCommand {
    #[command(flatten)]
    pub args: MigrateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract page/component config into config files and flatten usingComponents
    Migrate(MigrateCommand),
    /// Initialize a new .taromigraterc.json configuration file
    Init,
}
