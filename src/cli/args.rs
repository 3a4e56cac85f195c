//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all potgen commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `build`: Extract messages and write `.pot` catalogs
//! - `init`: Initialize potgen configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::timestamp::SOURCE_DATE_EPOCH;

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read a project.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched upward from here
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Directory holding the serialized documents (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalog output directory (overrides config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Fixed creation time as seconds since the Unix epoch
    #[arg(long, env = SOURCE_DATE_EPOCH)]
    pub source_date_epoch: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable messages and write gettext catalogs
    Build(BuildCommand),
    /// Initialize a new .potgenrc.json configuration file
    Init,
}
