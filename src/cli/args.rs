//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Run one round over the model files and write binding sources
//! - `init`: Initialize a viewbind configuration file

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root, where the config file search starts
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Model directory (overrides config file)
    #[arg(long)]
    pub model_root: Option<PathBuf>,

    /// Output directory for generated sources (overrides config file)
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report markers on classes without a content view as errors
    #[arg(long)]
    pub strict: bool,

    /// Render bindings without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate view binding sources from the exported element models
    Generate(GenerateCommand),
    /// Initialize a new .viewbindrc.json configuration file
    Init,
}
