//! Command-line interface for fincatalog.
//!
//! This module provides the CLI structure, argument types and output
//! rendering for the `fincat` binary.

mod commands;
pub mod confirm;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    SelectCommand, ShowCommand, StatusCommand,
};

/// fincat - Browse and maintain the financial products catalog
///
/// Lists, searches, shows, creates, edits and deletes products on the remote
/// catalog service. The last fetched list and the selected product are kept
/// in a local cache.
#[derive(Debug, Parser)]
#[command(name = "fincat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and list products, optionally filtered by a search term
    List(ListCommand),

    /// Select a product from the last fetched list
    Select(SelectCommand),

    /// Show the selected product
    Show(ShowCommand),

    /// Create a new product
    Add(AddCommand),

    /// Edit the selected product
    Edit(EditCommand),

    /// Delete the selected product
    Delete(DeleteCommand),

    /// Clear the current selection
    Deselect,

    /// Show endpoint and cache status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
