//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::product::{calendar_date, Product, ProductChanges};
use crate::validation::one_year_after;

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    calendar_date::parse(value).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Case-insensitive search on product name or id
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Select command arguments.
#[derive(Debug, Args)]
pub struct SelectCommand {
    /// Id of the product to select
    pub id: String,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Select this product first
    pub id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Product id (3-10 characters, must not exist yet)
    #[arg(long)]
    pub id: String,

    /// Product name (5-100 characters)
    #[arg(long)]
    pub name: String,

    /// Product description (10-200 characters)
    #[arg(long)]
    pub description: String,

    /// Logo URL
    #[arg(long)]
    pub logo: String,

    /// Release date, YYYY-MM-DD [default: today]
    #[arg(long, value_parser = parse_date)]
    pub date_release: Option<NaiveDate>,

    /// Revision date, YYYY-MM-DD [default: one year after release]
    #[arg(long, value_parser = parse_date)]
    pub date_revision: Option<NaiveDate>,
}

impl AddCommand {
    /// Build the product to submit, filling in default dates.
    #[must_use]
    pub fn into_product(self, today: NaiveDate) -> Product {
        let date_release = self.date_release.unwrap_or(today);
        let date_revision = self
            .date_revision
            .unwrap_or_else(|| one_year_after(date_release));
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            logo: self.logo,
            date_release,
            date_revision,
        }
    }
}

/// Edit command arguments. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// New name (5-100 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// New description (10-200 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// New logo URL
    #[arg(long)]
    pub logo: Option<String>,

    /// New release date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date_release: Option<NaiveDate>,

    /// New revision date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date_revision: Option<NaiveDate>,
}

impl EditCommand {
    /// Convert into product changes.
    #[must_use]
    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            description: self.description,
            logo: self.logo,
            date_release: self.date_release,
            date_revision: self.date_revision,
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
