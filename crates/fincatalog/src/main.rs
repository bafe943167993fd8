//! `fincat` - CLI for the financial-products catalog
//!
//! This binary lists, selects, shows, creates, edits and deletes products on
//! the remote catalog service.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::Parser;

use fincatalog::cli::confirm::PromptConfirm;
use fincatalog::cli::{
    render, AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    ShowCommand,
};
use fincatalog::{
    init_logging, AssumeYes, Catalog, Config, DeleteOutcome, Error, HttpProductApi,
    SelectionCache,
};

type AppCatalog = Catalog<HttpProductApi>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Config commands must work even when the active configuration is broken
    if let Command::Config(config_cmd) = cli.command {
        return handle_config(cli.config, config_cmd);
    }

    let config = Config::load_from(cli.config.clone())?;
    let catalog = open_catalog(&config)?;
    let today = Utc::now().date_naive();

    match cli.command {
        Command::List(cmd) => handle_list(&catalog, &cmd).await,
        Command::Select(cmd) => {
            let product = catalog.select(&cmd.id)?;
            println!("Selected {product}");
            Ok(())
        }
        Command::Show(cmd) => handle_show(&catalog, &cmd),
        Command::Add(cmd) => handle_add(&catalog, cmd, today).await,
        Command::Edit(cmd) => handle_edit(&catalog, cmd, today).await,
        Command::Delete(cmd) => handle_delete(&catalog, &cmd).await,
        Command::Deselect => {
            if catalog.clear_selection()? {
                println!("Selection cleared.");
            } else {
                println!("No product was selected.");
            }
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, &catalog, cmd.json),
        // handled before the catalog is opened
        Command::Config(_) => Ok(()),
    }
}

fn open_catalog(config: &Config) -> anyhow::Result<AppCatalog> {
    let cache = SelectionCache::open(config.database_path())?;
    let api = HttpProductApi::from_config(&config.api);
    Ok(Catalog::new(api, cache))
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::Validation(errors)) => {
            eprintln!("Product was not saved:");
            eprintln!("{}", render::field_errors(errors));
        }
        Some(e) => eprintln!("Error: {e}"),
        None => eprintln!("Error: {err:#}"),
    }
}

async fn handle_list(catalog: &AppCatalog, cmd: &ListCommand) -> anyhow::Result<()> {
    let view = catalog.open_list().await;
    if let Some(alert) = &view.alert {
        eprintln!("{alert}");
    }

    let products = view.filtered(cmd.search.as_deref().unwrap_or_default());
    println!("{}", render::product_list(&products, cmd.format)?);
    Ok(())
}

fn handle_show(catalog: &AppCatalog, cmd: &ShowCommand) -> anyhow::Result<()> {
    let product = match &cmd.id {
        Some(id) => catalog.select(id)?,
        None => catalog.detail()?,
    };
    println!("{}", render::product_detail(&product, cmd.format)?);
    Ok(())
}

async fn handle_add(
    catalog: &AppCatalog,
    cmd: AddCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let created = catalog.create(cmd.into_product(today), today).await?;
    println!("Created {created}");
    Ok(())
}

async fn handle_edit(
    catalog: &AppCatalog,
    cmd: EditCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let changes = cmd.into_changes();
    if changes.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let updated = catalog.edit(changes, today).await?;
    println!("Updated {updated}");
    Ok(())
}

async fn handle_delete(catalog: &AppCatalog, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let outcome = if cmd.yes {
        catalog.delete_selected(&AssumeYes).await?
    } else {
        catalog.delete_selected(&PromptConfirm::stdio()).await?
    };

    match outcome {
        DeleteOutcome::Cancelled => println!("Delete cancelled."),
        DeleteOutcome::Deleted(product) => println!("Deleted {product}"),
    }
    Ok(())
}

fn handle_status(config: &Config, catalog: &AppCatalog, json: bool) -> anyhow::Result<()> {
    let stats = catalog.cache().stats()?;
    let cache_path = catalog.cache().path().display().to_string();

    if json {
        let status = serde_json::json!({
            "base_url": catalog.api().base_url(),
            "author_id": config.api.author_id,
            "cache_path": cache_path,
            "cached_products": stats.cached_products,
            "selected_id": stats.selected_id,
            "last_refreshed": stats.last_refreshed,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!(
            "{}",
            render::status(catalog.api().base_url(), &stats, &cache_path)
        );
    }
    Ok(())
}

fn handle_config(
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[API]");
                println!("  Base URL:      {}", config.api.base_url);
                println!("  Author id:     {}", config.api.author_id);
                println!();
                println!("[Cache]");
                println!("  Database path: {}", config.database_path().display());
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
