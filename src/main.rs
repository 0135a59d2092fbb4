mod cli;
mod config;
mod lineage;
mod model;
mod organize;
mod render;
mod store;

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::LaudoConfig;
use model::Report;
use store::ReportStore;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("laudo=debug")
    } else if cli.quiet {
        EnvFilter::new("laudo=error")
    } else {
        EnvFilter::new("laudo=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    info!("Laudo v{}", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir()?;
    let config = LaudoConfig::load(&cwd).unwrap_or_default();

    match &cli.command {
        cli::Commands::New => {
            let mut store = ReportStore::open(Path::new(&config.store.path))?;
            cli::wizard::run_new_report(&mut store)?;
        }
        cli::Commands::List => {
            let store = ReportStore::open(Path::new(&config.store.path))?;
            list_reports(store.all());
        }
        cli::Commands::View(args) => {
            let store = ReportStore::open(Path::new(&config.store.path))?;
            let chain = lineage::resolve_chain(store.all(), &args.report_id);
            let Some(document) = render::document::assemble(&chain, &config.weights) else {
                println!("Report {} not found — nothing to display.", args.report_id);
                return Ok(());
            };

            let format = args.format.as_deref().unwrap_or(&config.output.format);
            match format {
                "json" => {
                    let output = render::json::render(&document)?;
                    if let Some(ref path) = args.out {
                        std::fs::write(path, &output)?;
                        info!("Document written to {}", path.display());
                    } else {
                        println!("{}", output);
                    }
                }
                _ => {
                    render::terminal::render(&document);
                    if let Some(ref path) = args.out {
                        let json_output = render::json::render(&document)?;
                        std::fs::write(path, &json_output)?;
                        info!("JSON document also written to {}", path.display());
                    }
                }
            }
        }
        cli::Commands::Reinspect { report_id } => {
            let mut store = ReportStore::open(Path::new(&config.store.path))?;
            create_reinspection(&mut store, report_id)?;
        }
        cli::Commands::AddItem { report_id } => {
            let mut store = ReportStore::open(Path::new(&config.store.path))?;
            cli::wizard::run_add_item(&mut store, report_id)?;
        }
        cli::Commands::EditItem {
            report_id,
            finding_id,
        } => {
            let mut store = ReportStore::open(Path::new(&config.store.path))?;
            cli::wizard::run_edit_item(&mut store, report_id, finding_id)?;
        }
        cli::Commands::RemoveItem {
            report_id,
            finding_id,
        } => {
            let mut store = ReportStore::open(Path::new(&config.store.path))?;
            remove_item(&mut store, report_id, finding_id)?;
        }
        cli::Commands::Init => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn list_reports(reports: &[Report]) {
    if reports.is_empty() {
        println!("No reports in the store yet. Run `laudo new` to create one.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Client", "Address", "Created", "Type", "Items"]);
    for report in reports {
        table.add_row(vec![
            Cell::new(&report.id),
            Cell::new(&report.client_name),
            Cell::new(&report.property_address),
            Cell::new(report.created_date.format("%Y-%m-%d")),
            Cell::new(if report.is_reinspection {
                "Re-inspection"
            } else {
                "Original"
            }),
            Cell::new(report.items.len()),
        ]);
    }
    println!("{}", table);
}

/// Create a re-inspection of the latest report in the chain containing
/// `report_id`, persist it, and print the new id.
fn create_reinspection(store: &mut ReportStore, report_id: &str) -> Result<()> {
    let chain = lineage::resolve_chain(store.all(), report_id);
    let Some(latest) = chain.last() else {
        println!("Report {} not found — nothing to re-inspect.", report_id);
        return Ok(());
    };

    if !latest.has_pending_items() {
        println!(
            "Every finding on {} is already corrected; no re-inspection needed.",
            latest.id
        );
        return Ok(());
    }

    let revisit = Report::reinspection_of(latest, Utc::now());
    let new_id = revisit.id.clone();
    store.insert(revisit);
    store.save()?;

    info!("Created re-inspection {} (revision {})", new_id, chain.len() + 1);
    println!("Created re-inspection {}", new_id);
    Ok(())
}

fn remove_item(store: &mut ReportStore, report_id: &str, finding_id: &str) -> Result<()> {
    let Some(report) = store.get(report_id) else {
        println!("Report {} not found.", report_id);
        return Ok(());
    };

    let mut updated = report.clone();
    if !updated.remove_item(finding_id) {
        println!("Finding {} not found on report {}.", finding_id, report_id);
        return Ok(());
    }

    store.update(updated)?;
    store.save()?;
    println!("Removed finding {} from {}.", finding_id, report_id);
    Ok(())
}
