mod demo;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::{LendingService, StockSummary};
use shelf_authz::Member;
use shelf_import::ImportFormat;

#[derive(Debug, Parser)]
#[command(name = "shelf-cli", version, about = "SHELF library lending engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Walk through stock import, roles, lending and notifications
    Demo,
    /// Import stock from a JSON, XML or CSV file and print the catalog
    Import {
        path: PathBuf,
        /// Payload format; inferred from the file extension when omitted
        #[arg(long)]
        format: Option<ImportFormat>,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe what a role allows
    Role { role: String, name: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = shelf_kernel::Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;
    tracing::debug!(command = ?cli.command, "shelf-cli starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Demo => demo::run(&mut out),
        Command::Import { path, format, json } => import(&mut out, &path, format, json),
        Command::Role { role, name } => {
            let member = Member::new(&role, name)?;
            writeln!(out, "{member}")?;
            Ok(())
        }
    }
}

fn import(
    out: &mut impl Write,
    path: &Path,
    format: Option<ImportFormat>,
    json: bool,
) -> anyhow::Result<()> {
    let entries = shelf_import::read_file(path, format)
        .with_context(|| format!("failed to import '{}'", path.display()))?;

    let mut service = LendingService::new();
    service.ingest(entries.into_iter().map(<(String, u32)>::from))?;

    if json {
        let summaries: Vec<StockSummary> = service
            .catalog()
            .iter()
            .into_iter()
            .map(|(title, record)| StockSummary {
                title: title.to_string(),
                record,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &summaries)?;
        writeln!(out)?;
    } else {
        for (title, record) in service.catalog().iter() {
            writeln!(
                out,
                "Title: {title}, Available: {}, Total: {}",
                record.available, record.total
            )?;
        }
    }

    Ok(())
}
