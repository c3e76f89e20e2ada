use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand};
use commands::{
    AddArgs, DeleteArgs, EditArgs, ListArgs, PdfArgs, ReportArgs, SizesArgs, SizingArgs,
};
use config::{DEFAULT_STORE, STORE_ENV};
use romaneio_roster::RosterService;
use romaneio_store::JsonFileStore;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod config;
mod flags;
mod pdf;
mod render;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "romaneio")]
#[command(about = "Uniform sizing records (romaneio) for military personnel", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file backing the record store
    #[arg(long, global = true, env = STORE_ENV, default_value = DEFAULT_STORE)]
    store: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the roster
    List(ListArgs),

    /// Register a new person
    Add(AddArgs),

    /// Change the identity fields of a registered person
    Edit(EditArgs),

    /// Record equipment sizes for a person
    Sizing(SizingArgs),

    /// Remove a person
    Delete(DeleteArgs),

    /// Print the sizing report
    Report(ReportArgs),

    /// Write a report as PDF
    Pdf(PdfArgs),

    /// Show the size catalog
    Sizes(SizesArgs),
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

async fn open_service(path: PathBuf) -> Result<RosterService<JsonFileStore>> {
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("Failed to open record store {}", path.display()))?;
    let mut service = RosterService::start(Arc::new(store));
    service
        .handle_mut()
        .ready()
        .await
        .context("Record store closed before the first snapshot")?;
    Ok(service)
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let store = cli.store;
    match cli.command {
        Commands::Sizes(args) => commands::run_sizes(args),
        Commands::List(args) => commands::run_list(&open_service(store).await?, args),
        Commands::Add(args) => {
            let mut service = open_service(store).await?;
            commands::run_add(&mut service, args).await
        }
        Commands::Edit(args) => {
            let mut service = open_service(store).await?;
            commands::run_edit(&mut service, args).await
        }
        Commands::Sizing(args) => {
            let service = open_service(store).await?;
            commands::run_sizing(&service, args).await
        }
        Commands::Delete(args) => {
            let mut service = open_service(store).await?;
            commands::run_delete(&mut service, args).await
        }
        Commands::Report(args) => commands::run_report(&open_service(store).await?, args),
        Commands::Pdf(args) => commands::run_pdf(&open_service(store).await?, args),
    }
}
