//! Orthonova Clinic front desk.
//!
//! ```text
//! orthonova-desk roster [patients|doctors|all]
//! orthonova-desk register patient --set name="Jane Doe" --set age=34
//! orthonova-desk --database desk.db register doctor
//! ```

mod prompt;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use orthonova_core::{
    DeskConfig, FrontDesk, RecordKind, SqliteStore, Store, StoreBackend, SubmissionStatus,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

const APP_TITLE: &str = "Orthonova Clinic";

#[derive(Debug, Parser)]
#[command(name = "orthonova-desk", version, about = "Orthonova Clinic front desk")]
struct Cli {
    /// Use a local database file instead of the configured store
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show registered patients and/or doctors
    Roster {
        #[arg(value_enum, default_value_t = Which::All)]
        which: Which,
    },
    /// Register a patient or a doctor
    Register {
        #[arg(value_enum)]
        kind: Kind,

        /// Pre-fill a field, e.g. --set contactNumber=9998887777
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = prompt::parse_pair)]
        set: Vec<(String, String)>,

        /// Fail instead of prompting for fields not given with --set
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Which {
    Patients,
    Doctors,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Patient,
    Doctor,
}

impl From<Kind> for RecordKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Patient => RecordKind::Patient,
            Kind::Doctor => RecordKind::Doctor,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // load env variables, this is mainly useful for development
    let _ = dotenv::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = open_store(cli.database.as_deref())?;
    let mut desk = FrontDesk::new(store);
    desk.mount().await;

    match cli.command {
        Command::Roster { which } => print_roster(&desk, which),
        Command::Register {
            kind,
            set,
            no_prompt,
        } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let input = (!no_prompt).then_some(&mut input);
            register(&mut desk, kind.into(), set, input, &mut io::stdout()).await?
        }
    }

    Ok(())
}

fn open_store(database: Option<&std::path::Path>) -> Result<Arc<dyn Store>> {
    if let Some(path) = database {
        info!(path = %path.display(), "using local database");
        let store = SqliteStore::open(path)
            .with_context(|| format!("could not open database {}", path.display()))?;
        return Ok(Arc::new(store));
    }

    let backend = DeskConfig::load()
        .context("failed to load configuration")?
        .backend()?;
    match &backend {
        StoreBackend::Rest { url, .. } => info!(%url, "connecting to remote store"),
        StoreBackend::Sqlite { path } => info!(path = %path.display(), "using local database"),
    }
    backend.connect().context("could not connect to store")
}

fn print_roster(desk: &FrontDesk, which: Which) {
    println!("{}\n", APP_TITLE);
    if matches!(which, Which::Patients | Which::All) {
        println!("Registered Patients\n{}", desk.render_patients());
    }
    if matches!(which, Which::Doctors | Which::All) {
        println!("Registered Doctors\n{}", desk.render_doctors());
    }
}

/// Fill the form from `preset`, prompt on `input` for anything still empty
/// (or refuse when there is no input), then submit.
///
/// A submission that reaches the store but fails is an error.
async fn register<R: BufRead, W: Write>(
    desk: &mut FrontDesk,
    kind: RecordKind,
    preset: Vec<(String, String)>,
    input: Option<&mut R>,
    output: &mut W,
) -> Result<()> {
    let form = desk.form_mut(kind);
    for (name, value) in preset {
        form.set_value(&name, value)?;
    }

    if let Some(input) = input {
        if !form.is_complete() {
            writeln!(output, "== {} ==", form.title())?;
            prompt::fill_missing(form, input, output)?;
        }
    }

    let status = desk.submit(kind).await?;
    if let Some(banner) = status.banner() {
        writeln!(output, "{}", banner)?;
    }

    match kind {
        RecordKind::Patient => writeln!(output, "\n{}", desk.render_patients())?,
        RecordKind::Doctor => writeln!(output, "\n{}", desk.render_doctors())?,
    }

    if status == SubmissionStatus::Failed {
        anyhow::bail!("registration was not saved");
    }
    Ok(())
}
