use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::config::CONFIG_FILENAME;
use crate::inventory::domain::ActionKind;

/// Keep installed software in line with a software catalog
#[derive(Parser, Debug)]
#[command(name = "softkeeper")]
#[command(version)]
#[command(about = "Reconcile installed software against a catalog, search it, and run installers", long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Base URL of the catalog service (overrides catalogUrl from the config file)
    #[arg(long, global = true, conflicts_with = "catalog_file")]
    pub catalog_url: Option<String>,

    /// Read the catalog from an exported JSON file instead of the service
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Output format: table or json
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List software installed on this machine, without catalog data
    Scan,
    /// List installed software annotated with catalog data
    Installed,
    /// Show one page of the catalog annotated with installation state
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Entries per page (defaults to pageSize from the config file)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Search the catalog by name or description
    Search {
        keyword: String,

        /// Use the catalog service's own search instead of the local fuzzy index
        #[arg(long)]
        remote: bool,
    },
    /// Install software from the catalog
    Install { name: String },
    /// Uninstall software found on this machine
    Uninstall { name: String },
    /// Update installed software to the catalog version
    Update { name: String },
    /// Open the install location or official page of installed software
    Open { name: String },
    /// Write the reconciled catalog as a JSON array
    Export { path: PathBuf },
}

impl Command {
    /// The lifecycle action a command triggers, if any
    pub fn action(&self) -> Option<(ActionKind, &str)> {
        match self {
            Command::Install { name } => Some((ActionKind::Install, name)),
            Command::Uninstall { name } => Some((ActionKind::Uninstall, name)),
            Command::Update { name } => Some((ActionKind::Update, name)),
            _ => None,
        }
    }
}

impl Args {
    /// Parses the process arguments, leaving exit handling to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
