use softkeeper::adapters::outbound::console::StderrProgressReporter;
use softkeeper::adapters::outbound::filesystem::{FileSystemWriter, JsonFileCatalog};
use softkeeper::adapters::outbound::network::{CachingCatalogRepository, HttpCatalogRepository};
use softkeeper::adapters::outbound::process::SystemProcessRunner;
use softkeeper::adapters::outbound::registry::SystemRegistry;
use softkeeper::application::dto::ActionRequest;
use softkeeper::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use softkeeper::application::read_models::InventoryReadModel;
use softkeeper::application::use_cases::{InventoryScanner, InventoryService};
use softkeeper::cli::{Args, Command};
use softkeeper::config::{self, AppConfig};
use softkeeper::inventory::domain::{ActionOutcome, OutcomeStatus, PageRequest};
use softkeeper::inventory::services::Reconciler;
use softkeeper::ports::outbound::{CatalogRepository, OutputPresenter, ProgressReporter};
use softkeeper::shared::error::{ExitCode, SoftkeeperError};
use softkeeper::shared::Result;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("softkeeper=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("softkeeper=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = config::load_or_default(&args.config);
    config::ensure_setup_directory(&config.setup_files_path);

    // A bare scan needs no catalog
    if args.command == Command::Scan {
        let records =
            tokio::task::spawn_blocking(|| InventoryScanner::new(SystemRegistry::new()).scan())
                .await
                .map_err(|e| anyhow::anyhow!("Inventory scan did not complete: {}", e))?;
        render(
            &args,
            InventoryReadModel::from_scan("Installed software", &records),
        )?;
        return Ok(ExitCode::Success);
    }

    // Create adapters (Dependency Injection)
    if let Some(path) = args.catalog_file.clone() {
        return run_with(&args, &config, JsonFileCatalog::new(path)).await;
    }

    let catalog_url = args
        .catalog_url
        .clone()
        .or_else(|| config.catalog_url.clone())
        .ok_or(SoftkeeperError::CatalogSourceMissing)?;
    let catalog = CachingCatalogRepository::new(HttpCatalogRepository::new(&catalog_url)?);
    run_with(&args, &config, catalog).await
}

async fn run_with<C: CatalogRepository>(
    args: &Args,
    config: &AppConfig,
    catalog: C,
) -> Result<ExitCode> {
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let service = InventoryService::new(
        SystemRegistry::new(),
        catalog,
        SystemProcessRunner::new(),
        progress_reporter,
        config.setup_files_path.clone(),
        config.search_result_limit,
    );

    if let Some((kind, name)) = args.command.action() {
        let response = service.perform(ActionRequest::new(kind, name)).await?;
        tracing::debug!(action_id = %response.action_id, "action finished");
        return Ok(exit_code_for(&response.outcome));
    }

    match &args.command {
        Command::Installed => {
            let records = service.installed_view().await?;
            render(
                args,
                InventoryReadModel::from_records("Installed software", &records),
            )?;
        }
        Command::List { page, page_size } => {
            let request = PageRequest::new(
                to_u32(*page),
                to_u32(page_size.unwrap_or(config.page_size)),
            );
            let mut page = service.catalog_page(request).await?;
            page.items = Reconciler::not_installed_first(page.items);
            render(args, InventoryReadModel::from_page("Catalog", &page))?;
        }
        Command::Search { keyword, remote } => {
            let hits = if *remote {
                service.search_remote(keyword).await?
            } else {
                service.search_catalog(keyword).await?
            };
            let title = format!("Search results for \"{}\"", keyword);
            render(args, InventoryReadModel::from_records(title, &hits))?;
        }
        Command::Open { name } => {
            let outcome = service.open_by_name(name).await?;
            if let Some(detail) = &outcome.error_detail {
                eprintln!("❌ Could not open {}: {}", name, detail);
            }
            return Ok(exit_code_for(&outcome));
        }
        Command::Export { path } => {
            let records = service.catalog_view().await?;
            let content = serde_json::to_string_pretty(&records)?;
            FileSystemWriter::new(path.clone()).present(&content)?;
            StderrProgressReporter::new().report_completion(&format!(
                "✅ Exported {} catalog entries to {}",
                records.len(),
                path.display()
            ));
        }
        Command::Scan
        | Command::Install { .. }
        | Command::Uninstall { .. }
        | Command::Update { .. } => {}
    }

    Ok(ExitCode::Success)
}

/// Formats a listing and hands it to stdout or the output file
fn render(args: &Args, model: InventoryReadModel) -> Result<()> {
    let formatter = FormatterFactory::create(args.format);
    let formatted_output = formatter.format(&model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.clone()));
    presenter.present(&formatted_output)
}

fn exit_code_for(outcome: &ActionOutcome) -> ExitCode {
    match outcome.status {
        OutcomeStatus::Succeeded => ExitCode::Success,
        OutcomeStatus::Failed => ExitCode::ActionFailed,
        OutcomeStatus::Rejected => ExitCode::ActionRejected,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
