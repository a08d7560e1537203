use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::browser::open_in_browser;
use crate::models::SessionState;
use crate::session::{
    ChannelReporter, Notify, ProjectSearch, SearchSession, SearchSource, ServiceSearch,
    dashboard_url,
};
use crate::sources::{ONBOARDING_TEXT, ProjectStore, ServiceCatalog};
use crate::tui::run_interactive;
use crate::utils::{init_tracing, sanitize_for_display};

#[derive(Parser)]
#[command(name = "gcp-shortcuts")]
#[command(version)]
#[command(
    about = "Search saved Google Cloud projects and open their Cloud Console pages",
    long_about = None
)]
pub struct Cli {
    /// Append logs to this file (RUST_LOG controls the level)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved projects whose ID contains QUERY (case-sensitive)
    Projects { query: Option<String> },
    /// List Cloud Console pages for PROJECT whose name contains QUERY
    Services {
        project: String,
        query: Option<String>,
        /// JSON catalog to use instead of the bundled one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
    /// Open the project dashboard, or the first page matching --service
    Open {
        project: String,
        #[arg(long, value_name = "QUERY")]
        service: Option<String>,
        /// JSON catalog to use instead of the bundled one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.command.is_none())?;

    match cli.command {
        None => run_interactive(ProjectStore::default_location()?),
        Some(Commands::Projects { query }) => {
            let store = ProjectStore::default_location()?;
            write_projects(&mut io::stdout().lock(), store, query.as_deref().unwrap_or(""))
        }
        Some(Commands::Services { project, query, catalog }) => {
            let source = service_search(project, catalog.as_deref())?;
            write_services(&mut io::stdout().lock(), source, query.as_deref().unwrap_or(""))
        }
        Some(Commands::Open { project, service, catalog }) => {
            let source = service_search(project, catalog.as_deref())?;
            let url = resolve_open_target(source, service.as_deref())?;
            open_in_browser(&url)?;
            info!(url = %url, "opened in browser");
            println!("Opened {}", url);
            Ok(())
        }
    }
}

fn service_search(project: String, catalog: Option<&Path>) -> Result<ServiceSearch> {
    match catalog {
        Some(path) => {
            let catalog = ServiceCatalog::from_file(path)?;
            Ok(ServiceSearch::with_catalog(project, Arc::new(catalog)))
        }
        None => Ok(ServiceSearch::new(project)),
    }
}

/// Run one query to completion on a fresh session
///
/// A reported failure becomes the returned error, so subcommands exit non-zero.
fn search_once(source: Arc<dyn SearchSource>, query: &str) -> Result<SessionState> {
    let (reporter, failures) = ChannelReporter::new();
    let notify: Notify = Arc::new(|| {});
    let session = SearchSession::new(source, Arc::new(reporter), notify);

    session.submit(query).wait()?;
    if let Ok(report) = failures.try_recv() {
        bail!("{}", report);
    }

    Ok(session.state())
}

fn write_results<W: Write>(out: &mut W, state: &SessionState) -> Result<()> {
    for result in &state.results {
        writeln!(
            out,
            "{}\t{}",
            sanitize_for_display(&result.name),
            sanitize_for_display(&result.url)
        )
        .context("Failed to write results")?;
    }
    Ok(())
}

fn write_projects<W: Write>(out: &mut W, store: ProjectStore, query: &str) -> Result<()> {
    let state = search_once(Arc::new(ProjectSearch::new(store)), query)?;

    if !state.has_source_file {
        write!(out, "{}", ONBOARDING_TEXT).context("Failed to write onboarding text")?;
        return Ok(());
    }
    write_results(out, &state)
}

fn write_services<W: Write>(out: &mut W, source: ServiceSearch, query: &str) -> Result<()> {
    let state = search_once(Arc::new(source), query)?;
    write_results(out, &state)
}

/// URL that `open` should launch
fn resolve_open_target(source: ServiceSearch, service: Option<&str>) -> Result<String> {
    let Some(query) = service else {
        return Ok(dashboard_url(source.project()));
    };

    let project = source.project().to_string();
    let state = search_once(Arc::new(source), query)?;
    match state.results.into_iter().next() {
        Some(result) => Ok(result.url),
        None => bail!("No service matching '{}' for project {}", query, project),
    }
}
