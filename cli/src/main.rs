use std::path::{Path, PathBuf};
use std::sync::Arc;

use canvas::doc::DocStore;
use clap::{Args, Parser, Subcommand};
use metamorph::catalog::{CatalogError, UiElementCatalog};
use metamorph::detect::DetectError;
use metamorph::detect::config::{ConfigError, DEFAULT_ENDPOINT};
use metamorph::detect::types::parse_screen;
use metamorph::{
    ArtboardRenderer, CommandOutcome, DetectConfig, DetectionClient, ErrorKind, PluginCommand, RenderError,
};
use tracing::{Level, debug, info, warn};

mod host;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use host::{PathPicker, StderrDialogs, write_snapshot};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("placeholder catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("wireframe generation failed ({0:?})")]
    CommandFailed(ErrorKind),
}

#[derive(Parser, Debug)]
#[command(name = "metamorph", about = "Turn lo-fi UI sketches into wireframe artboards")]
struct Cli {
    #[arg(long, env = "METAMORPH_LOG_LEVEL", default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a sketch to the detection service and render the result.
    Detect(DetectArgs),
    /// Render a saved detection response without calling the service.
    Render(RenderArgs),
    /// List the placeholder catalog.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Directory holding `<element>.png` placeholders; built-in sizes when absent.
    #[arg(long, env = "METAMORPH_ASSETS_DIR")]
    assets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// Sketch image (png/jpg). Prompted for on stdin when omitted.
    image: Option<PathBuf>,

    #[arg(long, env = "METAMORPH_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Drop detections below this probability, in (0, 1).
    #[arg(long, env = "METAMORPH_MIN_PROBABILITY")]
    min_probability: Option<f64>,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Write the document JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON file holding one detection response.
    screen: PathBuf,

    /// Artboard width; the screen's own width when absent.
    #[arg(long)]
    width: Option<f64>,

    /// Artboard height; the screen's own height when absent.
    #[arg(long)]
    height: Option<f64>,

    #[command(flatten)]
    catalog: CatalogArgs,

    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    match cli.command {
        Command::Detect(args) => run_detect(args).await,
        Command::Render(args) => run_render(args).await,
        Command::Catalog(args) => run_catalog(&args),
    }
}

fn load_catalog(args: &CatalogArgs) -> Result<UiElementCatalog, CliError> {
    match &args.assets {
        Some(dir) => {
            let catalog = UiElementCatalog::load_dir(dir)?;
            info!(dir = %dir.display(), assets = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(UiElementCatalog::builtin()),
    }
}

async fn run_detect(args: DetectArgs) -> Result<(), CliError> {
    let config = DetectConfig::new(&args.endpoint, args.min_probability)?;
    let catalog = Arc::new(load_catalog(&args.catalog)?);
    let detector = Arc::new(DetectionClient::new(config)?);
    let command =
        PluginCommand::new(Arc::new(PathPicker::new(args.image)), detector, catalog, Arc::new(StderrDialogs));

    let mut doc = DocStore::new();
    match command.run(&mut doc).await {
        CommandOutcome::Cancelled => Ok(()),
        CommandOutcome::Rendered(_) => write_snapshot(&doc, args.out.as_deref()),
        CommandOutcome::Failed(kind) => {
            if !doc.artboards().is_empty() {
                write_snapshot(&doc, args.out.as_deref())?;
            }
            Err(CliError::CommandFailed(kind))
        }
    }
}

async fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let body = tokio::fs::read_to_string(&args.screen).await?;
    let screen = parse_screen(&body)?;
    let renderer = ArtboardRenderer::new(Arc::new(load_catalog(&args.catalog)?));

    let mut doc = DocStore::new();
    let width = args.width.unwrap_or(screen.width);
    let height = args.height.unwrap_or(screen.height);
    renderer.render(&mut doc, width, height, &screen)?;
    write_snapshot(&doc, args.out.as_deref())
}

fn run_catalog(args: &CatalogArgs) -> Result<(), CliError> {
    let catalog = load_catalog(args)?;
    println!("{}", format_catalog(&catalog, args.assets.as_deref()));
    Ok(())
}

fn format_catalog(catalog: &UiElementCatalog, assets: Option<&Path>) -> String {
    let source = assets.map_or_else(|| "built-in".to_owned(), |dir| dir.display().to_string());
    let mut lines = vec![format!("# {} placeholders ({source})", catalog.len())];
    lines.extend(
        catalog
            .iter()
            .map(|asset| format!("{:<24} {}x{}", asset.name, asset.natural_width, asset.natural_height)),
    );
    lines.join("\n")
}
