mod summary;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use plan_drawing::parse_drawing;
use plan_sync::{ApiClient, FileStore, PersistenceBridge, PlanPayload, ReqwestTransport, SyncConfig, SyncError};
use plan_viewport3d::{MassingBox, ProjectSpec};
use serde_json::json;
use tracing::info;

use crate::summary::DrawingSummary;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("drawing parse failed: {0}")]
    Parse(#[from] plan_drawing::ParseError),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[derive(Parser, Debug)]
#[command(name = "planview", about = "Floor-plan drawing, plan edit, and massing tool")]
struct Cli {
    /// Explicit API base, tried before the same-origin and local defaults.
    #[arg(long, env = "PLAN_API_BASE", global = true)]
    api_base: Option<String>,

    /// Directory of the local fallback store.
    #[arg(long, env = "PLAN_STORE_DIR", global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a drawing and summarise its layers, types, grid, and skipped elements.
    Inspect {
        file: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load or save plan edits for a run.
    Plan(PlanCommand),
    /// Print the massing box derived from project parameters as JSON.
    Massing(MassingArgs),
}

#[derive(Args, Debug)]
struct PlanCommand {
    #[command(subcommand)]
    command: PlanSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlanSubcommand {
    /// Load a run's edits (remote first, then the local store) and print them.
    Pull {
        #[arg(long)]
        run: String,
    },
    /// Save edits from a `{ "payload": { "elements": [...] } }` file.
    Push {
        #[arg(long)]
        run: Option<String>,
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct MassingArgs {
    #[arg(long, default_value = "")]
    floors: String,
    #[arg(long, default_value = "")]
    gfa: String,
    #[arg(long, default_value = "")]
    building_type: String,
    #[arg(long, default_value = "")]
    region: String,
    /// Core share in percent.
    #[arg(long, default_value = "")]
    core_ratio: String,
    #[arg(long, default_value_t = plan_viewport3d::config::DEFAULT_FLOOR_HEIGHT)]
    floor_height: f64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = SyncConfig::from_env();
    if cli.api_base.is_some() {
        config.api_base = cli.api_base;
    }
    if let Some(dir) = cli.store_dir {
        config.store_dir = dir;
    }

    match cli.command {
        Command::Inspect { file, json } => run_inspect(&file, json),
        Command::Plan(plan) => run_plan(&config, plan).await,
        Command::Massing(args) => run_massing(&args),
    }
}

fn run_inspect(file: &Path, as_json: bool) -> Result<(), CliError> {
    let text = read(file)?;
    let drawing = parse_drawing(&text)?;
    let summary = DrawingSummary::from_drawing(&drawing);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.to_text());
    }
    Ok(())
}

async fn run_plan(config: &SyncConfig, plan: PlanCommand) -> Result<(), CliError> {
    let bridge = bridge(config)?;
    match plan.command {
        PlanSubcommand::Pull { run } => {
            let loaded = bridge.load_now(Some(&run)).await?;
            info!(run_id = %run, source = ?loaded.source, count = loaded.elements.len(), "plan pulled");
            println!("{}", serde_json::to_string_pretty(&PlanPayload::new(loaded.elements))?);
        }
        PlanSubcommand::Push { run, file } => {
            let payload: PlanPayload = serde_json::from_str(&read(&file)?)?;
            let elements = payload.into_elements();
            let outcome = bridge.save(run.as_deref(), &elements).await?;
            println!("{}", json!({ "outcome": format!("{outcome:?}"), "elements": elements.len() }));
        }
    }
    Ok(())
}

fn run_massing(args: &MassingArgs) -> Result<(), CliError> {
    let project = ProjectSpec {
        building_type: args.building_type.clone(),
        region: args.region.clone(),
        floors: args.floors.clone(),
        gfa: args.gfa.clone(),
        core_ratio: args.core_ratio.clone(),
    };
    let massing = MassingBox::from_project(&project, args.floor_height);
    let out = json!({ "massing": massing, "core": massing.core(), "floor_count": massing.floor_count() });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn bridge(config: &SyncConfig) -> Result<PersistenceBridge, CliError> {
    let transport = Arc::new(ReqwestTransport::new(config.request_timeout())?);
    let api = Arc::new(ApiClient::new(transport, config.candidate_bases()));
    let store = Arc::new(FileStore::new(config.store_dir.clone()));
    Ok(PersistenceBridge::new(api, store))
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}
