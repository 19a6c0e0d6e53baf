//! custody: command-line client for the evidence custody API.
//!
//! Every command runs as one actor with an explicit role. The role decides
//! what the actor may submit, see and decide; the API server itself does not
//! enforce any of it.

mod output;

use anyhow::Context;
use clap::Parser;
use custody_api::{ClientConfig, HttpCustodyApi};
use custody_lifecycle::{
    unique_case_ids, AccessRequestForm, EvidenceQuery, EvidenceSubmission, LifecycleManager,
    Session,
};
use custody_types::{ContentHash, Decision, EvidenceId, RequestId, RequestType};
use custody_utils::LogFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "custody", about = "Evidence custody client")]
struct Cli {
    /// Acting user id.
    #[arg(long, env = "CUSTODY_ACTOR_ID")]
    actor_id: String,

    /// Acting role: investigator, analyst, prosecutor, judge or admin.
    #[arg(long, env = "CUSTODY_ROLE")]
    role: String,

    /// Display name (defaults to the actor id).
    #[arg(long)]
    name: Option<String>,

    /// Base URL of the custody API.
    #[arg(long, env = "CUSTODY_API_BASE")]
    api_base: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CUSTODY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CUSTODY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Print results as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CUSTODY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Evidence records.
    Evidence {
        #[command(subcommand)]
        action: EvidenceAction,
    },
    /// Access requests.
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Dashboard counters for the acting role.
    Stats,
    /// Show the acting user and what the role allows.
    Whoami,
}

#[derive(clap::Subcommand)]
enum EvidenceAction {
    /// List evidence, optionally filtered.
    List {
        /// Case-insensitive match on filename, description or case id.
        #[arg(long)]
        search: Option<String>,
        /// Exact case id.
        #[arg(long = "case")]
        case_id: Option<String>,
    },
    /// Submit a new evidence record.
    Submit(SubmitArgs),
    /// List the distinct case ids.
    Cases,
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// File to fingerprint. Sets hash, size and filename unless given explicitly.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long = "case")]
    case_id: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    filename: Option<String>,
    /// Hex SHA-256 of the file contents.
    #[arg(long)]
    hash: Option<String>,
    #[arg(long)]
    size: Option<u64>,
    /// Required, e.g. "image/jpeg".
    #[arg(long)]
    mime_type: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    ipfs_cid: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    tags: Option<String>,
}

#[derive(clap::Subcommand)]
enum RequestAction {
    /// List the requests visible to the acting user.
    List,
    /// Request access to an evidence record or a whole case.
    Create {
        #[arg(long)]
        evidence: Option<String>,
        #[arg(long = "case")]
        case_id: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        justification: Option<String>,
        /// analysis, testing or report.
        #[arg(long = "type", default_value = "analysis")]
        request_type: RequestType,
    },
    /// Approve a pending request.
    Approve { id: String },
    /// Deny a pending request.
    Deny { id: String },
}

/// Load the optional config file and overlay flags and env vars on it.
fn resolve_config(cli: &Cli) -> ClientConfig {
    let mut config = match &cli.config {
        Some(path) => match ClientConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "warning: failed to load config {}: {e}, using defaults",
                    path.display()
                );
                ClientConfig::default()
            }
        },
        None => ClientConfig::default(),
    };
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format.to_string();
    }
    config
}

/// Fill hash, size and filename from `--file` where not given explicitly.
async fn build_submission(args: SubmitArgs) -> anyhow::Result<EvidenceSubmission> {
    let mut hash = args.hash;
    let mut size = args.size;
    let mut filename = args.filename;

    if let Some(path) = &args.file {
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        hash.get_or_insert_with(|| ContentHash::of_bytes(&contents).to_string());
        size.get_or_insert(contents.len() as u64);
        if filename.is_none() {
            filename = file_name(path);
        }
    }

    Ok(EvidenceSubmission {
        case_id: args.case_id,
        description: args.description,
        original_filename: filename,
        hash,
        file_size: size,
        mime_type: args.mime_type,
        location: args.location,
        ipfs_cid: args.ipfs_cid,
        tags: args.tags,
    })
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn print<T: Serialize>(json: bool, value: &T, table: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", table());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let log_format = config.log_format.parse::<LogFormat>().unwrap_or_else(|e| {
        eprintln!("warning: {e}, using human");
        LogFormat::Human
    });
    custody_utils::init_logging(log_format, &config.log_level);

    let session = Session::login(&cli.actor_id, &cli.role, cli.name.as_deref())?;
    let actor = session.actor().clone();

    if let Command::Whoami = cli.command {
        return print(cli.json, &session.capabilities(), || {
            output::whoami(&actor, session.capabilities())
        });
    }

    let api = HttpCustodyApi::from_config(&config)?;
    tracing::debug!(api = api.base_url(), "using custody API");
    let mut manager = LifecycleManager::new(api);
    manager
        .refresh()
        .await
        .context("failed to load evidence and access requests")?;

    match cli.command {
        Command::Evidence { action } => match action {
            EvidenceAction::List { search, case_id } => {
                let query = EvidenceQuery { search, case_id };
                let records = query.filter(&manager.snapshot().evidence);
                print(cli.json, &records, || output::evidence_table(&records))?;
            }
            EvidenceAction::Submit(args) => {
                let submission = build_submission(args).await?;
                let record = manager.submit_evidence(&actor, submission).await?;
                print(cli.json, &record, || {
                    format!("submitted {} ({})\n", record.id, record.hash)
                })?;
            }
            EvidenceAction::Cases => {
                let cases = unique_case_ids(&manager.snapshot().evidence);
                print(cli.json, &cases, || {
                    cases.iter().map(|c| format!("{c}\n")).collect()
                })?;
            }
        },
        Command::Requests { action } => match action {
            RequestAction::List => {
                let visible = manager.visible_requests_with_evidence(&actor);
                let requests: Vec<_> = visible.iter().map(|v| v.request).collect();
                print(cli.json, &requests, || output::request_table(&visible))?;
            }
            RequestAction::Create {
                evidence,
                case_id,
                reason,
                justification,
                request_type,
            } => {
                let form = AccessRequestForm {
                    evidence_id: evidence.map(EvidenceId::new),
                    case_id,
                    reason,
                    justification,
                    request_type: Some(request_type),
                };
                let request = manager.request_access(&actor, form).await?;
                print(cli.json, &request, || format!("requested {}\n", request.id))?;
            }
            RequestAction::Approve { id } => {
                decide(&mut manager, &actor, id, Decision::Approved, cli.json).await?
            }
            RequestAction::Deny { id } => {
                decide(&mut manager, &actor, id, Decision::Denied, cli.json).await?
            }
        },
        Command::Stats => {
            let stats = manager.stats(&actor);
            print(cli.json, &stats, || output::stats_table(&stats))?;
        }
        Command::Whoami => {}
    }

    session.logout();
    Ok(())
}

async fn decide(
    manager: &mut LifecycleManager<HttpCustodyApi>,
    actor: &custody_types::Actor,
    id: String,
    decision: Decision,
    json: bool,
) -> anyhow::Result<()> {
    let id = RequestId::new(id);
    let request = manager.decide(actor, &id, decision).await?;
    print(json, &request, || format!("{} {}\n", request.status, request.id))
}
