use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use bondmcp_http::{
    credentials::{CredentialResolver, CredentialSource, KeyPrompt},
    types::{
        AskRequest, InteractionCheckRequest, LabInterpretRequest, SupplementRecommendRequest,
    },
    BondMcpClient, ClientOptions, JsonMap, BASE_URL_ENV, DEFAULT_BASE_URL,
};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// bondmcp - BondMCP public API CLI
///
/// The API key is taken from BONDMCP_PUBLIC_API_KEY, then from ~/.bondmcp_cli.
/// If neither has one, you are prompted and the key is saved for later runs.
///
/// Examples:
///   bondmcp health
///   bondmcp ask "What raises HDL cholesterol?"
///   bondmcp labs-interpret labs.json --context patient.json
#[derive(Parser, Debug)]
#[command(name = "bondmcp", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(
        long,
        env = BASE_URL_ENV,
        default_value = DEFAULT_BASE_URL,
        value_name = "URL",
        global = true
    )]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value_t = 30,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    timeout: u64,

    /// Retries for rate-limited (HTTP 429) responses
    #[arg(long, default_value_t = 0, value_name = "N", global = true)]
    max_retries: usize,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a question to the /ask endpoint
    Ask(AskArgs),

    /// Interpret lab results via /labs/interpret
    LabsInterpret(LabsInterpretArgs),

    /// Get supplement recommendations via /supplement/recommend
    SupplementRecommend(SupplementRecommendArgs),

    /// Check supplement and medication interactions via /supplement/interactions
    Interactions(InteractionsArgs),

    /// Check API health via /health
    Health,
}

#[derive(clap::Args, Debug)]
struct AskArgs {
    /// The health question
    query: String,

    /// Continue an existing conversation
    #[arg(long, value_name = "ID")]
    conversation_id: Option<String>,
}

#[derive(clap::Args, Debug)]
struct LabsInterpretArgs {
    /// JSON file with lab results
    #[arg(value_name = "FILE")]
    labs: PathBuf,

    /// Optional JSON file with patient context information
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct SupplementRecommendArgs {
    /// Health goals, e.g. "sleep" "energy"
    #[arg(value_name = "GOAL")]
    health_goals: Vec<String>,

    /// JSON file with current lab results
    #[arg(long, value_name = "FILE")]
    labs: Option<PathBuf>,

    /// JSON file with a list of current supplements
    #[arg(long, value_name = "FILE")]
    current_supplements: Option<PathBuf>,

    /// JSON file with dietary restrictions
    #[arg(long, value_name = "FILE")]
    dietary_restrictions: Option<PathBuf>,

    /// Optional JSON file with patient context
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct InteractionsArgs {
    /// Supplements to check
    #[arg(value_name = "SUPPLEMENT", required = true)]
    supplements: Vec<String>,

    /// Medication taken alongside (repeatable)
    #[arg(long = "medication", value_name = "NAME")]
    medications: Vec<String>,
}

/// Hidden terminal prompt.
struct TerminalPrompt;

impl KeyPrompt for TerminalPrompt {
    fn prompt_api_key(&self) -> io::Result<String> {
        rpassword::prompt_password("Enter your BondMCP public API key: ")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// A subcommand with its input files already loaded.
enum Call {
    Ask(AskRequest),
    LabsInterpret(LabInterpretRequest),
    SupplementRecommend(SupplementRecommendRequest),
    Interactions(InteractionCheckRequest),
    Health,
}

impl Call {
    fn prepare(command: Commands) -> Result<Self> {
        let call = match command {
            Commands::Ask(args) => {
                let mut request = AskRequest::new(args.query);
                request.conversation_id = args.conversation_id;
                Self::Ask(request)
            }
            Commands::LabsInterpret(args) => {
                let mut request = LabInterpretRequest::new(read_json_file(&args.labs)?);
                request.patient_context = read_optional_json(args.context.as_deref())?;
                Self::LabsInterpret(request)
            }
            Commands::SupplementRecommend(args) => {
                Self::SupplementRecommend(SupplementRecommendRequest {
                    current_labs: read_optional_json(args.labs.as_deref())?,
                    current_supplements: read_optional_json(args.current_supplements.as_deref())?,
                    dietary_restrictions: read_optional_json(
                        args.dietary_restrictions.as_deref(),
                    )?,
                    patient_context: read_optional_json(args.context.as_deref())?,
                    ..SupplementRecommendRequest::new(args.health_goals)
                })
            }
            Commands::Interactions(args) => Self::Interactions(InteractionCheckRequest {
                supplements: args.supplements,
                medications: (!args.medications.is_empty()).then_some(args.medications),
            }),
            Commands::Health => Self::Health,
        };
        Ok(call)
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Input files are checked before any prompt for a key.
    let call = Call::prepare(cli.command)?;

    let key = CredentialResolver::from_environment()
        .resolve(&TerminalPrompt)
        .context("could not obtain an API key")?;
    if key.source == CredentialSource::Prompt && key.persisted {
        tracing::info!("API key saved for future invocations");
    }

    let client = BondMcpClient::new(&cli.base_url, &key.api_key).with_options(ClientOptions {
        timeout_ms: cli.timeout.saturating_mul(1_000),
        max_retries: cli.max_retries,
        ..ClientOptions::default()
    });
    tracing::debug!(?client, "client configured");

    match call {
        Call::Ask(request) => print_answer(&client.ask().query(&request).await?),
        Call::LabsInterpret(request) => print_json(&client.labs().interpret(&request).await?),
        Call::SupplementRecommend(request) => {
            print_json(&client.supplements().recommend(&request).await?)
        }
        Call::Interactions(request) => {
            print_json(&client.supplements().check_interactions(&request).await?)
        }
        Call::Health => print_json(&client.health().check().await?),
    }
}

fn read_json_file(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_optional_json(path: Option<&Path>) -> Result<Option<Value>> {
    path.map(read_json_file).transpose()
}

/// Prints the answer text of an `/ask` response, or the whole body if it has none.
fn print_answer(response: &JsonMap) -> Result<()> {
    match answer_text(response) {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => print_json(response),
    }
}

fn answer_text(response: &JsonMap) -> Option<&str> {
    ["response", "answer"]
        .iter()
        .find_map(|field| response.get(*field).and_then(Value::as_str))
}

fn print_json(response: &JsonMap) -> Result<()> {
    let rendered = serde_json::to_string_pretty(response)?;
    println!("{rendered}");
    Ok(())
}
