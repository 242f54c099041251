//! # bcosrpc CLI Entry Point
//!
//! Main binary for managing groups and peers on a FISCO BCOS node over
//! JSON-RPC. Each invocation runs exactly one operation.
//!
//! ## Usage
//!
//! ```bash
//! # Create group 2 sealed by two nodes
//! bcosrpc generate-group 2 --sealer <node-id-1> --sealer <node-id-2>
//!
//! # Start, stop, remove and recover a group
//! bcosrpc start-group 2
//! bcosrpc stop-group 2
//! bcosrpc remove-group 2
//! bcosrpc recover-group 2
//!
//! # Print the raw status label (RUNNING, STOPPED, ...)
//! bcosrpc query-group-status 2
//!
//! # Manage p2p connection entries
//! bcosrpc add-peers 127.0.0.1:30300 127.0.0.1:30301
//! bcosrpc erase-peers 127.0.0.1:30301
//!
//! # Invoke any procedure answering with a group envelope
//! bcosrpc call startGroup -a '[2]' --raw
//!
//! # Talk to another node
//! bcosrpc --endpoint http://10.0.0.5:8545 --timeout-ms 5000 query-group-status 1
//! ```
//!
//! ## Output
//!
//! On success the message (or status label) is printed to stdout and the
//! process exits with status 0. On failure the message is printed to stderr
//! and the process exits with status 1. Logs go to stderr and are filtered
//! by `RUST_LOG`.
//!
//! ## Configuration
//!
//! Priority: CLI flag > env var > default.
//! - `--endpoint` / `BCOS_RPC_URL` (default `http://127.0.0.1:8545`)
//! - `--timeout-ms` / `BCOS_RPC_TIMEOUT_MS` (default 30000)

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use argh::FromArgs;
use bcosrpc_cli::args::parse_call_args;
use bcosrpc_cli::settings::resolve_config;
use bcosrpc_client::{ClientConfig, GroupClient, GroupError};
use bcosrpc_common::CallContext;

/// Main CLI structure parsed from command-line arguments.
///
/// Global options come before the subcommand.
#[derive(FromArgs)]
/// bcosrpc - FISCO BCOS group and peer management
struct Cli {
    /// node RPC URL, must start with http://
    #[argh(option, short = 'e')]
    endpoint: Option<String>,

    /// timeout for one HTTP request in milliseconds
    #[argh(option, long = "timeout-ms")]
    timeout_ms: Option<u64>,

    /// overall deadline for the call in milliseconds
    #[argh(option, long = "call-timeout-ms")]
    call_timeout_ms: Option<u64>,

    #[argh(subcommand)]
    command: Commands,
}

/// Available CLI subcommands, one per node operation plus `call`.
#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    GenerateGroup(GenerateGroupArgs),
    StartGroup(StartGroupArgs),
    StopGroup(StopGroupArgs),
    RemoveGroup(RemoveGroupArgs),
    RecoverGroup(RecoverGroupArgs),
    QueryGroupStatus(QueryGroupStatusArgs),
    AddPeers(AddPeersArgs),
    ErasePeers(ErasePeersArgs),
    Call(CallArgs),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "generate-group")]
/// create a group with its sealer list and genesis timestamp
struct GenerateGroupArgs {
    /// id of the group to create
    #[argh(positional)]
    group_id: u32,

    /// node id of a sealer; repeat for each sealer
    #[argh(option, long = "sealer")]
    sealers: Vec<String>,

    /// genesis timestamp in milliseconds (defaults to now)
    #[argh(option)]
    timestamp: Option<i64>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "start-group")]
/// start a group
struct StartGroupArgs {
    /// id of the group
    #[argh(positional)]
    group_id: u32,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "stop-group")]
/// stop a running group
struct StopGroupArgs {
    /// id of the group
    #[argh(positional)]
    group_id: u32,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "remove-group")]
/// delete a group, keeping its data for recovery
struct RemoveGroupArgs {
    /// id of the group
    #[argh(positional)]
    group_id: u32,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "recover-group")]
/// recover a removed group
struct RecoverGroupArgs {
    /// id of the group
    #[argh(positional)]
    group_id: u32,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "query-group-status")]
/// print the raw status label of a group
struct QueryGroupStatusArgs {
    /// id of the group
    #[argh(positional)]
    group_id: u32,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "add-peers")]
/// add p2p connection entries, e.g. 127.0.0.1:30300
struct AddPeersArgs {
    /// peer addresses
    #[argh(positional)]
    peers: Vec<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "erase-peers")]
/// remove p2p connection entries
struct ErasePeersArgs {
    /// peer addresses
    #[argh(positional)]
    peers: Vec<String>,
}

/// Arguments for invoking an arbitrary procedure.
///
/// # Example
///
/// ```bash
/// bcosrpc call generateGroup -a '[2, {"timestamp": "1700000000", "sealers": ["n1"]}]'
/// ```
#[derive(FromArgs)]
#[argh(subcommand, name = "call")]
/// invoke a procedure by name
struct CallArgs {
    /// name of the remote procedure
    #[argh(positional)]
    procedure: String,

    /// positional arguments as a JSON array
    #[argh(option, short = 'a', long = "args", default = "\"[]\".into()")]
    args: String,

    /// print the decoded envelope as JSON instead of the message
    #[argh(switch)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli: Cli = argh::from_env();

    // Logs go to stderr so stdout only carries the result
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(
        cli.endpoint,
        cli.timeout_ms,
        cli.call_timeout_ms,
        ClientConfig::from_env()?,
    )?;
    tracing::debug!(endpoint = %config.endpoint, "Using node endpoint");

    // The configured call timeout is applied by the client on every call
    let client = GroupClient::connect(&config)?;

    match run(&client, &CallContext::background(), cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            match err.downcast_ref::<GroupError>() {
                Some(group_err) => eprintln!("{}", group_err.message()),
                None => eprintln!("Error: {:#}", err),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(client: &GroupClient, ctx: &CallContext, command: Commands) -> Result<String> {
    let output = match command {
        Commands::GenerateGroup(args) => {
            let timestamp = match args.timestamp {
                Some(timestamp) => timestamp,
                None => now_millis()?,
            };
            client
                .generate_group(ctx, args.group_id, &args.sealers, timestamp)
                .await?
        }
        Commands::StartGroup(args) => client.start_group(ctx, args.group_id).await?,
        Commands::StopGroup(args) => client.stop_group(ctx, args.group_id).await?,
        Commands::RemoveGroup(args) => client.remove_group(ctx, args.group_id).await?,
        Commands::RecoverGroup(args) => client.recover_group(ctx, args.group_id).await?,
        Commands::QueryGroupStatus(args) => {
            client.query_group_status(ctx, args.group_id).await?
        }
        Commands::AddPeers(args) => client.add_peers(ctx, &args.peers).await?,
        Commands::ErasePeers(args) => client.erase_peers(ctx, &args.peers).await?,
        Commands::Call(args) => run_call(client, ctx, args).await?,
    };

    Ok(output)
}

async fn run_call(client: &GroupClient, ctx: &CallContext, args: CallArgs) -> Result<String> {
    let call_args = parse_call_args(&args.args)?;

    if args.raw {
        let envelope = client
            .call(ctx, &args.procedure, &call_args)
            .await
            .map_err(GroupError::from)?;
        return Ok(serde_json::to_string(&envelope)?);
    }

    Ok(client.invoke(ctx, &args.procedure, &call_args).await?)
}

fn now_millis() -> Result<i64> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(i64::try_from(elapsed.as_millis())?)
}
