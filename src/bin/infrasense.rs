//! InfraSense 命令行前端
//!
//! 用编辑器脚本（或原始 JSON）描述拓扑，提交给后端校验/分析，并打印结果面板。

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use infrasense::api::{ApiClient, ApiError, ClientConfig, DEFAULT_BASE_URL};
use infrasense::app::{Action, App};
use infrasense::topo::{
    AllHostPairs, ScriptError, TopologyBuilder, TopologyInputError, TopologyPayload,
    parse_script, parse_topology_json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "infrasense",
    about = "Topology validation & network analysis client"
)]
struct Args {
    /// Backend base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    backend: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print the request payload built from the input
    Payload(InputArgs),
    /// Submit the topology to /topology/validate
    Validate(SubmitArgs),
    /// Submit the topology to /analyze, then /suggest-fix
    Analyze(SubmitArgs),
}

#[derive(Debug, clap::Args)]
struct InputArgs {
    /// Builder script; read from stdin when neither --script nor --json is given
    #[arg(long, conflicts_with = "json")]
    script: Option<PathBuf>,

    /// Raw topology JSON ({nodes, links, flows})
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
struct SubmitArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format for the rendered panels
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// 提交给后端的拓扑：编辑器生成的，或 `--json` 原样转发的
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Topology {
    Built(TopologyPayload),
    Raw(Value),
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Script(#[from] ScriptError),
    #[error("{0}")]
    Input(#[from] TopologyInputError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化 tracing（写到 stderr，stdout 只留结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let (action, submit) = match args.cmd {
        Cmd::Payload(input) => {
            let payload = load_payload(&input)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }
        Cmd::Validate(submit) => (Action::Validate, submit),
        Cmd::Analyze(submit) => (Action::Analyze, submit),
    };

    let payload = load_payload(&submit.input)?;
    let client = ApiClient::new(ClientConfig {
        base_url: args.backend,
    })?;
    info!(backend = client.base_url(), ?action, "提交拓扑");

    let mut app = App::new(client);
    app.run(action, &payload).await?;

    let view = app.view();
    match submit.format {
        Format::Text => print!("{view}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn load_payload(input: &InputArgs) -> Result<Topology, CliError> {
    if let Some(path) = &input.json {
        let text = read_file(path)?;
        return Ok(Topology::Raw(parse_topology_json(&text)?));
    }

    let text = match &input.script {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            buf
        }
    };

    let mut builder = TopologyBuilder::new();
    builder.apply_all(parse_script(&text)?);

    info!(
        nodes = builder.nodes().len(),
        links = builder.links().len(),
        rate = builder.displayed_rate(),
        "拓扑构建完成"
    );
    if builder.rate_capped() {
        warn!(
            "⚠ Rate capped to link bandwidth ({} Mbps)",
            builder.min_link_bw()
        );
    }
    Ok(Topology::Built(builder.payload(&AllHostPairs)))
}

fn read_file(path: &PathBuf) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}
