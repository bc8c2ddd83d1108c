use std::{process::ExitCode, time::Duration};

use agentcore_a2a::{
    config::{
        agentcore_runtime_url, RuntimeSettings, ServerEnv, DEFAULT_MESSAGE, DEFAULT_REGION,
        DEFAULT_RUNTIME_URL,
    },
    invoke,
    server::{self, AppState},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "agentcore-a2a")]
#[command(about = "Talk to A2A agents hosted on an AgentCore runtime", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send one message to an agent and print its reply
    Send {
        #[arg(short, long, default_value = DEFAULT_MESSAGE)]
        message: String,

        /// Agent runtime URL
        #[arg(long, env = "AGENTCORE_RUNTIME_URL", default_value = DEFAULT_RUNTIME_URL)]
        url: String,

        /// Bearer token for the runtime
        #[arg(long, env = "BEARER_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Seconds to wait for the whole exchange
        #[arg(long, default_value_t = 300)]
        timeout: u64,

        /// Read the reply as server-sent events
        #[arg(long)]
        stream: bool,
    },

    /// Fetch and print the agent card of an AgentCore runtime
    Card {
        /// ARN of the agent runtime
        #[arg(long, env = "AGENT_ARN")]
        agent_arn: String,

        #[arg(long, env = "BEARER_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
        region: String,
    },

    /// Serve the entrypoint and proxy routes over HTTP
    Serve {
        /// Address to listen on, overriding BIND_ADDRESS
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            message,
            url,
            token,
            timeout,
            stream,
        } => {
            init_tracing("warn");
            let settings = match RuntimeSettings::new(Some(&url), token.as_deref()) {
                Ok(settings) => settings
                    .with_timeout(Duration::from_secs(timeout))
                    .with_streaming(stream),
                Err(e) => return Ok(report(e)),
            };

            match invoke::send_message(&settings, &message).await {
                Ok(text) => {
                    println!("Agent response:\n {}", text);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => Ok(report(e)),
            }
        }

        Commands::Card {
            agent_arn,
            token,
            region,
        } => {
            init_tracing("warn");
            let settings = match agentcore_runtime_url(&region, &agent_arn)
                .and_then(|url| RuntimeSettings::new(Some(url.as_str()), token.as_deref()))
            {
                Ok(settings) => settings,
                Err(e) => return Ok(report(e)),
            };

            match invoke::fetch_card(&settings).await {
                Ok(card) => {
                    let pretty =
                        serde_json::to_string_pretty(&card).context("Failed to render agent card")?;
                    println!("{}", pretty);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => Ok(report(e)),
            }
        }

        Commands::Serve { bind } => {
            init_tracing("info");
            let env = ServerEnv::from_env().context("Failed to read server environment")?;
            let bind = bind.unwrap_or_else(|| env.bind_address.clone());

            server::serve(&bind, AppState::from_env(&env))
                .await
                .with_context(|| format!("Server error on {}", bind))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(error: impl std::fmt::Display) -> ExitCode {
    eprintln!("Error: {}", error);
    ExitCode::FAILURE
}
