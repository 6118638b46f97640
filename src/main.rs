//! Service-mesh demo services.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────┐
//!  Client ──────────▶ │ proxy-server                 │
//!                     │  path → base URL + path      │ ──GET──▶ web-server / static file
//!  Client ◀────────── │  "Proxying reply: … Took N"  │ ◀──────
//!                     └──────────────────────────────┘
//!
//!                     ┌──────────────────────────────┐
//!  Client ──────────▶ │ web-server                   │
//!  Client ◀────────── │  "<content> requested from   │
//!                     │   <path> on <host> with code"│
//!                     └──────────────────────────────┘
//! ```
//!
//! Each subcommand runs one service in its own process. Configuration comes
//! from environment variables, optionally layered over a TOML file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mesh_demo::config::{load_config, ObservabilityConfig, ServiceConfig};
use mesh_demo::lifecycle::Shutdown;
use mesh_demo::net::{advertised_ip, bind};
use mesh_demo::observability::init_logging;
use mesh_demo::{EchoConfig, HttpServer, ProxyConfig};

#[derive(Parser)]
#[command(name = "mesh-demo", version)]
#[command(about = "Demo services for service-mesh traffic routing", long_about = None)]
struct Cli {
    /// Optional TOML file; environment variables override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Echo responder with failure injection on /failsometimes
    WebServer,
    /// Forwarding proxy to PROXY_URL_TO_SERVE
    ProxyServer,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::WebServer => run_web_server(cli.config).await,
        Commands::ProxyServer => run_proxy_server(cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Error while trying to create server");
            ExitCode::FAILURE
        }
    }
}

async fn run_web_server(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config: EchoConfig = load(path)?;
    init_logging(&config.observability);

    tracing::info!(
        port = config.listener.port,
        content = %config.content,
        failure_path = %config.failure.path,
        failure_one_in = config.failure.one_in,
        "Configuration loaded"
    );

    let listener = bind(&config.listener).await?;
    let server = HttpServer::echo(&config);
    serve("Web Server", server, listener).await
}

async fn run_proxy_server(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config: ProxyConfig = load(path)?;
    init_logging(&config.observability);

    tracing::info!(
        port = config.listener.port,
        upstream_url = %config.upstream_url,
        upstream_timeout_secs = ?config.upstream_timeout_secs,
        upstream_failure_status = ?config.upstream_failure_status,
        "Configuration loaded"
    );

    let listener = bind(&config.listener).await?;
    let server = HttpServer::proxy(&config);
    serve("Proxy Server", server, listener).await
}

fn load<C: ServiceConfig>(path: Option<PathBuf>) -> Result<C, Box<dyn std::error::Error>> {
    match load_config(path.as_deref()) {
        Ok(config) => Ok(config),
        Err(e) => {
            // Logging is not up yet; use the default formatter for this one.
            init_logging(&ObservabilityConfig::default());
            Err(e.into())
        }
    }
}

async fn serve(
    label: &str,
    server: HttpServer,
    listener: tokio::net::TcpListener,
) -> Result<(), Box<dyn std::error::Error>> {
    let port = listener.local_addr()?.port();
    let advertised = SocketAddr::new(advertised_ip().await, port);
    tracing::info!("{} is listening on http://{}", label, advertised);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
