//! confhub-api - Conference and speaker record service
//!
//! Loads configuration once at startup, opens the SQLite store, and serves
//! the conference/speaker HTTP API until Ctrl-C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use confhub_api::{build_router, AppState};
use confhub_common::config::{self, CliOverrides, Config, TomlConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for confhub-api
#[derive(Parser, Debug)]
#[command(name = "confhub-api")]
#[command(about = "Conference and speaker management API")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = config::ENV_CONFIG_FILE)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = config::ENV_DATABASE_PATH)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = config::ENV_HOST)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = config::ENV_PORT)]
    port: Option<u16>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            database: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be in place before the filter reads RUST_LOG
    let dotenv_path = config::load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confhub_api=debug,confhub_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting confhub-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = dotenv_path {
        info!("Loaded environment file: {}", path.display());
    }

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => {
            info!("Config file: {}", path.display());
            TomlConfig::load(path).context("Failed to load config file")?
        }
        None => TomlConfig::default(),
    };

    let config =
        Config::resolve(&args.overrides(), &file_config).context("Invalid configuration")?;

    info!(
        "{} v{} ({})",
        config.app.name, config.app.version, config.app.environment
    );
    info!("Database path: {}", config.database.path.display());

    let pool = confhub_common::db::init_database(&config.database)
        .await
        .context("Failed to open database")?;

    let state = AppState::new(pool.clone(), config.app.clone());
    let app = build_router(state);

    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid host address: {}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("confhub-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM, whichever comes first.
///
/// A handler that cannot be installed is logged and never fires, so the
/// server keeps running on the other one.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const BOUND_VARS: [&str; 4] = [
        config::ENV_CONFIG_FILE,
        config::ENV_DATABASE_PATH,
        config::ENV_HOST,
        config::ENV_PORT,
    ];

    fn clear_env() {
        for name in BOUND_VARS {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_env_fills_unset_arguments() {
        clear_env();
        env::set_var(config::ENV_CONFIG_FILE, "/etc/confhub/confhub.toml");
        env::set_var(config::ENV_DATABASE_PATH, "/tmp/from-env.db");
        env::set_var(config::ENV_HOST, "0.0.0.0");
        env::set_var(config::ENV_PORT, "9100");

        let args = Args::try_parse_from(["confhub-api"]).unwrap();
        clear_env();

        assert_eq!(args.config, Some(PathBuf::from("/etc/confhub/confhub.toml")));
        let cli = args.overrides();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/from-env.db")));
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9100));
    }

    #[test]
    #[serial]
    fn test_command_line_beats_env() {
        clear_env();
        env::set_var(config::ENV_PORT, "9100");
        env::set_var(config::ENV_DATABASE_PATH, "/tmp/from-env.db");

        let args = Args::try_parse_from([
            "confhub-api",
            "--port",
            "9200",
            "--database",
            "/tmp/from-cli.db",
        ])
        .unwrap();
        clear_env();

        assert_eq!(args.port, Some(9200));
        assert_eq!(args.database, Some(PathBuf::from("/tmp/from-cli.db")));
    }

    #[test]
    #[serial]
    fn test_unparseable_env_port_is_rejected() {
        clear_env();
        env::set_var(config::ENV_PORT, "not-a-port");

        let result = Args::try_parse_from(["confhub-api"]);
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_nothing_set_leaves_resolution_to_file_and_defaults() {
        clear_env();

        let args = Args::try_parse_from(["confhub-api"]).unwrap();
        let config = Config::resolve(&args.overrides(), &TomlConfig::default()).unwrap();

        assert_eq!(args.config, None);
        assert_eq!(config.server.port, config::CompiledDefaults::PORT);
        assert_eq!(config.server.host, config::CompiledDefaults::HOST);
    }
}
