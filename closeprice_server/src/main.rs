mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use closeprice_lib::config::{load_config, ServiceConfig};
use closeprice_lib::tiingo::TiingoSource;
use closeprice_lib::yahoo::YahooSource;
use closeprice_lib::{ConfigError, PriceHistoryService, PriceSource, Provider};

use crate::routes::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "closeprice")]
#[command(about = "Serve historical daily closing prices for a ticker over HTTP")]
struct Cli {
    /// YAML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (default: 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default: 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Upstream provider: yahoo or tiingo
    #[arg(long)]
    provider: Option<Provider>,

    /// Market suffix tried before the bare ticker. Repeat for several.
    #[arg(long = "market-suffix")]
    market_suffixes: Vec<String>,

    /// Per-call upstream timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Tiingo API token, required with --provider tiingo
    #[arg(long, env = "TIINGO_API_KEY", hide_env_values = true)]
    tiingo_api_key: Option<String>,
}

impl Cli {
    /// Layers command-line values over the file (or default) configuration.
    fn resolve_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ServiceConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if !self.market_suffixes.is_empty() {
            config.market_suffixes = self.market_suffixes.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.upstream_timeout_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }
}

fn build_source(
    config: &ServiceConfig,
    tiingo_api_key: Option<&str>,
) -> Result<Arc<dyn PriceSource>> {
    let timeout = config.upstream_timeout();
    let source: Arc<dyn PriceSource> = match config.provider {
        Provider::Yahoo => Arc::new(
            YahooSource::new(&config.yahoo_base_url, timeout)
                .context("creating Yahoo client")?,
        ),
        Provider::Tiingo => {
            let Some(key) = tiingo_api_key.filter(|k| !k.trim().is_empty()) else {
                bail!(ConfigError::MissingApiKey);
            };
            Arc::new(
                TiingoSource::new(&config.tiingo_base_url, key.to_string(), timeout)
                    .context("creating Tiingo client")?,
            )
        }
    };
    Ok(source)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("closeprice=info".parse()?)
                .add_directive("closeprice_lib=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let source = build_source(&config, cli.tiingo_api_key.as_deref())?;
    let service = PriceHistoryService::new(source, config.resolver());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    tracing::info!(
        provider = %config.provider,
        suffixes = ?config.market_suffixes,
        timeout_secs = config.upstream_timeout_secs,
        "closeprice v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, router(AppState { service }))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["closeprice"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_without_flags() {
        let config = cli(&[]).resolve_config().unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = cli(&[
            "--port",
            "8080",
            "--provider",
            "tiingo",
            "--market-suffix",
            ".KA",
            "--market-suffix",
            ".L",
            "--timeout-secs",
            "3",
        ])
        .resolve_config()
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider, Provider::Tiingo);
        assert_eq!(config.market_suffixes, vec![".KA", ".L"]);
        assert_eq!(config.upstream_timeout_secs, 3);
    }

    #[test]
    fn unknown_provider_rejected_by_parser() {
        let result = Cli::try_parse_from(["closeprice", "--provider", "bloomberg"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(cli(&["--timeout-secs", "0"]).resolve_config().is_err());
    }

    #[test]
    fn tiingo_requires_key() {
        let config = ServiceConfig {
            provider: Provider::Tiingo,
            ..ServiceConfig::default()
        };
        assert!(build_source(&config, None).is_err());
        assert!(build_source(&config, Some("  ")).is_err());

        let source = build_source(&config, Some("key")).unwrap();
        assert_eq!(source.name(), "tiingo");
    }

    #[test]
    fn yahoo_is_default_source() {
        let source = build_source(&ServiceConfig::default(), None).unwrap();
        assert_eq!(source.name(), "yahoo");
    }
}
