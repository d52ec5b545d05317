use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use sylvan_api::RestApi;
use sylvan_core::DefaultsTable;
use sylvan_providers::{EndpointConfig, ProviderConfig};
use sylvan_providers::config::{OPEN_ELEVATION_URL, OPEN_METEO_URL, SOILGRIDS_CALLS_PER_MINUTE, SOILGRIDS_URL};
use sylvan_storage::{cache::DEFAULT_PRECISION, Aggregator, CacheConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Forest-health feature aggregation server
#[derive(Parser, Debug)]
#[command(name = "sylvan")]
#[command(about = "Aggregates climate, elevation and soil features for a coordinate", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Decimal places kept in the cache key (0-6)
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    cache_precision: u32,

    /// JSON object of feature defaults overriding the built-in medians
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Open-Meteo forecast endpoint
    #[arg(long, default_value = OPEN_METEO_URL)]
    climate_url: String,

    /// Open-Elevation lookup endpoint
    #[arg(long, default_value = OPEN_ELEVATION_URL)]
    elevation_url: String,

    /// SoilGrids properties endpoint
    #[arg(long, default_value = SOILGRIDS_URL)]
    soil_url: String,

    /// Climate and elevation request timeout in seconds
    #[arg(long, default_value_t = 6)]
    timeout_secs: u64,

    /// Soil request timeout in seconds
    #[arg(long, default_value_t = 10)]
    soil_timeout_secs: u64,

    /// Local cap on soil calls per minute (0 disables it)
    #[arg(long, default_value_t = SOILGRIDS_CALLS_PER_MINUTE)]
    soil_calls_per_minute: u32,
}

impl Args {
    fn provider_config(&self) -> ProviderConfig {
        let timeout = Duration::from_secs(self.timeout_secs);
        ProviderConfig {
            climate: EndpointConfig::new(&self.climate_url, timeout),
            elevation: EndpointConfig::new(&self.elevation_url, timeout),
            soil: EndpointConfig::new(&self.soil_url, Duration::from_secs(self.soil_timeout_secs)),
            soil_calls_per_minute: self.soil_calls_per_minute,
            ..ProviderConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Sylvan v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);

    let defaults = match &args.defaults {
        Some(path) => {
            info!("Loading feature defaults from {:?}", path);
            DefaultsTable::from_json_file(path)?
        }
        None => DefaultsTable::builtin(),
    };

    let aggregator = Arc::new(Aggregator::from_config(
        &args.provider_config(),
        CacheConfig {
            precision: args.cache_precision,
        },
        defaults,
    )?);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(aggregator, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
