use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_divergence::api::state::AppState;
use rift_divergence::api::{build_router, cors_layer};
use rift_divergence::calculate::DivergenceAnalyzer;
use rift_divergence::config::AppConfig;
use rift_divergence::models::{AnalysisResult, ChampionRates};
use rift_divergence::provider::{DatasetProvider, RegionalRateProvider, TimeoutProvider};

#[derive(Parser)]
#[command(name = "rift-divergence")]
#[command(about = "Regional champion win-rate divergence analysis")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Rate dataset (JSON); overrides provider.dataset from the config
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze one champion, or every champion when none is given
    Analyze {
        champion: Option<String>,

        /// Significance threshold override
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known regions
    Regions,

    /// List known champions
    Champions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dataset) = &cli.dataset {
        config.provider.dataset = Some(dataset.clone());
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting rift-divergence v{}", env!("CARGO_PKG_VERSION"));

    let provider = load_provider(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                provider,
                analyzer: Arc::new(DivergenceAnalyzer::new(
                    config.analysis.to_analyzer_config(),
                )),
            };
            let app = build_router(state).layer(
                cors_layer(&config.server.cors_origin).context("Invalid server.cors_origin")?,
            );

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Analyze {
            champion,
            threshold,
            json,
        } => {
            let mut analyzer_config = config.analysis.to_analyzer_config();
            if let Some(t) = threshold {
                anyhow::ensure!(
                    t.is_finite() && t >= 0.0,
                    "--threshold must be a non-negative number"
                );
                analyzer_config.significance_threshold = t;
            }
            let analyzer = DivergenceAnalyzer::new(analyzer_config);

            let champions = match champion {
                Some(name) => vec![provider.fetch_champion(&name).await?],
                None => provider.fetch_all().await?,
            };

            let (results, failures) = analyze_champions(&analyzer, &champions);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (name, result) in &results {
                    print_analysis(name, result);
                }
            }
            anyhow::ensure!(failures == 0, "{} analyses failed", failures);
        }
        Commands::Regions => {
            for region in provider.list_regions().await? {
                println!("{:<6} {}", region.code, region.platform);
            }
        }
        Commands::Champions => {
            for name in provider.list_champions().await? {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the configured provider, wrapped with the fetch timeout.
fn load_provider(config: &AppConfig) -> Result<Arc<dyn RegionalRateProvider>> {
    let dataset = match &config.provider.dataset {
        Some(path) => DatasetProvider::from_file(path)
            .with_context(|| format!("Failed to load dataset {}", path.display()))?,
        None => {
            tracing::warn!("No dataset configured, using bundled sample rates");
            DatasetProvider::sample()?
        }
    };

    let info = dataset.info();
    tracing::info!(
        version = info.version.as_deref().unwrap_or("unknown"),
        champions = info.champion_count,
        regions = info.region_count,
        "Rate provider ready"
    );

    let timeout = config
        .provider
        .fetch_timeout()
        .context("Invalid provider.fetch_timeout")?;
    Ok(Arc::new(TimeoutProvider::new(Arc::new(dataset), timeout)))
}

/// Successful analyses keyed by champion name, plus the number that failed.
fn analyze_champions(
    analyzer: &DivergenceAnalyzer,
    champions: &[ChampionRates],
) -> (BTreeMap<String, AnalysisResult>, usize) {
    let mut results = BTreeMap::new();
    let mut failures = 0;
    for (name, outcome) in analyzer.analyze_all(champions) {
        match outcome {
            Ok(result) => {
                results.insert(name, result);
            }
            Err(e) => {
                failures += 1;
                tracing::error!(champion = %name, "Analysis failed: {}", e);
            }
        }
    }
    (results, failures)
}

fn print_analysis(name: &str, result: &AnalysisResult) {
    let stats = &result.statistics;
    println!("\n=== {} ===", name);
    println!("Mean win rate:    {:.1}%", stats.mean_winrate * 100.0);
    println!("Std deviation:    {:.1}%", stats.std_winrate * 100.0);
    println!(
        "Highest:          {:.1}% ({})",
        stats.max_winrate * 100.0,
        stats.max_region
    );
    println!(
        "Lowest:           {:.1}% ({})",
        stats.min_winrate * 100.0,
        stats.min_region
    );

    if !result.divergences.is_empty() {
        println!("Divergent regions:");
        for d in &result.divergences {
            println!(
                "  {:<6} {:.1}% ({} by {:.1} pts)",
                d.region,
                d.winrate * 100.0,
                d.kind,
                d.difference * 100.0
            );
        }
    }

    for insight in &result.insights {
        println!("- {}", insight);
    }
}
