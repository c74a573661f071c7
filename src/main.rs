use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use exn::ResultExt;
use skinwatch::error::{ErrorKind, Result};
use skinwatch::{Pipeline, PipelineOptions, backend, deploy};
use skinwatch_catalog::CatalogSource;
use skinwatch_catalog::net::{FetchHandle, HttpFetcher};
use skinwatch_changes::{DEFAULT_POLICY, MinerConfig};
use skinwatch_config::Settings;
use skinwatch_storage::Cache;
use time::UtcDateTime;
use tracing_subscriber::EnvFilter;

/// Refresh the skin catalog cache and trigger a deploy when it changed.
#[derive(Debug, Parser)]
#[command(name = "skinwatch", version, about)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Run the pipeline but do not call the deploy hook.
    #[arg(long)]
    dry_run: bool,
    /// Mine art changes even if the cooldown has not elapsed.
    #[arg(long)]
    force_mining: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

async fn run(cli: Cli) -> Result<()> {
    let settings = skinwatch_config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let fetcher: FetchHandle = Arc::new(
        HttpFetcher::new(&settings.http.user_agent, settings.http.timeout()).or_raise(|| ErrorKind::Http)?,
    );
    let cache = Cache::new(backend::open(&settings.cache).await?);
    let source = CatalogSource::new(fetcher.clone(), settings.cdragon.base_url.as_str())
        .with_substitutions(settings.substitutions.clone());
    let pipeline = Pipeline::new(cache.clone(), fetcher.clone(), source, options(&settings, cli.force_mining));

    let result = pipeline.run(UtcDateTime::now()).await;
    // Release the backend whether or not the run succeeded.
    if let Err(err) = cache.destroy().await {
        tracing::warn!(error = ?err, "could not close cache backend");
    }
    let outcome = result?;

    if !outcome.should_rebuild() {
        tracing::info!("nothing changed, no rebuild needed");
    } else if cli.dry_run {
        tracing::info!("rebuild needed, skipping deploy hook (dry run)");
    } else {
        deploy::notify(&*fetcher, settings.deploy_hook.as_deref()).await?;
    }
    Ok(())
}

fn options(settings: &Settings, force_mining: bool) -> PipelineOptions {
    PipelineOptions {
        cdragon_base_url: settings.cdragon.base_url.clone(),
        channel: settings.cdragon.channel.clone(),
        reference_channel: settings.cdragon.reference_channel.clone(),
        cooldown: settings.mining.cooldown(),
        force_mining,
        miner: MinerConfig {
            wiki_base_url: settings.wiki.base_url.clone(),
            concurrency: settings.mining.concurrency,
            min_supported: settings.mining.min_supported,
            threshold: settings.mining.threshold,
            policy: DEFAULT_POLICY.to_vec(),
            aliases: settings.mining.aliases.clone(),
            ignored: settings.mining.ignored.clone(),
        },
    }
}
