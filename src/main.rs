use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use blasted_image::application::{BlastedImage, LoadRequest};
use blasted_image::domain::entities::{ClearTarget, Headers};
use blasted_image::domain::ports::AssetStorePort;
use blasted_image::infrastructure::{
    AppConfig, BundledAssets, ChannelEventNotifier, CliArgs, Command, FanoutEventNotifier,
    StorageManager, ThreadScheduler, TracingEventNotifier, init_global,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn run(blasted: &BlastedImage, config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Load {
            urls,
            headers,
            skip_memory_cache,
            prefer_local_assets,
            cloud_prefix,
        } => {
            let headers: Headers = headers.into_iter().collect();
            let prefer_local_assets = prefer_local_assets || config.assets.prefer_local_assets;
            let cloud_prefix = cloud_prefix.or_else(|| config.assets.cloud_prefix.clone());

            let requests = urls
                .into_iter()
                .map(|url| LoadRequest {
                    url,
                    headers: (!headers.is_empty()).then(|| headers.clone()),
                    skip_memory_cache,
                    prefer_local_assets,
                    cloud_prefix: cloud_prefix.clone(),
                })
                .collect();

            let report = blasted.preload(requests).await;
            if report.failed > 0 {
                return Err(eyre!(
                    "ERROR: {} of {} images failed to load",
                    report.failed,
                    report.total()
                ));
            }
        }
        Command::Clear { target } => {
            let result = match ClearTarget::from(target) {
                ClearTarget::Memory => blasted.clear_memory_cache().await,
                ClearTarget::Disk => blasted.clear_disk_cache().await,
                ClearTarget::All => blasted.clear_all_caches().await,
            };
            result.map_err(|e| eyre!("{}: {e}", e.code()))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = blasted_image::VERSION, "Starting blasted");

    let assets: Arc<dyn AssetStorePort> =
        Arc::new(BundledAssets::new(config.effective_assets_root()));
    let engine = init_global(config.engine_config(), Arc::clone(&assets)).await?;
    let scheduler = Arc::new(ThreadScheduler::new()?);

    let (channel, mut events) = ChannelEventNotifier::new();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{event}");
        }
    });
    let notifier = FanoutEventNotifier::new()
        .with(Arc::new(channel))
        .with(Arc::new(TracingEventNotifier));

    let blasted = BlastedImage::new(engine, assets, scheduler, Arc::new(notifier))
        .with_verbose(config.verbose);

    let result = run(&blasted, &config, args.command).await;

    drop(blasted);
    printer.await?;

    result
}
