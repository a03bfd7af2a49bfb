use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use tokio::signal;
use tokio::sync::watch;

use genforge::config::ConfigManager;
use genforge::cycle::CycleController;
use genforge::remote::{RemoteSync, SyncCredentials};
use genforge::server::{self, AppState};
use genforge::storage::FsStore;

#[derive(Parser, Debug)]
#[command(name = "genforge", version, about = "Module evolution daemon")]
struct Cli {
    /// Configuration file; built-in defaults are used and written here when
    /// it does not exist yet
    #[arg(short, long, default_value = "genforge.toml")]
    config: PathBuf,

    /// Override the status server listen address
    #[arg(long)]
    listen: Option<String>,

    /// Stop after this many cycles instead of running until interrupted
    #[arg(long)]
    cycles: Option<u64>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let manager = ConfigManager::new();
    if cli.config.exists() {
        manager
            .load_from_file(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?;
        info!("configuration loaded from {}", cli.config.display());
    } else {
        info!(
            "no configuration file at {}, writing defaults there",
            cli.config.display()
        );
        if let Err(err) = manager.save_to_file(&cli.config) {
            warn!("could not write the default config: {err}");
        }
    }
    manager
        .update(|config| {
            if let Some(listen) = &cli.listen {
                config.server.listen = listen.clone();
            }
            if let Some(seed) = cli.seed {
                config.evolution.seed = Some(seed);
            }
        })
        .context("applying command line overrides")?;
    let config = manager.get();

    let store = Arc::new(FsStore::new(&config.storage).context("preparing storage directories")?);
    let remote = RemoteSync::new(SyncCredentials::load(&config.remote.credentials_path));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let server_task = if config.server.enabled {
        let state = AppState::new(
            Arc::clone(&store),
            config.server.identity.clone(),
            config.server.listen.clone(),
        );
        let listen = config.server.listen.clone();
        Some(tokio::spawn(async move {
            if let Err(err) = server::serve(listen, state).await {
                error!("status server stopped: {err}");
            }
        }))
    } else {
        None
    };

    let mut controller = CycleController::new(
        config.evolution.clone(),
        config.cycle.clone(),
        Arc::clone(&store),
        remote,
    )
    .context("initializing the cycle controller")?;

    info!(
        "genforge {} starting: generation size {}, cycle interval {}s",
        env!("CARGO_PKG_VERSION"),
        config.evolution.generation_size,
        config.cycle.interval_secs
    );

    let run_result = controller.run(cli.cycles, shutdown_rx).await;

    if let Some(task) = server_task {
        task.abort();
    }

    let counters = controller.counters();
    info!(
        "stopping: {} modules generated, {} genes mutated, {} cycles completed, progress {:.1}%",
        counters.modules_generated,
        counters.genes_mutated,
        counters.cycles_completed,
        counters.progress_pct
    );

    run_result.context("cycle loop failed")?;
    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(err) => {
                warn!("SIGTERM handler unavailable ({err}), watching SIGINT only");
                let _ = ctrl_c.await;
                return;
            }
        };
        tokio::select! {
            _ = ctrl_c => info!("received SIGINT, shutting down"),
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        }
    }
    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received interrupt, shutting down");
    }
}
