use clap::Parser;
use tracing::{error, info, warn};

mod actions;
mod config;

/// In-process recurring task scheduler: runs the shell commands configured
/// in cadence.toml on their daily/weekly/monthly/periodic schedules.
#[derive(Parser)]
#[command(name = "cadence-daemon", version)]
struct Cli {
    /// Path to cadence.toml (default: $CADENCE_CONFIG, then ~/.cadence/cadence.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_daemon=info,cadence_scheduler=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // config path: explicit flag > CADENCE_CONFIG env > ~/.cadence/cadence.toml
    let config_path = cli.config.or_else(|| std::env::var("CADENCE_CONFIG").ok());
    let config = config::CadenceConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({e}), starting with no jobs");
        config::CadenceConfig::default()
    });

    if config.jobs.is_empty() {
        warn!("no jobs configured — the daemon will idle");
    }

    for job in config.jobs {
        if let Err(e) = job.schedule.validate() {
            error!(job = %job.name, "invalid schedule: {e} — job not started");
            continue;
        }
        info!(job = %job.name, "starting schedule");
        let name = job.name;
        let command = job.command;
        cadence_scheduler::spawn_schedule(job.schedule, move || {
            actions::run_command(&name, &command)
        });
    }

    info!("cadence daemon running — press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    Ok(())
}
