//! Daemon config (cadence.toml + CADENCE_* env overrides).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use cadence_scheduler::Schedule;

/// Top-level config: a flat list of jobs.
///
/// ```toml
/// [[jobs]]
/// name = "nightly-report"
/// command = "scripts/report.sh"
/// kind = "daily"
/// hour = 23
/// minute = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One scheduled job: a name for logs, a shell command, and a schedule
/// definition flattened into the same table (`kind` selects the strategy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub command: String,
    #[serde(flatten)]
    pub schedule: Schedule,
}

impl CadenceConfig {
    /// Load config from a TOML file with CADENCE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.cadence/cadence.toml
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: CadenceConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CADENCE_").split("_"))
            .extract()?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cadence/cadence.toml", home)
}
