//! Job actions — shell commands fired by the scheduler.

use std::process::Command;

use tracing::{debug, error, info, warn};

/// Run `command` through `sh -c`, logging the outcome.
///
/// Blocking is fine here: the scheduler invokes every task on the blocking
/// pool, so a slow command never stalls another schedule's runner.
pub fn run_command(name: &str, command: &str) {
    info!(job = name, "running job command");
    match Command::new("sh").arg("-c").arg(command).output() {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                debug!(job = name, "job stdout: {}", stdout.trim());
            }
            if output.status.success() {
                info!(job = name, "job completed");
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(
                    job = name,
                    code = output.status.code().unwrap_or(-1),
                    "job failed: {}",
                    stderr.trim()
                );
            }
        }
        Err(e) => error!(job = name, "failed to spawn job command: {e}"),
    }
}
