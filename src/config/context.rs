use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::PlanningConfig;

static CONTEXT: Lazy<RwLock<PlanningConfig>> = Lazy::new(|| RwLock::new(PlanningConfig::from_env()));

/// Snapshot of the process-wide planning configuration.
pub fn get_context() -> PlanningConfig {
    match CONTEXT.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the process-wide planning configuration, returning the previous one.
pub fn set_planning_config(config: PlanningConfig) -> PlanningConfig {
    debug!(runner = ?config.runner, "replacing planning config");
    let mut guard = match CONTEXT.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    std::mem::replace(&mut *guard, config)
}

/// Held by tests that replace the process-wide config.
#[cfg(test)]
pub(crate) static CONTEXT_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
