use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{IoConfig, S3Config};

/// Where planned work is executed.
///
/// - `Native`: a single process; I/O may fan out across local threads.
/// - `Distributed`: a cluster runner; each worker downloads single-threaded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RunnerKind {
    /// In-process execution (default).
    #[default]
    Native,
    /// Cluster execution.
    Distributed,
}

/// Planning configuration consulted while building expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Runner the plan is built for
    pub runner: RunnerKind,
    /// I/O settings used when an expression does not supply its own
    pub default_io_config: IoConfig,
}

impl PlanningConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(runner: RunnerKind, default_io_config: IoConfig) -> Self {
        Self { runner, default_io_config }
    }

    pub fn native() -> Self {
        Self { runner: RunnerKind::Native, ..Default::default() }
    }

    pub fn distributed() -> Self {
        Self { runner: RunnerKind::Distributed, ..Default::default() }
    }

    /// Read `PROJEX_RUNNER` (`native` | `distributed`) and `PROJEX_S3_REGION`.
    pub fn from_env() -> Self {
        let runner = std::env::var("PROJEX_RUNNER").ok();
        let region = std::env::var("PROJEX_S3_REGION").ok();
        Self::from_env_values(runner.as_deref(), region.as_deref())
    }

    /// Unknown runner values fall back to the native runner with a warning.
    pub(crate) fn from_env_values(runner: Option<&str>, region: Option<&str>) -> Self {
        let runner = match runner.map(str::to_ascii_lowercase).as_deref() {
            None | Some("native") | Some("") => RunnerKind::Native,
            Some("distributed") => RunnerKind::Distributed,
            Some(other) => {
                warn!(runner = other, "unknown PROJEX_RUNNER, using native runner");
                RunnerKind::Native
            }
        };
        let region = region.filter(|r| !r.is_empty()).map(str::to_string);
        let io_config = IoConfig::new().with_s3(S3Config { region, ..S3Config::default() });
        Self { runner, default_io_config: io_config }
    }

    /// Whether I/O issued from expressions may use several local threads.
    pub fn multi_threaded_io(&self) -> bool {
        self.runner != RunnerKind::Distributed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distributed_runner_disables_multithreaded_io() {
        assert!(PlanningConfig::native().multi_threaded_io());
        assert!(!PlanningConfig::distributed().multi_threaded_io());
    }

    #[test]
    fn env_values_select_runner_and_region() {
        let config = PlanningConfig::from_env_values(Some("Distributed"), Some("us-east-2"));
        assert_eq!(config.runner, RunnerKind::Distributed);
        assert_eq!(config.default_io_config.s3.region.as_deref(), Some("us-east-2"));

        let config = PlanningConfig::from_env_values(None, Some(""));
        assert_eq!(config.runner, RunnerKind::Native);
        assert_eq!(config.default_io_config.s3.region, None);
    }

    #[test]
    fn unknown_runner_falls_back_to_native() {
        let config = PlanningConfig::from_env_values(Some("spark"), None);
        assert_eq!(config.runner, RunnerKind::Native);
        assert!(config.multi_threaded_io());
    }
}
