use serde::{Deserialize, Serialize};

/// S3 access settings carried by URL download expressions.
///
/// - `region` and `endpoint_url` select the service endpoint.
/// - `max_connections` bounds concurrent requests per worker thread.
/// - `anonymous` skips credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct S3Config {
    /// AWS region, e.g. `us-east-1`
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores
    pub endpoint_url: Option<String>,
    /// Maximum concurrent connections per thread
    pub max_connections: u32,
    /// Access without credentials
    pub anonymous: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self { region: None, endpoint_url: None, max_connections: 8, anonymous: false }
    }
}

impl S3Config {
    /// Copy of this config with `max_connections` replaced.
    pub fn with_max_connections(&self, max_connections: u32) -> Self {
        Self { max_connections, ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { user_agent: format!("projex/{}", env!("CARGO_PKG_VERSION")) }
    }
}

/// I/O settings attached to expressions that reach remote storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IoConfig {
    pub s3: S3Config,
    pub http: HttpConfig,
}

impl IoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_s3(&self, s3: S3Config) -> Self {
        Self { s3, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_s3_keeps_http() {
        let config = IoConfig::new();
        let replaced = config.with_s3(config.s3.with_max_connections(32));
        assert_eq!(replaced.s3.max_connections, 32);
        assert_eq!(replaced.http, config.http);
        assert_eq!(config.s3.max_connections, 8);
    }
}
