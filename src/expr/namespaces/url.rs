use tracing::debug;

use crate::{
    config::{get_context, IoConfig},
    expr::{Expression, FunctionExpr, OnError, UriExpr},
    ExprError, ExprResult,
};

/// Options for [`ExpressionUrlNamespace::download`].
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOptions {
    /// Concurrent connections per worker thread; must be positive.
    pub max_connections: u32,
    pub on_error: OnError,
    /// Falls back to the planning context's default I/O config.
    pub io_config: Option<IoConfig>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self { max_connections: 32, on_error: OnError::Raise, io_config: None }
    }
}

pub struct ExpressionUrlNamespace {
    expr: Expression,
}

impl ExpressionUrlNamespace {
    pub fn from_expression(expr: &Expression) -> Self {
        Self { expr: expr.clone() }
    }

    /// Fetch the bytes behind each URL.
    ///
    /// The S3 connection limit in the resulting I/O config is overridden with
    /// `max_connections`, and multi-threaded fetching is enabled unless the
    /// planning context targets a distributed runner.
    pub fn download(&self, options: DownloadOptions) -> ExprResult<Expression> {
        let DownloadOptions { max_connections, on_error, io_config } = options;
        if max_connections == 0 {
            return Err(ExprError::InvalidArgument(format!(
                "Invalid value for `max_connections`: {max_connections}"
            )));
        }

        let context = get_context();
        let io_config = io_config.unwrap_or_else(|| context.default_io_config.clone());
        let io_config = io_config.with_s3(io_config.s3.with_max_connections(max_connections));
        let multi_thread = context.multi_threaded_io();
        debug!(max_connections, multi_thread, "building url download");

        let func = UriExpr::Download {
            max_connections,
            raise_on_error: on_error.raise_on_error(),
            multi_thread,
            io_config,
        };
        Ok(self.expr.function(FunctionExpr::Uri(func), vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{context::CONTEXT_TEST_LOCK, set_planning_config, PlanningConfig, S3Config};
    use crate::expr::{col, Expr};

    #[test]
    fn zero_connections_rejected() {
        let options = DownloadOptions { max_connections: 0, ..Default::default() };
        match col("url").url().download(options) {
            Err(ExprError::InvalidArgument(message)) => {
                assert_eq!(message, "Invalid value for `max_connections`: 0")
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn max_connections_overrides_supplied_io_config() {
        let supplied = IoConfig::new().with_s3(S3Config { region: Some("eu-west-1".into()), ..Default::default() });
        let options = DownloadOptions { max_connections: 4, on_error: OnError::Null, io_config: Some(supplied) };
        let expr = col("url").url().download(options).unwrap();
        match expr.expr() {
            Expr::Function { func: FunctionExpr::Uri(UriExpr::Download { max_connections, raise_on_error, io_config, .. }), .. } => {
                assert_eq!(*max_connections, 4);
                assert!(!raise_on_error);
                assert_eq!(io_config.s3.max_connections, 4);
                assert_eq!(io_config.s3.region.as_deref(), Some("eu-west-1"));
            }
            other => panic!("expected download, got {other:?}"),
        }
        assert_eq!(expr.name(), "url");
    }

    #[test]
    fn missing_io_config_comes_from_distributed_context() {
        let _guard = CONTEXT_TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let default_io = IoConfig::new().with_s3(S3Config { region: Some("us-east-2".into()), ..Default::default() });
        let previous = set_planning_config(PlanningConfig::from(crate::config::RunnerKind::Distributed, default_io));

        let options = DownloadOptions { max_connections: 5, ..Default::default() };
        let expr = col("url").url().download(options);
        set_planning_config(previous);

        match expr.unwrap().expr() {
            Expr::Function { func: FunctionExpr::Uri(UriExpr::Download { multi_thread, io_config, .. }), .. } => {
                assert!(!multi_thread);
                assert_eq!(io_config.s3.max_connections, 5);
                assert_eq!(io_config.s3.region.as_deref(), Some("us-east-2"));
            }
            other => panic!("expected download, got {other:?}"),
        }
    }
}
