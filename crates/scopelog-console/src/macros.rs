//! Variadic logging macros.
//!
//! Each argument is converted with [`to_arg`](crate::to_arg), so anything
//! `Serialize` can be passed directly:
//!
//! ```ignore
//! log_warn!(logger, "slow query", elapsed_ms, &row);
//! ```

/// Log at `log` severity.
#[macro_export]
macro_rules! log_log {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(vec![$($crate::to_arg(&$arg)),*])
    };
}

/// Log at `debug` severity.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug(vec![$($crate::to_arg(&$arg)),*])
    };
}

/// Log at `info` severity.
#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(vec![$($crate::to_arg(&$arg)),*])
    };
}

/// Log at `warn` severity.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn(vec![$($crate::to_arg(&$arg)),*])
    };
}

/// Log at `error` severity.
#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(vec![$($crate::to_arg(&$arg)),*])
    };
}

/// Log at `fatal` severity, inside a `"Fatal Error"` group.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatal(vec![$($crate::to_arg(&$arg)),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::testing::{RecordingSink, SinkCall};
    use crate::{ConfigOverrides, Logger, LoggingContext};
    use scopelog_core::Severity;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn macros_convert_mixed_arguments() {
        let recorder = RecordingSink::new();
        let ctx = LoggingContext::isolated(Severity::Log, Arc::new(recorder.clone()));
        let logger = Logger::in_context(ctx, "m", ConfigOverrides::new().level(Severity::Log));

        log_info!(logger, "rows", 3, vec![1, 2]);
        log_warn!(logger);
        log_log!(&logger, true,);

        assert_eq!(
            recorder.calls(),
            vec![
                SinkCall::Info(vec![json!("rows"), json!(3), json!([1, 2])]),
                SinkCall::Warn(vec![]),
                SinkCall::Log(vec![json!(true)]),
            ]
        );
    }
}
