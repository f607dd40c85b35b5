//! Logger trait definition

/// Logger abstraction for runtime-agnostic logging
///
/// Implementations:
/// - `NoOpLogger`: Silent logger for testing
/// - `ConsoleLogger`: Logs to stdout/stderr
/// - Host adapters (MCP server log channel, tracing bridge, ...)
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Convenience macros for logging
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CapturingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for CapturingLogger {
        fn debug(&self, message: &str) {
            self.lines.lock().push(format!("debug:{}", message));
        }
        fn info(&self, message: &str) {
            self.lines.lock().push(format!("info:{}", message));
        }
        fn warn(&self, message: &str) {
            self.lines.lock().push(format!("warn:{}", message));
        }
        fn error(&self, message: &str) {
            self.lines.lock().push(format!("error:{}", message));
        }
    }

    #[test]
    fn test_macros_format_messages() {
        let logger = CapturingLogger::default();
        crate::log_info!(logger, "[Test] {} tools", 3);
        crate::log_warn!(logger, "round {}/{}", 2, 8);

        let lines = logger.lines.lock();
        assert_eq!(lines[0], "info:[Test] 3 tools");
        assert_eq!(lines[1], "warn:round 2/8");
    }
}
