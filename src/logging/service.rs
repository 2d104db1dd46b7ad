//! Apply, query, and time-bound logger levels at runtime.

use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;

use super::registry::LoggerRegistry;
use super::timer::Timer;

/// A request to change one logger's level, optionally for a limited time.
///
/// Both `logger_name` and `level` are validated at entry; a request missing
/// either is rejected as [`LogResponseStatus::InvalidRequest`].
#[derive(Debug, Clone, Default)]
pub struct LoggerChangeRequest {
    pub logger_name: Option<String>,
    pub level: Option<String>,
    pub duration: Option<Duration>,
}

impl LoggerChangeRequest {
    /// A permanent level change.
    pub fn new(logger_name: impl Into<String>, level: impl Into<String>) -> Self {
        Self { logger_name: Some(logger_name.into()), level: Some(level.into()), duration: None }
    }

    /// A level change that reverts after `duration`.
    pub fn timed(
        logger_name: impl Into<String>,
        level: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            logger_name: Some(logger_name.into()),
            level: Some(level.into()),
            duration: Some(duration),
        }
    }
}

/// Outcome of a [`LogLevelService::set_log_level`] call. Exhaustive and
/// mutually exclusive per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogResponseStatus {
    InvalidRequest,
    LoggerNotFound,
    LevelNotFound,
    Changed,
    TimerSuccessful,
    Error,
}

/// Manages an application's logger levels at runtime against a
/// [`LoggerRegistry`], with optional reversion to the previous level after a
/// requested duration.
///
/// Stateless per call apart from the shared revert timer; no outcome aborts
/// the service's ability to handle subsequent requests.
pub struct LogLevelService {
    registry: LoggerRegistry,
    timer: Timer,
}

impl LogLevelService {
    pub fn new(registry: LoggerRegistry) -> Self {
        Self { registry, timer: Timer::new() }
    }

    pub fn set_log_level(&self, request: &LoggerChangeRequest) -> LogResponseStatus {
        let (Some(name), Some(level)) = (request.logger_name.as_deref(), request.level.as_deref())
        else {
            return LogResponseStatus::InvalidRequest;
        };

        match request.duration {
            None => self.execute(name, level),
            Some(duration) => self.execute_with_timer(name, level, duration),
        }
    }

    /// The effective level for the named logger. Never fails; a logger that
    /// was never configured resolves to the registry's root level.
    pub fn get_log_level(&self, logger_name: &str) -> LevelFilter {
        self.registry.effective_level(logger_name)
    }

    fn execute(&self, name: &str, level: &str) -> LogResponseStatus {
        if !self.registry.exists(name) {
            return LogResponseStatus::LoggerNotFound;
        }

        // Total resolution: an unrecognized name is a client error, never a
        // silent fallback level.
        let Ok(resolved) = level.parse::<LevelFilter>() else {
            return LogResponseStatus::LevelNotFound;
        };

        self.registry.set_level(name, Some(resolved));
        LogResponseStatus::Changed
    }

    fn execute_with_timer(&self, name: &str, level: &str, duration: Duration) -> LogResponseStatus {
        // Captured before mutation; None means the level was inherited and the
        // revert clears back to inherited.
        let previous = self.registry.explicit_level(name);

        let status = self.execute(name, level);
        if status != LogResponseStatus::Changed {
            return status;
        }

        let registry = self.registry.clone();
        let logger = name.to_string();
        let scheduled = self.timer.schedule(duration, move || {
            registry.set_level(&logger, previous);
            tracing::debug!("reverted timed log level override for {}", logger);
        });

        match scheduled {
            Ok(()) => LogResponseStatus::TimerSuccessful,
            Err(err) => {
                tracing::error!(
                    "failed to schedule log level revert for {} after {:?}: {}",
                    name,
                    duration,
                    err
                );
                LogResponseStatus::Error
            }
        }
    }
}
