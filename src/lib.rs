//! commons: layered properties configuration, runtime log level control, and
//! Slack webhook notifications for internal applications.

pub mod logging;
pub mod properties;
pub mod slack;

pub use logging::{LogLevelService, LogResponseStatus, LoggerChangeRequest, LoggerRegistry};
pub use properties::{ConfigError, Configuration, DirSource, EmbeddedSource, PropertySource};
pub use slack::{MessagingError, SlackHook, SlackMessage};
