//! Runtime log level control over a live logger registry.

mod registry;
mod service;
mod timer;

pub use registry::{LoggerRegistry, RegistryFilter};
pub use service::{LogLevelService, LogResponseStatus, LoggerChangeRequest};
pub use timer::{Timer, TimerStopped};

/// Install a global `fmt` subscriber filtered through the registry, so level
/// changes made at runtime take effect on emitted output.
///
/// Opt-in: the crate never installs a subscriber implicitly. Does nothing if
/// a global subscriber is already set.
pub fn init(registry: &LoggerRegistry) {
    use tracing_subscriber::prelude::*;

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(registry.filter()))
        .try_init();
}
