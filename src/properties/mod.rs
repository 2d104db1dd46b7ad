//! Layered properties-file configuration.

mod configuration;
mod error;
mod keys;
mod parse;
mod source;

pub use configuration::{BASE_FILENAME, Configuration, ENVIRONMENT_KEY, ENVIRONMENT_VAR};
pub use error::ConfigError;
pub use keys::format_key;
pub use parse::parse_properties;
pub use source::{DirSource, EmbeddedSource, PropertySource};
