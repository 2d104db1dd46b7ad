//! Slack incoming-webhook client and message builder.

mod hook;
mod message;

pub use hook::{MessagingError, SlackHook};
pub use message::{Accessory, Block, SlackMessage, Text};
