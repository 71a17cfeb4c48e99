//! Language model completers.
//!
//! A [`Completer`] turns an agent conversation into the next assistant reply.
//! Two backends are provided: an HTTP chat-completions client and a local
//! command runner.

mod base;
mod chat;
mod command;

pub use base::Completer;
pub use chat::ChatCompleter;
pub use command::CommandCompleter;

use crate::types::config::{CompleterConfig, CompleterProvider};
use crate::AgoraResult;

/// Creates the completer selected by the configuration.
pub fn create_completer(config: &CompleterConfig) -> AgoraResult<Box<dyn Completer>> {
    let completer: Box<dyn Completer> = match config.provider {
        CompleterProvider::Chat => Box::new(ChatCompleter::from_config(config)?),
        CompleterProvider::Command => Box::new(CommandCompleter::from_config(config)?),
    };

    tracing::debug!("Using completer '{}'", completer.name());
    Ok(completer)
}
