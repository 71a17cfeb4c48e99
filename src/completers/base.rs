//! Base trait for language model completers.

use async_trait::async_trait;

use crate::types::errors::CompletionResult;
use crate::types::question::Turn;

/// A single call to an external language model.
///
/// Implementations receive the agent's whole conversation and return the text
/// of the next assistant turn. A missing reply is returned as an empty string.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Returns the completer name, used in logs and errors.
    fn name(&self) -> &str;

    /// Requests the next assistant reply for `conversation`.
    async fn complete(&self, conversation: &[Turn]) -> CompletionResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoCompleter;

    #[async_trait]
    impl Completer for EchoCompleter {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, conversation: &[Turn]) -> CompletionResult<String> {
            Ok(conversation
                .last()
                .map(|t| t.content.clone())
                .unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_boxed_completer_delegates() {
        let completer: Box<dyn Completer> = Box::new(EchoCompleter);
        let reply = completer.complete(&[Turn::user("ping")]).await.unwrap();

        assert_eq!(completer.name(), "echo");
        assert_eq!(reply, "ping");
    }
}
