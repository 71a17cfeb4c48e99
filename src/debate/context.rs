//! Per-agent conversation history.

use crate::types::question::{Role, Turn};
use crate::{AgoraError, AgoraResult};

/// Ordered conversation of one agent.
///
/// Only ever appended to. Turn `0` is the question; the assistant reply of
/// round `r` sits at turn `2r + 1`, with the peer prompt that triggered it
/// (rounds after the first) at `2r`.
#[derive(Debug, Clone)]
pub struct AgentContext {
    agent: usize,
    turns: Vec<Turn>,
}

impl AgentContext {
    /// Starts a context seeded with the question as the first user turn.
    pub fn new(agent: usize, question: impl Into<String>) -> Self {
        Self {
            agent,
            turns: vec![Turn::user(question)],
        }
    }

    /// Index of the agent owning this context.
    pub fn agent(&self) -> usize {
        self.agent
    }

    /// Appends a turn. Empty content is rejected as a malformed response.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> AgoraResult<()> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AgoraError::MalformedResponse { agent: self.agent });
        }
        self.turns.push(Turn { role, content });
        Ok(())
    }

    /// Records an assistant turn with no content.
    ///
    /// Keeps the turn layout intact when the model answers with nothing; the
    /// agent is then left out of the vote.
    pub fn append_empty_reply(&mut self) {
        self.turns.push(Turn::assistant(String::new()));
    }

    /// Content of the most recent assistant turn.
    pub fn last(&self) -> AgoraResult<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
            .ok_or(AgoraError::EmptyContext)
    }

    /// Assistant reply produced in `round`, if that round has run.
    pub fn reply(&self, round: usize) -> Option<&str> {
        self.turns
            .get(2 * round + 1)
            .filter(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }

    /// All turns, in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: a context holds at least the question.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Consumes the context, returning its turns.
    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_holds_question() {
        let ctx = AgentContext::new(0, "Is the sky blue?");
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.turns()[0].role, Role::User);
    }

    #[test]
    fn test_last_before_reply_is_error() {
        let ctx = AgentContext::new(0, "q");
        assert!(matches!(ctx.last(), Err(AgoraError::EmptyContext)));
    }

    #[test]
    fn test_append_rejects_empty_content() {
        let mut ctx = AgentContext::new(2, "q");
        let err = ctx.append(Role::Assistant, "   ").unwrap_err();

        assert!(matches!(err, AgoraError::MalformedResponse { agent: 2 }));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_reply_by_round() {
        let mut ctx = AgentContext::new(0, "q");
        ctx.append(Role::Assistant, "first (yes)").unwrap();
        ctx.append(Role::User, "peers say no").unwrap();
        ctx.append(Role::Assistant, "second (no)").unwrap();

        assert_eq!(ctx.reply(0), Some("first (yes)"));
        assert_eq!(ctx.reply(1), Some("second (no)"));
        assert_eq!(ctx.reply(2), None);
        assert_eq!(ctx.last().unwrap(), "second (no)");
    }

    #[test]
    fn test_empty_reply_keeps_layout() {
        let mut ctx = AgentContext::new(0, "q");
        ctx.append_empty_reply();

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.reply(0), Some(""));
        assert_eq!(ctx.last().unwrap(), "");
    }
}
