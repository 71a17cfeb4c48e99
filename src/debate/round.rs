//! One synchronized debate round.
//!
//! The first round only asks each agent to answer the question it was seeded
//! with. Every later round first shows each agent its peers' replies from the
//! previous round, then asks for a revised answer.

use crate::completers::Completer;
use crate::types::errors::CompletionResult;
use crate::types::question::Role;
use crate::AgoraResult;

use super::context::AgentContext;

/// Prompt used when an agent has no peer reply to look at.
pub const SOLO_PROMPT: &str = "Can you double check that your answer is correct. Put your final answer in the form (...) at the end of your response. For example: (yes), (123.45), (A)";

const PEER_HEADER: &str = "These are the solutions to the problem from other agents: ";

const PEER_INSTRUCTION: &str = "\n\n Using the reasoning from other agents as additional advice, can you give an updated answer? Examine your solution and that other agents step by step. Put your answer in the form (...) at the end of your response.  For example: (yes), (123.45), (A)";

/// Builds the user turn that shows an agent its peers' replies.
///
/// Falls back to [`SOLO_PROMPT`] when `peer_replies` is empty.
pub fn peer_prompt<S: AsRef<str>>(peer_replies: &[S]) -> String {
    if peer_replies.is_empty() {
        return SOLO_PROMPT.to_string();
    }

    let mut prompt = String::from(PEER_HEADER);
    for reply in peer_replies {
        prompt.push_str("\n\n One agent solution: ```");
        prompt.push_str(reply.as_ref());
        prompt.push_str("```");
    }
    prompt.push_str(PEER_INSTRUCTION);
    prompt
}

/// A debate round, identified by its zero-based index.
///
/// Performs no retries; completion failures are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebateRound {
    index: usize,
}

impl DebateRound {
    /// Creates the round with the given zero-based index.
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Zero-based round index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true for the opening round.
    pub fn is_opening(&self) -> bool {
        self.index == 0
    }

    /// Peers' non-empty replies from the previous round, in agent order.
    ///
    /// Never includes `agent`'s own reply.
    pub fn visible_peer_replies<'a>(
        &self,
        contexts: &'a [AgentContext],
        agent: usize,
    ) -> Vec<&'a str> {
        if self.is_opening() {
            return Vec::new();
        }

        contexts
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != agent)
            .filter_map(|(_, ctx)| ctx.reply(self.index - 1))
            .filter(|reply| !reply.trim().is_empty())
            .collect()
    }

    /// Appends the peer prompt to `agent`'s context. No-op in the opening
    /// round, where the question is already the pending user turn.
    pub fn prepare(&self, contexts: &mut [AgentContext], agent: usize) -> AgoraResult<()> {
        if self.is_opening() {
            return Ok(());
        }

        let prompt = peer_prompt(&self.visible_peer_replies(contexts, agent));
        contexts[agent].append(Role::User, prompt)
    }

    /// Requests the agent's reply for this round.
    pub async fn request(
        &self,
        completer: &dyn Completer,
        context: &AgentContext,
    ) -> CompletionResult<String> {
        let reply = completer.complete(context.turns()).await?;
        tracing::debug!(
            agent = context.agent(),
            round = self.index,
            chars = reply.len(),
            "Agent replied"
        );
        Ok(reply)
    }

    /// Appends the reply as the agent's assistant turn.
    ///
    /// An empty reply is logged and recorded as an empty turn.
    pub fn record(&self, context: &mut AgentContext, reply: String) {
        if let Err(e) = context.append(Role::Assistant, reply) {
            tracing::warn!(round = self.index, "{}", e);
            context.append_empty_reply();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contexts_after_opening(replies: &[&str]) -> Vec<AgentContext> {
        replies
            .iter()
            .enumerate()
            .map(|(i, reply)| {
                let mut ctx = AgentContext::new(i, "Is the sky blue?");
                DebateRound::new(0).record(&mut ctx, reply.to_string());
                ctx
            })
            .collect()
    }

    #[test]
    fn test_opening_round_adds_no_prompt() {
        let mut contexts = vec![AgentContext::new(0, "q")];
        DebateRound::new(0).prepare(&mut contexts, 0).unwrap();
        assert_eq!(contexts[0].len(), 1);
    }

    #[test]
    fn test_peers_exclude_self() {
        let contexts = contexts_after_opening(&["zero (yes)", "one (no)", "two (yes)"]);
        let round = DebateRound::new(1);

        assert_eq!(
            round.visible_peer_replies(&contexts, 1),
            vec!["zero (yes)", "two (yes)"]
        );
    }

    #[test]
    fn test_peer_prompt_template() {
        let prompt = peer_prompt(&["A (yes)", "B (no)"]);

        assert!(prompt.starts_with(PEER_HEADER));
        assert!(prompt.contains("\n\n One agent solution: ```A (yes)```"));
        assert!(prompt.contains("\n\n One agent solution: ```B (no)```"));
        assert!(prompt.ends_with("For example: (yes), (123.45), (A)"));
    }

    #[test]
    fn test_single_agent_gets_solo_prompt() {
        let mut contexts = contexts_after_opening(&["alone (yes)"]);
        DebateRound::new(1).prepare(&mut contexts, 0).unwrap();

        assert_eq!(contexts[0].turns()[2].content, SOLO_PROMPT);
    }

    #[test]
    fn test_empty_peer_replies_are_hidden() {
        let contexts = contexts_after_opening(&["(yes)", ""]);
        assert!(DebateRound::new(1)
            .visible_peer_replies(&contexts, 0)
            .is_empty());
    }

    #[test]
    fn test_record_empty_reply() {
        let mut ctx = AgentContext::new(0, "q");
        DebateRound::new(0).record(&mut ctx, String::new());

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.last().unwrap(), "");
    }

    #[test]
    fn test_later_round_reads_previous_round() {
        let mut contexts = contexts_after_opening(&["r0 a0", "r0 a1"]);
        let round1 = DebateRound::new(1);
        for agent in 0..2 {
            round1.prepare(&mut contexts, agent).unwrap();
            round1.record(&mut contexts[agent], format!("r1 a{}", agent));
        }

        let round2 = DebateRound::new(2);
        assert_eq!(round2.visible_peer_replies(&contexts, 0), vec!["r1 a1"]);
    }
}
