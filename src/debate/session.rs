//! Full multi-round debate over one question.

use std::time::Duration;

use uuid::Uuid;

use crate::completers::Completer;
use crate::types::config::DebateConfig;
use crate::types::question::{Question, Turn};
use crate::{AgoraError, AgoraResult};

use super::context::AgentContext;
use super::round::DebateRound;

/// Fixed-delay retry policy for failed completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Sleep between attempts.
    pub delay: Duration,
    /// Retries allowed after the first failure; `None` retries forever.
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    /// Bounded policy.
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            delay,
            max_retries: Some(max_retries),
        }
    }

    /// Retries until the completer answers.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_retries: None,
        }
    }

    /// Returns true if another attempt is allowed after `failures` failures.
    pub fn allows_retry(&self, failures: u32) -> bool {
        self.max_retries.map_or(true, |max| failures <= max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(20), 1000)
    }
}

/// Shape of a debate, fixed for every session of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebateSettings {
    pub agents: usize,
    pub rounds: usize,
    pub retry: RetryPolicy,
}

impl DebateSettings {
    /// Creates settings with the default retry policy.
    pub fn new(agents: usize, rounds: usize) -> Self {
        Self {
            agents,
            rounds,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds settings from configuration.
    pub fn from_config(config: &DebateConfig) -> Self {
        let delay = Duration::from_secs(config.retry_delay_secs);
        let retry = if config.retry_forever {
            RetryPolicy::unbounded(delay)
        } else {
            RetryPolicy::fixed(delay, config.max_retries)
        };

        Self::new(config.agents, config.rounds).with_retry(retry)
    }

    /// Checks that a debate with these settings can produce answers.
    pub fn validate(&self) -> AgoraResult<()> {
        if self.agents == 0 {
            return Err(AgoraError::config("debate needs at least one agent"));
        }
        if self.rounds == 0 {
            return Err(AgoraError::config("debate needs at least one round"));
        }
        Ok(())
    }
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Round(usize),
    Extract,
    Done,
    Failed,
}

/// Debate over a single question.
///
/// Owns one [`AgentContext`] per agent. Agents are advanced strictly one at a
/// time, in agent order, so every round reads completed peer replies.
pub struct DebateSession<'q> {
    id: Uuid,
    question: &'q Question,
    settings: DebateSettings,
    contexts: Vec<AgentContext>,
    state: SessionState,
}

impl<'q> DebateSession<'q> {
    /// Creates a session with every agent seeded with the question.
    pub fn new(question: &'q Question, settings: DebateSettings) -> Self {
        let contexts = (0..settings.agents)
            .map(|agent| AgentContext::new(agent, question.prompt.clone()))
            .collect();

        Self {
            id: Uuid::new_v4(),
            question,
            settings,
            contexts,
            state: SessionState::Init,
        }
    }

    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Question under debate.
    pub fn question(&self) -> &Question {
        self.question
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Agent contexts, in agent order.
    pub fn contexts(&self) -> &[AgentContext] {
        &self.contexts
    }

    /// Runs every round and returns the agents' terminal texts.
    ///
    /// Agents whose final reply is empty are left out, so the result holds at
    /// most one text per agent.
    pub async fn run(&mut self, completer: &dyn Completer) -> AgoraResult<Vec<String>> {
        match self.run_rounds(completer).await {
            Ok(texts) => {
                self.state = SessionState::Done;
                Ok(texts)
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    async fn run_rounds(&mut self, completer: &dyn Completer) -> AgoraResult<Vec<String>> {
        self.settings.validate()?;

        for index in 0..self.settings.rounds {
            self.state = SessionState::Round(index);
            let round = DebateRound::new(index);

            for agent in 0..self.contexts.len() {
                round.prepare(&mut self.contexts, agent)?;
                let reply = self.complete_with_retry(&round, agent, completer).await?;
                round.record(&mut self.contexts[agent], reply);
            }
        }

        self.state = SessionState::Extract;
        self.terminal_texts()
    }

    async fn complete_with_retry(
        &self,
        round: &DebateRound,
        agent: usize,
        completer: &dyn Completer,
    ) -> AgoraResult<String> {
        let retry = self.settings.retry;
        let mut failures: u32 = 0;

        loop {
            match round.request(completer, &self.contexts[agent]).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    failures += 1;
                    if !retry.allows_retry(failures) {
                        return Err(AgoraError::RetryExhausted {
                            agent,
                            round: round.index(),
                            attempts: failures,
                            last_error: e,
                        });
                    }

                    tracing::warn!(
                        session = %self.id,
                        agent,
                        round = round.index(),
                        failures,
                        "{}; retrying in {:?}",
                        e,
                        retry.delay
                    );
                    tokio::time::sleep(retry.delay).await;
                }
            }
        }
    }

    /// Final reply of every agent that produced a non-empty one.
    pub fn terminal_texts(&self) -> AgoraResult<Vec<String>> {
        let mut texts = Vec::with_capacity(self.contexts.len());
        for ctx in &self.contexts {
            let text = ctx.last()?;
            if text.trim().is_empty() {
                tracing::debug!(agent = ctx.agent(), "Skipping agent with empty final reply");
                continue;
            }
            texts.push(text.to_string());
        }
        Ok(texts)
    }

    /// Consumes the session, returning each agent's conversation.
    pub fn into_transcripts(self) -> Vec<Vec<Turn>> {
        self.contexts
            .into_iter()
            .map(AgentContext::into_turns)
            .collect()
    }
}
