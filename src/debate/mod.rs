//! Multi-agent debate protocol.
//!
//! Several agents answer the same question independently, then over the
//! following rounds each agent reads its peers' latest replies and revises
//! its own answer.
//!
//! ## Flow
//!
//! ```text
//! DebateSession::run
//!   └─ DebateRound(0): every agent answers the question
//!   └─ DebateRound(1..N): every agent sees peers' previous replies and answers again
//!   └─ terminal texts (one per agent with a non-empty final reply)
//! ```
//!
//! Completion failures are retried by the session with a fixed delay, per
//! agent step, up to the configured bound.

mod context;
mod round;
mod session;

pub use context::AgentContext;
pub use round::{peer_prompt, DebateRound, SOLO_PROMPT};
pub use session::{DebateSession, DebateSettings, RetryPolicy, SessionState};
