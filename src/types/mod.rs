//! Core data types for the stable matching engine.
//!
//! ## Types
//!
//! - [`Agent`]: one participant in the market, with its preference list
//! - [`Group`]: Proposer or Responder
//! - [`Pairing`]: a tentative or final (proposer, responder) tie
//! - [`MatchReport`]: per-run output summary
//! - [`MatchError`]: the complete error taxonomy
//!
//! ## Identifiers
//!
//! Agents carry dense `u64` ids, numbered `0..N` within each group. Dense
//! ids make the preference inverse table a plain vector lookup and rule out
//! any unbounded "retry until unique" construction loop. Human-readable
//! display names are generated separately (see `population::names`).

mod agent;
mod error;
mod pairing;
mod report;

// Re-export all types at module level
pub use agent::{Agent, AgentId, Group};
pub use error::MatchError;
pub use pairing::Pairing;
pub use report::MatchReport;
