//! Error taxonomy for the stable matching engine.
//!
//! All variants are programmer/caller errors surfaced immediately and
//! synchronously. None are transient, so none are retried internally, and
//! the engine never produces a partially-stable result: any invariant
//! violation aborts the run.

use thiserror::Error;

use crate::types::{AgentId, Group};

/// Errors surfaced by population construction, the matching engine, and
/// statistics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Population size below 1 at construction. Unrecoverable; the caller
    /// must fix its input.
    #[error("population size must be at least 1 (got {size})")]
    InvalidPopulationSize {
        /// The rejected size
        size: usize,
    },

    /// The unique display-name attempt budget was exceeded during
    /// construction. A configuration problem, not retried automatically.
    #[error(
        "display name generation exhausted after {attempts} attempts \
         ({generated} of {requested} names drawn)"
    )]
    NameGenerationExhausted {
        /// Attempts spent before giving up
        attempts: usize,
        /// Unique names drawn before exhaustion
        generated: usize,
        /// Unique names that were requested
        requested: usize,
    },

    /// A preference list is not a full permutation of the opposite group.
    /// Caught by construction-time validation, never discovered mid-run.
    #[error("{group} {id}: preference list is not a permutation of the opposite group")]
    PreferenceListIncomplete {
        /// Group of the offending agent
        group: Group,
        /// Id of the offending agent
        id: AgentId,
    },

    /// The engine was invoked on a population that is already solved.
    #[error("population is already solved; build a fresh population per run")]
    AlreadySolved,

    /// Statistics were requested before the engine completed.
    #[error("population is not solved yet; run the matching engine first")]
    NotYetSolved,

    /// Defensive guard: the proposal count exceeded the N*N bound, which
    /// indicates a data-model invariant violation upstream.
    #[error("engine did not terminate: {proposals} proposals exceeds bound {bound}")]
    EngineDidNotTerminate {
        /// Proposals issued when the guard tripped
        proposals: u64,
        /// The N*N proposal bound
        bound: u64,
    },
}

// ============================================================================
// Unit Tests
// ============================================================================
