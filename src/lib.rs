//! # Stable Match
//!
//! Deferred-acceptance (Gale-Shapley) stable matching engine for two-sided
//! markets.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: core data structures (Agent, Pairing, MatchReport, errors)
//! - **Population**: construction and ownership of both agent groups and
//!   the evolving pairing table
//! - **Engine**: the proposer-optimal deferred-acceptance loop
//! - **Stats**: rank-index statistics over a completed matching
//!
//! ## Design Principles
//!
//! 1. **Determinism**: a fixed seed reproduces the exact population and
//!    therefore the exact matching; the engine itself is randomness-free
//! 2. **Single Ownership**: a population exclusively owns its agents and
//!    pairing table; agents are never shared or aliased outside it
//! 3. **Bounded Termination**: at most one proposal per ordered pair, so
//!    at most N*N proposals, with a defensive guard behind the proof
//! 4. **One Run Per Population**: solving is not re-entrant; independent
//!    trials build independent fresh populations
//!
//! ## Example
//!
//! ```
//! use stable_match::{stats, MatchingEngine, Population};
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//!
//! // Build a market of 20 proposers and 20 responders with uniformly
//! // random preference permutations
//! let mut population = Population::new(20, &mut rng).unwrap();
//!
//! // Drive it to a stable, proposer-optimal matching
//! MatchingEngine::new().solve(&mut population).unwrap();
//! assert_eq!(population.pairing_table().len(), 20);
//!
//! // Read the per-run statistics
//! let report = stats::report(&population).unwrap();
//! assert!(report.average_proposer_index >= 1.0);
//! assert!(report.proposal_count <= 400);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Agent, Group, Pairing, MatchReport, MatchError
pub mod types;

/// Population: construction and ownership of the market state
pub mod population;

/// Matching engine: proposer-optimal deferred acceptance
pub mod engine;

/// Statistics: rank-index metrics over a completed matching
pub mod stats;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::MatchingEngine;
pub use population::{NameGenerator, Population, PreferenceModel, UniformPreferences};
pub use types::{Agent, AgentId, Group, MatchError, MatchReport, Pairing};
