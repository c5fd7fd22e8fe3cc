//! Matching engine module: proposer-optimal deferred acceptance.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: fixed lowest-id tie-break, no randomness in the loop
//! 2. **Single ownership**: the engine borrows one population mutably and
//!    is the only writer of availability and pairings during a run
//! 3. **Bounded termination**: at most one proposal per ordered
//!    (proposer, responder) pair, so at most N*N proposals total
//! 4. **Synchronous execution**: the loop is pure CPU work, no suspension
//!
//! ## Algorithm
//!
//! Free proposers repeatedly propose to their most-preferred responder not
//! yet tried; responders tentatively hold the best offer seen so far,
//! upgrading and rejecting as better offers arrive. The procedure
//! terminates in a stable matching that is weakly best for every proposer.
//!
//! ## Example
//!
//! ```
//! use stable_match::{MatchingEngine, Population};
//!
//! // A,B propose; X,Y respond. Both proposers want X first.
//! let mut population = Population::from_preferences(
//!     vec![vec![0, 1], vec![0, 1]],
//!     vec![vec![1, 0], vec![0, 1]],
//! ).unwrap();
//!
//! MatchingEngine::new().solve(&mut population).unwrap();
//!
//! assert!(population.is_completed());
//! assert_eq!(population.proposal_count(), 3);
//! ```

pub mod matcher;

pub use matcher::MatchingEngine;
