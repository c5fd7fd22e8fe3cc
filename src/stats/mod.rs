//! Rank-index statistics over a completed matching.
//!
//! ## Rank Index
//!
//! For each pairing, the proposer rank index is the 1-based position of
//! the matched responder in the proposer's preference list, and the
//! responder rank index is the symmetric measure. Averaging each side over
//! all N pairs shows how well each group fared; their normalized gap is
//! the "advantage" the proposing side extracts from moving first.
//!
//! The computation is a pure read: rank sums are accumulated as integers,
//! so repeated calls on the same population return bit-identical floats
//! regardless of pairing-table iteration order.

use crate::population::Population;
use crate::types::{MatchError, MatchReport};

/// Compute the per-run report for a completed population.
///
/// `advantage_percent` is `(average_responder_index -
/// average_proposer_index) * 100 / (N - 1)`: the rank gap between the
/// groups as a percentage of the maximum possible gap. A market of one
/// pair has no possible gap and reports 0.0 by convention.
///
/// # Errors
///
/// Returns [`MatchError::NotYetSolved`] when the engine has not completed
/// on this population.
///
/// # Example
///
/// ```
/// use stable_match::{stats, MatchingEngine, Population};
///
/// let mut population = Population::from_preferences(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![vec![1, 0], vec![0, 1]],
/// ).unwrap();
/// MatchingEngine::new().solve(&mut population).unwrap();
///
/// let report = stats::report(&population).unwrap();
/// assert_eq!(report.proposal_count, 3);
/// assert_eq!(report.average_proposer_index, 1.5);
/// assert_eq!(report.average_responder_index, 1.0);
/// assert_eq!(report.advantage_percent, -50.0);
/// ```
pub fn report(population: &Population) -> Result<MatchReport, MatchError> {
    if !population.is_completed() {
        return Err(MatchError::NotYetSolved);
    }

    let size = population.size();
    let mut proposer_rank_sum: u64 = 0;
    let mut responder_rank_sum: u64 = 0;

    for pairing in population.pairing_table().values() {
        let proposer = &population.proposers()[pairing.proposer as usize];
        let responder = &population.responders()[pairing.responder as usize];

        // +1 converts the 0-based list position into a 1-based rank index
        proposer_rank_sum += u64::from(proposer.rank_of(pairing.responder)) + 1;
        responder_rank_sum += u64::from(responder.rank_of(pairing.proposer)) + 1;
    }

    let average_proposer_index = proposer_rank_sum as f64 / size as f64;
    let average_responder_index = responder_rank_sum as f64 / size as f64;

    let advantage_percent = if size > 1 {
        (average_responder_index - average_proposer_index) * 100.0 / (size - 1) as f64
    } else {
        0.0
    };

    Ok(MatchReport::new(
        population.proposal_count(),
        average_proposer_index,
        average_responder_index,
        advantage_percent,
    ))
}

// ============================================================================
// Unit Tests
// ============================================================================
