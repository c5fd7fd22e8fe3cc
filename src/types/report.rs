//! Per-run output summary of a solved matching market.
//!
//! The `MatchReport` carries the four fields a simulation harness consumes
//! per run: the proposal count and the rank-index statistics for both
//! groups. Sweeping population sizes, averaging trials, and tabulation are
//! the caller's concern; the report itself is plain data.

use crate::types::MatchError;

/// Summary statistics of one completed matching run.
///
/// ## Rank Index
///
/// The rank index of an agent is the 1-based position of its actual partner
/// within its own preference list: 1.0 means everyone got their first
/// choice, N means everyone got their last.
///
/// ## Advantage
///
/// `advantage_percent` normalizes the gap between the two group averages by
/// the maximum possible gap (N - 1): positive values mean the proposing
/// side ended up with better-ranked partners. Defined as 0.0 for N = 1.
///
/// ## Example
///
/// ```
/// use stable_match::MatchReport;
///
/// let report = MatchReport::new(3, 1.5, 1.0, -50.0);
/// assert_eq!(report.proposal_count, 3);
/// assert_eq!(report.advantage_percent, -50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchReport {
    /// Total proposals issued before the market settled
    pub proposal_count: u64,

    /// Mean proposer rank index across all N pairs
    pub average_proposer_index: f64,

    /// Mean responder rank index across all N pairs
    pub average_responder_index: f64,

    /// Normalized proposer advantage, as a percentage of the maximum
    /// possible rank gap (N - 1). May be negative.
    pub advantage_percent: f64,
}

impl MatchReport {
    /// Create a new report
    pub fn new(
        proposal_count: u64,
        average_proposer_index: f64,
        average_responder_index: f64,
        advantage_percent: f64,
    ) -> Self {
        Self {
            proposal_count,
            average_proposer_index,
            average_responder_index,
            advantage_percent,
        }
    }

    /// Copy of this report with all float fields rounded to 2 decimal
    /// places, the precision used for tabulated reporting.
    pub fn rounded(&self) -> Self {
        Self {
            proposal_count: self.proposal_count,
            average_proposer_index: round2(self.average_proposer_index),
            average_responder_index: round2(self.average_responder_index),
            advantage_percent: round2(self.advantage_percent),
        }
    }

    /// Element-wise mean of several reports, one per independent trial.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotYetSolved`] when `reports` is empty, since
    /// there is no completed run to aggregate.
    pub fn mean(reports: &[MatchReport]) -> Result<Self, MatchError> {
        if reports.is_empty() {
            return Err(MatchError::NotYetSolved);
        }

        let count = reports.len() as f64;
        let proposal_sum: u64 = reports.iter().map(|r| r.proposal_count).sum();

        Ok(Self {
            // Integer field is averaged with rounding to the nearest count
            proposal_count: ((proposal_sum as f64) / count).round() as u64,
            average_proposer_index: reports
                .iter()
                .map(|r| r.average_proposer_index)
                .sum::<f64>()
                / count,
            average_responder_index: reports
                .iter()
                .map(|r| r.average_responder_index)
                .sum::<f64>()
                / count,
            advantage_percent: reports.iter().map(|r| r.advantage_percent).sum::<f64>() / count,
        })
    }
}

/// Round to 2 decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Unit Tests
// ============================================================================
