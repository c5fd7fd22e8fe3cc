//! Agent types for the stable matching engine.
//!
//! ## Preference Lists
//!
//! Every agent ranks the *entire* opposite group: `preferences` is a strict
//! permutation of `0..N` with index 0 the most preferred. The permutation
//! invariant is enforced at construction ([`Agent::new`]) so the engine can
//! never exhaust a list mid-run.
//!
//! ## Inverse Rank Table
//!
//! Alongside the preference list each agent stores its inverse permutation,
//! so "how does X rank Y" is a vector lookup instead of a linear scan. The
//! engine consults it on every contested proposal.

use std::collections::HashSet;
use std::fmt;

use crate::types::MatchError;

/// Identifier of an agent, dense within its group (`0..N`).
pub type AgentId = u64;

// ============================================================================
// Group enum
// ============================================================================

/// Market side an agent belongs to.
///
/// Proposers initiate proposals during deferred acceptance; Responders hold
/// the best offer seen so far. The two groups are disjoint and equal-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Proposing side - scans its own list and offers
    Proposer,
    /// Responding side - holds or upgrades tentative pairings
    Responder,
}

impl Group {
    /// Returns the opposite group
    pub fn opposite(self) -> Self {
        match self {
            Group::Proposer => Group::Responder,
            Group::Responder => Group::Proposer,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Proposer => write!(f, "proposer"),
            Group::Responder => write!(f, "responder"),
        }
    }
}

// ============================================================================
// Agent struct
// ============================================================================

/// One participant in the matching market.
///
/// ## Ownership
///
/// Agents are owned exclusively by their `Population` and are never shared
/// or aliased outside it. Availability and proposal history are run-local:
/// they start fresh at construction and are mutated only by the engine.
///
/// ## Example
///
/// ```
/// use stable_match::{Agent, Group};
///
/// let agent = Agent::new(0, Group::Proposer, "Alin".to_string(), vec![2, 0, 1])
///     .expect("valid permutation");
///
/// assert_eq!(agent.rank_of(2), 0); // most preferred
/// assert_eq!(agent.rank_of(1), 2); // least preferred
/// assert!(agent.is_available());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Agent identifier, unique within the group
    pub id: AgentId,

    /// Which side of the market this agent is on
    pub group: Group,

    /// Display name, unique within the group
    pub name: String,

    /// Ranked opposite-group ids, most preferred first.
    /// Always a full permutation of `0..N`.
    preferences: Vec<AgentId>,

    /// Inverse of `preferences`: `rank_of[id]` = position of `id`
    rank_of: Vec<u32>,

    /// Whether this agent is currently free (unmatched or rejected)
    available: bool,

    /// Proposers that have already proposed here (Responder-only).
    /// Guards the at-most-once-per-ordered-pair proposal bound.
    proposals_received: HashSet<AgentId>,
}

impl Agent {
    /// Create a new agent from a ranked preference list.
    ///
    /// # Arguments
    ///
    /// * `id` - Dense identifier within the group
    /// * `group` - Proposer or Responder
    /// * `name` - Display name
    /// * `preferences` - Ranked opposite-group ids, most preferred first
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::PreferenceListIncomplete`] unless `preferences`
    /// is a permutation of `0..preferences.len()`: wrong length, duplicate
    /// entries, and out-of-range ids are all rejected here, before a run can
    /// ever observe them.
    pub fn new(
        id: AgentId,
        group: Group,
        name: String,
        preferences: Vec<AgentId>,
    ) -> Result<Self, MatchError> {
        let n = preferences.len();
        let mut rank_of = vec![u32::MAX; n];

        for (rank, &other) in preferences.iter().enumerate() {
            let slot = rank_of
                .get_mut(other as usize)
                .ok_or(MatchError::PreferenceListIncomplete { group, id })?;
            if *slot != u32::MAX {
                // Duplicate entry: some other id must be missing
                return Err(MatchError::PreferenceListIncomplete { group, id });
            }
            *slot = rank as u32;
        }

        Ok(Self {
            id,
            group,
            name,
            preferences,
            rank_of,
            available: true,
            proposals_received: HashSet::new(),
        })
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    /// Ranked opposite-group ids, most preferred first
    #[inline]
    pub fn preferences(&self) -> &[AgentId] {
        &self.preferences
    }

    /// Position of `other` in this agent's preference list (0 = best).
    ///
    /// `other` is guaranteed in range because the list is a validated
    /// permutation of the opposite group.
    #[inline]
    pub fn rank_of(&self, other: AgentId) -> u32 {
        self.rank_of[other as usize]
    }

    /// Check whether this agent ranks `a` strictly above `b`
    #[inline]
    pub fn prefers(&self, a: AgentId, b: AgentId) -> bool {
        self.rank_of(a) < self.rank_of(b)
    }

    // ========================================================================
    // Run-local state (mutated by the matching engine)
    // ========================================================================

    /// Whether this agent is currently free
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Set the availability flag
    #[inline]
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Check whether `proposer` has already proposed to this agent
    #[inline]
    pub fn was_proposed_by(&self, proposer: AgentId) -> bool {
        self.proposals_received.contains(&proposer)
    }

    /// Record a proposal from `proposer`
    #[inline]
    pub fn record_proposal(&mut self, proposer: AgentId) {
        self.proposals_received.insert(proposer);
    }

    /// Number of distinct proposals this agent has received
    #[inline]
    pub fn proposals_received(&self) -> usize {
        self.proposals_received.len()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_agent(preferences: Vec<AgentId>) -> Result<Agent, MatchError> {
        Agent::new(0, Group::Proposer, "Test".to_string(), preferences)
    }

    #[test]
    fn test_group_opposite() {
        assert_eq!(Group::Proposer.opposite(), Group::Responder);
        assert_eq!(Group::Responder.opposite(), Group::Proposer);
    }

    #[test]
    fn test_group_display() {
        assert_eq!(Group::Proposer.to_string(), "proposer");
        assert_eq!(Group::Responder.to_string(), "responder");
    }

    #[test]
    fn test_agent_new() {
        let agent = make_agent(vec![2, 0, 1]).unwrap();

        assert_eq!(agent.id, 0);
        assert_eq!(agent.group, Group::Proposer);
        assert_eq!(agent.preferences(), &[2, 0, 1]);
        assert!(agent.is_available());
        assert_eq!(agent.proposals_received(), 0);
    }

    #[test]
    fn test_agent_rank_of() {
        let agent = make_agent(vec![2, 0, 1]).unwrap();

        assert_eq!(agent.rank_of(2), 0);
        assert_eq!(agent.rank_of(0), 1);
        assert_eq!(agent.rank_of(1), 2);
    }

    #[test]
    fn test_agent_prefers() {
        let agent = make_agent(vec![2, 0, 1]).unwrap();

        assert!(agent.prefers(2, 0));
        assert!(agent.prefers(0, 1));
        assert!(!agent.prefers(1, 2));
        assert!(!agent.prefers(2, 2));
    }

    #[test]
    fn test_agent_rejects_duplicate_preference() {
        let err = make_agent(vec![0, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            MatchError::PreferenceListIncomplete {
                group: Group::Proposer,
                id: 0,
            }
        );
    }

    #[test]
    fn test_agent_rejects_out_of_range_preference() {
        let err = make_agent(vec![0, 1, 3]).unwrap_err();
        assert!(matches!(err, MatchError::PreferenceListIncomplete { .. }));
    }

    #[test]
    fn test_agent_empty_preferences() {
        // A zero-length list is (vacuously) a permutation of an empty group;
        // population-level validation rejects N = 0 before agents are built.
        let agent = make_agent(vec![]).unwrap();
        assert!(agent.preferences().is_empty());
    }

    #[test]
    fn test_agent_availability() {
        let mut agent = make_agent(vec![0, 1, 2]).unwrap();

        assert!(agent.is_available());
        agent.set_available(false);
        assert!(!agent.is_available());
        agent.set_available(true);
        assert!(agent.is_available());
    }

    #[test]
    fn test_agent_proposal_history() {
        let mut agent = make_agent(vec![0, 1, 2]).unwrap();

        assert!(!agent.was_proposed_by(1));
        agent.record_proposal(1);
        assert!(agent.was_proposed_by(1));
        assert!(!agent.was_proposed_by(2));

        // Re-recording the same proposer is idempotent
        agent.record_proposal(1);
        assert_eq!(agent.proposals_received(), 1);
    }

    #[test]
    fn test_agent_display_uses_name() {
        let agent = Agent::new(3, Group::Responder, "Mira".to_string(), vec![0]).unwrap();
        assert_eq!(agent.to_string(), "Mira");
    }
}
