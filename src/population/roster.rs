//! Population: the owner of all agents and the pairing table.
//!
//! ## Architecture
//!
//! The population mirrors the split the matching engine expects:
//!
//! - **Agent vectors**: dense-id storage, `id == index`, one per group
//! - **Pairing table**: responder id -> current [`Pairing`], replacement
//!   semantics (a responder upgrading drops its old tie)
//! - **Run state**: `completed` flag and the recorded proposal count
//!
//! ## Lifecycle
//!
//! A population is built once, solved exactly once by the engine, and then
//! read any number of times by statistics. Re-running the engine on a
//! completed population is an error, not a no-op; independent trials build
//! independent fresh populations.
//!
//! ## Example
//!
//! ```
//! use stable_match::{MatchingEngine, Population};
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let mut population = Population::new(10, &mut rng).unwrap();
//!
//! MatchingEngine::new().solve(&mut population).unwrap();
//!
//! assert!(population.is_completed());
//! assert_eq!(population.pairing_table().len(), 10);
//! ```

use std::collections::HashMap;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::population::{NameGenerator, PreferenceModel, UniformPreferences};
use crate::types::{Agent, AgentId, Group, MatchError, Pairing};

/// A two-sided matching market: N proposers, N responders, and the
/// evolving pairing table the engine drives to a stable state.
#[derive(Debug, Clone)]
pub struct Population {
    /// Proposer-side agents, `id == index`
    proposers: Vec<Agent>,

    /// Responder-side agents, `id == index`
    responders: Vec<Agent>,

    /// Current pairings, keyed by responder id
    pairing_table: HashMap<AgentId, Pairing>,

    /// Set once the engine has driven the market to a stable state
    completed: bool,

    /// Total proposals issued by the engine run
    proposal_count: u64,
}

impl Population {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a population of `size` agents per group with uniformly random
    /// preference permutations and generated display names.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidPopulationSize`] when `size < 1`
    /// - [`MatchError::NameGenerationExhausted`] when the display-name
    ///   attempt budget runs out
    pub fn new<R: Rng>(size: usize, rng: &mut R) -> Result<Self, MatchError> {
        Self::with_model(size, &UniformPreferences, rng)
    }

    /// Build a population with an injected preference-generation strategy.
    ///
    /// The model output is validated agent by agent, so a faulty model
    /// surfaces as [`MatchError::PreferenceListIncomplete`] here rather
    /// than corrupting a run later.
    pub fn with_model<R: Rng>(
        size: usize,
        model: &dyn PreferenceModel,
        rng: &mut R,
    ) -> Result<Self, MatchError> {
        if size < 1 {
            return Err(MatchError::InvalidPopulationSize { size });
        }

        let generator = NameGenerator::new();
        let proposer_names = generator.generate(rng, size)?;
        let responder_names = generator.generate(rng, size)?;

        let ids: Vec<AgentId> = (0..size as AgentId).collect();

        let mut proposers = Vec::with_capacity(size);
        for (id, name) in proposer_names.into_iter().enumerate() {
            let preferences = model.rank(rng, &ids);
            proposers.push(Agent::new(id as AgentId, Group::Proposer, name, preferences)?);
        }

        let mut responders = Vec::with_capacity(size);
        for (id, name) in responder_names.into_iter().enumerate() {
            let preferences = model.rank(rng, &ids);
            responders.push(Agent::new(
                id as AgentId,
                Group::Responder,
                name,
                preferences,
            )?);
        }

        Ok(Self {
            proposers,
            responders,
            pairing_table: HashMap::with_capacity(size),
            completed: false,
            proposal_count: 0,
        })
    }

    /// Build a population from explicit preference lists, one per agent,
    /// each a permutation of the opposite group's ids.
    ///
    /// Display names are synthesized as `P0..` / `R0..`. This is the
    /// constructor for hand-built golden scenarios and callers with fixed
    /// preference profiles.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidPopulationSize`] when the groups are empty or
    ///   of unequal size
    /// - [`MatchError::PreferenceListIncomplete`] when any list is not a
    ///   full permutation of the opposite group
    pub fn from_preferences(
        proposer_prefs: Vec<Vec<AgentId>>,
        responder_prefs: Vec<Vec<AgentId>>,
    ) -> Result<Self, MatchError> {
        let size = proposer_prefs.len();
        if size < 1 {
            return Err(MatchError::InvalidPopulationSize { size });
        }
        if responder_prefs.len() != size {
            return Err(MatchError::InvalidPopulationSize {
                size: responder_prefs.len(),
            });
        }

        let mut proposers = Vec::with_capacity(size);
        for (id, preferences) in proposer_prefs.into_iter().enumerate() {
            if preferences.len() != size {
                return Err(MatchError::PreferenceListIncomplete {
                    group: Group::Proposer,
                    id: id as AgentId,
                });
            }
            proposers.push(Agent::new(
                id as AgentId,
                Group::Proposer,
                format!("P{}", id),
                preferences,
            )?);
        }

        let mut responders = Vec::with_capacity(size);
        for (id, preferences) in responder_prefs.into_iter().enumerate() {
            if preferences.len() != size {
                return Err(MatchError::PreferenceListIncomplete {
                    group: Group::Responder,
                    id: id as AgentId,
                });
            }
            responders.push(Agent::new(
                id as AgentId,
                Group::Responder,
                format!("R{}", id),
                preferences,
            )?);
        }

        Ok(Self {
            proposers,
            responders,
            pairing_table: HashMap::with_capacity(size),
            completed: false,
            proposal_count: 0,
        })
    }

    // ========================================================================
    // Size and State
    // ========================================================================

    /// Number of agents per group
    #[inline]
    pub fn size(&self) -> usize {
        self.proposers.len()
    }

    /// Whether the engine has driven this market to a stable state
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Total proposals issued; 0 until the engine completes
    #[inline]
    pub fn proposal_count(&self) -> u64 {
        self.proposal_count
    }

    /// Proposer-side agents, indexed by id
    #[inline]
    pub fn proposers(&self) -> &[Agent] {
        &self.proposers
    }

    /// Responder-side agents, indexed by id
    #[inline]
    pub fn responders(&self) -> &[Agent] {
        &self.responders
    }

    /// Proposer by id
    #[inline]
    pub fn proposer(&self, id: AgentId) -> Option<&Agent> {
        self.proposers.get(id as usize)
    }

    /// Responder by id
    #[inline]
    pub fn responder(&self, id: AgentId) -> Option<&Agent> {
        self.responders.get(id as usize)
    }

    /// Current pairings, keyed by responder id
    #[inline]
    pub fn pairing_table(&self) -> &HashMap<AgentId, Pairing> {
        &self.pairing_table
    }

    // ========================================================================
    // Market Access (for matching engine)
    // ========================================================================

    /// Lowest-id proposer that is still free.
    ///
    /// The fixed lowest-id tie-break keeps runs deterministic for golden
    /// tests; the linear rescan is within budget at target market sizes.
    pub fn first_available_proposer(&self) -> Option<AgentId> {
        self.proposers
            .iter()
            .find(|agent| agent.is_available())
            .map(|agent| agent.id)
    }

    /// Highest-ranked responder `proposer` has not yet proposed to.
    ///
    /// Returns `None` only if the proposer has exhausted its entire list,
    /// which a validated population cannot reach.
    pub fn next_proposal_target(&self, proposer: AgentId) -> Option<AgentId> {
        self.proposers[proposer as usize]
            .preferences()
            .iter()
            .copied()
            .find(|&responder| !self.responders[responder as usize].was_proposed_by(proposer))
    }

    /// Record that `proposer` proposed to `responder`
    pub fn record_proposal(&mut self, proposer: AgentId, responder: AgentId) {
        self.responders[responder as usize].record_proposal(proposer);
    }

    /// Current partner of `responder`, if any
    #[inline]
    pub fn responder_partner(&self, responder: AgentId) -> Option<AgentId> {
        self.pairing_table
            .get(&responder)
            .map(|pairing| pairing.proposer)
    }

    /// Whether `responder` ranks `challenger` strictly above `incumbent`
    #[inline]
    pub fn responder_prefers(
        &self,
        responder: AgentId,
        challenger: AgentId,
        incumbent: AgentId,
    ) -> bool {
        self.responders[responder as usize].prefers(challenger, incumbent)
    }

    /// Tie `proposer` to `responder`, freeing the responder's previous
    /// partner if the pairing is an upgrade replacement.
    pub fn engage(&mut self, proposer: AgentId, responder: AgentId) {
        if let Some(previous) = self.pairing_table.get(&responder) {
            self.proposers[previous.proposer as usize].set_available(true);
        }

        self.proposers[proposer as usize].set_available(false);
        self.responders[responder as usize].set_available(false);
        self.pairing_table
            .insert(responder, Pairing::new(proposer, responder));
    }

    /// Seal the run: set the completed flag and record the proposal count
    pub fn mark_completed(&mut self, proposal_count: u64) {
        self.completed = true;
        self.proposal_count = proposal_count;
    }

    // ========================================================================
    // Fingerprint
    // ========================================================================

    /// SHA-256 fingerprint of the pairing table, in responder-id order.
    ///
    /// Two runs over identically-seeded populations must produce equal
    /// fingerprints; the stress suite leans on this for its determinism
    /// check.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for responder in 0..self.size() as AgentId {
            if let Some(pairing) = self.pairing_table.get(&responder) {
                hasher.update(pairing.responder.to_le_bytes());
                hasher.update(pairing.proposer.to_le_bytes());
            }
        }

        let mut fingerprint = [0u8; 32];
        fingerprint.copy_from_slice(&hasher.finalize());
        fingerprint
    }

    /// Fingerprint as a hex string, for table and log output
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
