//! Preference-generation strategies.
//!
//! The model a population is built with decides how each agent ranks the
//! opposite group. The shipped [`UniformPreferences`] draws a uniformly
//! random permutation; the trait is the extension point for correlated
//! models (e.g. rankings skewed toward globally popular agents) without
//! touching construction or the engine.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::types::AgentId;

/// Strategy that produces one agent's ranked preference list.
///
/// Implementations must return a permutation of `candidates`: every id
/// exactly once, most preferred first. Population construction validates
/// the permutation property regardless, so a faulty model fails fast at
/// build time rather than corrupting a run.
pub trait PreferenceModel {
    /// Rank `candidates` for one agent, most preferred first
    fn rank(&self, rng: &mut dyn RngCore, candidates: &[AgentId]) -> Vec<AgentId>;
}

/// Uniformly random strict rankings: every permutation of the opposite
/// group is equally likely, independently per agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPreferences;

impl PreferenceModel for UniformPreferences {
    fn rank(&self, rng: &mut dyn RngCore, candidates: &[AgentId]) -> Vec<AgentId> {
        let mut ranked = candidates.to_vec();
        ranked.shuffle(rng);
        ranked
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
