//! Unique display-name generation for market agents.
//!
//! Agent identity is carried by dense integer ids; display names exist for
//! human-readable roster and pairing output. Names are assembled from
//! syllables with the population's injected `Rng`, deduplicated within a
//! group, and drawn under a fixed attempt budget so construction can never
//! loop unboundedly on collisions.

use std::collections::HashSet;

use rand::{Rng, RngCore};

use crate::types::MatchError;

/// Syllable onsets
const ONSETS: &[&str] = &[
    "b", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "z", "br", "dr",
    "kr", "th",
];

/// Syllable nuclei
const NUCLEI: &[&str] = &["a", "e", "i", "o", "u", "ai", "ea", "ia", "io", "ou"];

/// Syllable codas (empty = open syllable)
const CODAS: &[&str] = &["", "", "", "l", "n", "r", "s", "m", "x", "th"];

/// Default attempt budget per requested name
const DEFAULT_ATTEMPTS_PER_NAME: usize = 64;

/// Generator of unique, pronounceable display names.
///
/// ## Attempt Budget
///
/// The generator spends at most `attempts_per_name * requested` draws in
/// total. Exceeding the budget fails with
/// [`MatchError::NameGenerationExhausted`] instead of spinning; with the
/// default budget and a syllable space of several hundred thousand
/// combinations this only happens for deliberately tiny budgets or absurd
/// batch sizes.
///
/// ## Example
///
/// ```
/// use stable_match::NameGenerator;
/// use rand::SeedableRng;
///
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
/// let names = NameGenerator::new().generate(&mut rng, 10).unwrap();
///
/// assert_eq!(names.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct NameGenerator {
    attempts_per_name: usize,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator {
    /// Create a generator with the default attempt budget
    pub fn new() -> Self {
        Self {
            attempts_per_name: DEFAULT_ATTEMPTS_PER_NAME,
        }
    }

    /// Create a generator with a custom per-name attempt budget
    pub fn with_attempt_budget(attempts_per_name: usize) -> Self {
        Self { attempts_per_name }
    }

    /// Draw `requested` unique names.
    ///
    /// # Errors
    ///
    /// [`MatchError::NameGenerationExhausted`] once the total attempt
    /// budget is spent before `requested` unique names were drawn.
    pub fn generate(
        &self,
        rng: &mut dyn RngCore,
        requested: usize,
    ) -> Result<Vec<String>, MatchError> {
        let budget = self.attempts_per_name.saturating_mul(requested);
        let mut seen: HashSet<String> = HashSet::with_capacity(requested);
        let mut names = Vec::with_capacity(requested);
        let mut attempts = 0;

        while names.len() < requested {
            if attempts >= budget {
                return Err(MatchError::NameGenerationExhausted {
                    attempts,
                    generated: names.len(),
                    requested,
                });
            }
            attempts += 1;

            let candidate = draw_name(rng);
            if seen.insert(candidate.clone()) {
                names.push(candidate);
            }
        }

        Ok(names)
    }
}

/// Assemble one candidate name from 2-3 syllables, capitalized
fn draw_name(rng: &mut dyn RngCore) -> String {
    let syllables = rng.gen_range(2..=3);
    let mut name = String::new();

    for i in 0..syllables {
        name.push_str(ONSETS[rng.gen_range(0..ONSETS.len())]);
        name.push_str(NUCLEI[rng.gen_range(0..NUCLEI.len())]);
        // Only the final syllable takes a coda, keeps names pronounceable
        if i == syllables - 1 {
            name.push_str(CODAS[rng.gen_range(0..CODAS.len())]);
        }
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => name,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
