//! Deferred-acceptance (Gale-Shapley) matching loop.
//!
//! ## Termination
//!
//! Every proposal is recorded in the target responder's history before it
//! is evaluated, so each ordered (proposer, responder) pair is proposed at
//! most once and total proposals are bounded by N*N. Because every
//! preference list is a validated full permutation, a free proposer always
//! has a next responder to try; the `EngineDidNotTerminate` guard exists
//! only to fail fast if an upstream invariant is somehow violated.

use crate::population::Population;
use crate::types::{Group, MatchError};

/// The deferred-acceptance matching engine.
///
/// The engine is stateless between runs; all run state (availability,
/// proposal histories, the pairing table, the proposal count) lives on the
/// population it solves.
#[derive(Debug, Default)]
pub struct MatchingEngine;

impl MatchingEngine {
    /// Create a new matching engine
    pub fn new() -> Self {
        Self
    }

    /// Drive `population` to a stable, proposer-optimal matching.
    ///
    /// Each pass selects the lowest-id free proposer, lets it propose to
    /// its best not-yet-tried responder, and resolves the proposal:
    /// a free responder accepts tentatively; a paired responder upgrades
    /// only for a strictly better-ranked proposer, freeing its previous
    /// partner. The loop ends when no proposer is free, which for a valid
    /// population means the pairing table is complete.
    ///
    /// On success the population is sealed: `completed` is set and the
    /// proposal count recorded.
    ///
    /// # Errors
    ///
    /// - [`MatchError::AlreadySolved`] when invoked on a completed
    ///   population; one engine run per population instance
    /// - [`MatchError::PreferenceListIncomplete`] if a free proposer has
    ///   exhausted its list (unreachable after construction validation)
    /// - [`MatchError::EngineDidNotTerminate`] if the proposal count would
    ///   exceed the N*N bound
    pub fn solve(&self, population: &mut Population) -> Result<(), MatchError> {
        if population.is_completed() {
            return Err(MatchError::AlreadySolved);
        }

        let size = population.size() as u64;
        let bound = size * size;
        let mut proposals: u64 = 0;

        while let Some(proposer) = population.first_available_proposer() {
            if proposals >= bound {
                return Err(MatchError::EngineDidNotTerminate { proposals, bound });
            }

            let responder = population.next_proposal_target(proposer).ok_or(
                MatchError::PreferenceListIncomplete {
                    group: Group::Proposer,
                    id: proposer,
                },
            )?;

            population.record_proposal(proposer, responder);
            proposals += 1;

            match population.responder_partner(responder) {
                // Free responder: tentative acceptance
                None => population.engage(proposer, responder),

                // Contested: the responder upgrades only for a strictly
                // better rank; otherwise the challenger stays free and
                // tries its next choice on a later pass
                Some(incumbent) => {
                    if population.responder_prefers(responder, proposer, incumbent) {
                        population.engage(proposer, responder);
                    }
                }
            }
        }

        population.mark_completed(proposals);
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentId, Pairing};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Solve a hand-built population and return it
    fn solve(
        proposer_prefs: Vec<Vec<AgentId>>,
        responder_prefs: Vec<Vec<AgentId>>,
    ) -> Population {
        let mut population =
            Population::from_preferences(proposer_prefs, responder_prefs).unwrap();
        MatchingEngine::new().solve(&mut population).unwrap();
        population
    }

    /// Exhaustive blocking-pair check: (p, r) block the matching when both
    /// rank each other strictly above their actual partners
    fn assert_stable(population: &Population) {
        let size = population.size() as AgentId;
        let partner_of_proposer = |p: AgentId| {
            population
                .pairing_table()
                .values()
                .find(|pairing| pairing.proposer == p)
                .map(|pairing| pairing.responder)
                .unwrap()
        };

        for p in 0..size {
            let matched_r = partner_of_proposer(p);
            for r in 0..size {
                if r == matched_r {
                    continue;
                }
                let r_partner = population.responder_partner(r).unwrap();
                let p_wants_r = population.proposer(p).unwrap().prefers(r, matched_r);
                let r_wants_p = population.responder(r).unwrap().prefers(p, r_partner);
                assert!(
                    !(p_wants_r && r_wants_p),
                    "blocking pair: proposer {} and responder {}",
                    p,
                    r
                );
            }
        }
    }

    /// All permutations of 0..n, for brute-force optimality checks
    fn permutations(n: usize) -> Vec<Vec<AgentId>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut result = Vec::new();
        for rest in permutations(n - 1) {
            for slot in 0..=rest.len() {
                let mut perm = rest.clone();
                perm.insert(slot, (n - 1) as AgentId);
                result.push(perm);
            }
        }
        result
    }

    #[test]
    fn test_single_pair_market() {
        let population = solve(vec![vec![0]], vec![vec![0]]);

        assert!(population.is_completed());
        assert_eq!(population.proposal_count(), 1);
        assert_eq!(
            population.pairing_table().get(&0),
            Some(&Pairing::new(0, 0))
        );
    }

    #[test]
    fn test_two_pair_golden_scenario() {
        // A(0), B(1) both want X(0) first; X wants B, Y wants A.
        // Pass 1: A proposes X, X free, tentative A-X.
        // Pass 2: B proposes X, X upgrades to B, A freed.
        // Pass 3: A proposes Y, Y free, final A-Y.
        let population = solve(
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![1, 0], vec![0, 1]],
        );

        assert_eq!(population.proposal_count(), 3);
        assert_eq!(
            population.pairing_table().get(&0),
            Some(&Pairing::new(1, 0))
        );
        assert_eq!(
            population.pairing_table().get(&1),
            Some(&Pairing::new(0, 1))
        );
        assert_stable(&population);
    }

    #[test]
    fn test_everyone_first_choice_when_disjoint() {
        // Proposer i wants responder i first and every responder agrees
        let population = solve(
            vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]],
            vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]],
        );

        assert_eq!(population.proposal_count(), 3);
        for i in 0..3 {
            assert_eq!(
                population.pairing_table().get(&i),
                Some(&Pairing::new(i, i))
            );
        }
        assert_stable(&population);
    }

    #[test]
    fn test_worst_case_contention() {
        // All proposers share one ranking, all responders share one
        // ranking: maximal contention, proposer i ends at rank i+1
        let shared: Vec<AgentId> = vec![0, 1, 2, 3];
        let population = solve(
            vec![shared.clone(); 4],
            vec![shared.clone(); 4],
        );

        assert_stable(&population);
        // Responder lists rank proposer 0 highest, so proposer 0 keeps its
        // first choice and proposer 3 is pushed to its last
        assert_eq!(
            population.pairing_table().get(&0),
            Some(&Pairing::new(0, 0))
        );
        assert_eq!(
            population.pairing_table().get(&3),
            Some(&Pairing::new(3, 3))
        );
        assert!(population.proposal_count() <= 16);
    }

    #[test]
    fn test_matching_is_perfect() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut population = Population::new(30, &mut rng).unwrap();
        MatchingEngine::new().solve(&mut population).unwrap();

        assert_eq!(population.pairing_table().len(), 30);

        let mut proposers_seen = std::collections::HashSet::new();
        let mut responders_seen = std::collections::HashSet::new();
        for pairing in population.pairing_table().values() {
            assert!(proposers_seen.insert(pairing.proposer));
            assert!(responders_seen.insert(pairing.responder));
        }
        assert_eq!(proposers_seen.len(), 30);
        assert_eq!(responders_seen.len(), 30);

        for agent in population.proposers().iter().chain(population.responders()) {
            assert!(!agent.is_available());
        }
    }

    #[test]
    fn test_random_markets_are_stable() {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut population = Population::new(15, &mut rng).unwrap();
            MatchingEngine::new().solve(&mut population).unwrap();

            assert!(population.proposal_count() <= 15 * 15);
            assert_stable(&population);
        }
    }

    #[test]
    fn test_resolve_is_rejected_after_completion() {
        let mut population =
            Population::from_preferences(vec![vec![0]], vec![vec![0]]).unwrap();
        let engine = MatchingEngine::new();

        engine.solve(&mut population).unwrap();
        let fingerprint = population.fingerprint();

        let err = engine.solve(&mut population).unwrap_err();
        assert_eq!(err, MatchError::AlreadySolved);

        // Rejection must not have mutated the solved state
        assert_eq!(population.fingerprint(), fingerprint);
        assert_eq!(population.proposal_count(), 1);
    }

    #[test]
    fn test_proposer_optimality_two_stable_matchings() {
        // A: [X, Y], B: [Y, X]; X: [B, A], Y: [A, B].
        // Both the identity and the swap are stable; deferred acceptance
        // must pick the proposer-best one (everyone gets first choice).
        let population = solve(
            vec![vec![0, 1], vec![1, 0]],
            vec![vec![1, 0], vec![0, 1]],
        );

        assert_eq!(
            population.pairing_table().get(&0),
            Some(&Pairing::new(0, 0))
        );
        assert_eq!(
            population.pairing_table().get(&1),
            Some(&Pairing::new(1, 1))
        );
    }

    #[test]
    fn test_proposer_optimality_brute_force() {
        // Fixed 4-agent market; compare the engine's result against every
        // stable matching found by exhaustive enumeration
        let proposer_prefs = vec![
            vec![0, 1, 2, 3],
            vec![0, 3, 2, 1],
            vec![1, 0, 3, 2],
            vec![3, 1, 2, 0],
        ];
        let responder_prefs = vec![
            vec![3, 2, 1, 0],
            vec![2, 3, 0, 1],
            vec![0, 1, 2, 3],
            vec![1, 0, 2, 3],
        ];

        let population = solve(proposer_prefs.clone(), responder_prefs.clone());
        assert_stable(&population);

        let engine_partner: Vec<AgentId> = (0..4)
            .map(|p| {
                population
                    .pairing_table()
                    .values()
                    .find(|pairing| pairing.proposer == p)
                    .map(|pairing| pairing.responder)
                    .unwrap()
            })
            .collect();

        // Enumerate all stable matchings: candidate[p] = responder for p
        for candidate in permutations(4) {
            let stable = (0..4u64).all(|p| {
                (0..4u64).all(|r| {
                    if candidate[p as usize] == r {
                        return true;
                    }
                    let r_partner = (0..4u64)
                        .find(|&q| candidate[q as usize] == r)
                        .unwrap();
                    let p_wants = population
                        .proposer(p)
                        .unwrap()
                        .prefers(r, candidate[p as usize]);
                    let r_wants = population.responder(r).unwrap().prefers(p, r_partner);
                    !(p_wants && r_wants)
                })
            });
            if !stable {
                continue;
            }

            // Proposer-optimal: the engine's partner ranks at least as
            // high as this stable alternative, for every proposer
            for p in 0..4u64 {
                let agent = population.proposer(p).unwrap();
                assert!(
                    agent.rank_of(engine_partner[p as usize])
                        <= agent.rank_of(candidate[p as usize]),
                    "proposer {} would do better in {:?}",
                    p,
                    candidate
                );
            }
        }
    }

    #[test]
    fn test_exhausted_list_fails_instead_of_looping() {
        // Pre-poison proposer 0's history so every responder has already
        // "seen" it: the defensive mid-run check must fire rather than
        // scan past the end of the list
        let mut population = Population::from_preferences(
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        )
        .unwrap();
        population.record_proposal(0, 0);
        population.record_proposal(0, 1);

        let err = MatchingEngine::new().solve(&mut population).unwrap_err();
        assert_eq!(
            err,
            MatchError::PreferenceListIncomplete {
                group: Group::Proposer,
                id: 0,
            }
        );
        assert!(!population.is_completed());
    }

    #[test]
    fn test_proposal_count_bound_holds() {
        for size in [1usize, 2, 5, 20] {
            let mut rng = ChaCha8Rng::seed_from_u64(size as u64);
            let mut population = Population::new(size, &mut rng).unwrap();
            MatchingEngine::new().solve(&mut population).unwrap();

            let bound = (size * size) as u64;
            assert!(population.proposal_count() >= size as u64);
            assert!(population.proposal_count() <= bound);
        }
    }

    #[test]
    fn test_determinism_same_seed_same_matching() {
        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut population = Population::new(40, &mut rng).unwrap();
            MatchingEngine::new().solve(&mut population).unwrap();
            (population.fingerprint(), population.proposal_count())
        };

        assert_eq!(run(77), run(77));
        assert_ne!(run(77).0, run(78).0);
    }
}
