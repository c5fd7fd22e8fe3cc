//! Population: construction and ownership of the matching market state.
//!
//! ## Architecture
//!
//! The population is the sole owner of every [`Agent`](crate::Agent) on
//! both sides of the market and of the evolving pairing table:
//!
//! - **Roster**: the `Population` struct itself, with construction,
//!   validation, and the targeted mutable accessors the engine drives
//! - **Names**: bounded-attempt unique display-name generation
//! - **Prefs**: pluggable preference-generation strategies
//!
//! ## Reproducibility
//!
//! Every random decision (display names, preference permutations) flows
//! through an injected `Rng`, so a fixed seed reproduces the exact same
//! population and therefore the exact same matching.

mod names;
mod prefs;
mod roster;

pub use names::NameGenerator;
pub use prefs::{PreferenceModel, UniformPreferences};
pub use roster::Population;
