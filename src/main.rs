//! Stable Match - Binary Entry Point
//!
//! With no arguments, runs a small demonstration market: prints the
//! roster, solves it, and reports the pairings and statistics.
//!
//! With `sweep <start> <step> <points> [trials]`, runs the engine across
//! increasing population sizes (averaging `trials` independent runs per
//! size) and prints one table row per size. The classic single-trial
//! sweep from 10 to 1000 pairs:
//!
//! ```bash
//! cargo run --release -- sweep 10 10 100
//! ```

use std::env;
use std::process;
use std::time::Instant;

use stable_match::{stats, MatchError, MatchReport, MatchingEngine, Population};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        None => demo(10),
        Some("sweep") => {
            let start = parse_arg(&args, 1, "start", 10);
            let step = parse_arg(&args, 2, "step", 10);
            let points = parse_arg(&args, 3, "points", 20);
            let trials = parse_arg(&args, 4, "trials", 1);
            sweep(start, step, points, trials)
        }
        Some(other) => {
            eprintln!("unknown command: {}", other);
            eprintln!("usage: stable-match [sweep <start> <step> <points> [trials]]");
            process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

/// Positional argument with a default, exiting on unparseable input
fn parse_arg(args: &[String], index: usize, label: &str, default: usize) -> usize {
    match args.get(index) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("invalid {}: {}", label, raw);
                process::exit(2);
            }
        },
    }
}

/// Solve one small market and narrate every step of the result.
fn demo(size: usize) -> Result<(), MatchError> {
    println!("===========================================");
    println!("  Stable Match - deferred acceptance demo");
    println!("===========================================");
    println!();

    let mut rng = rand::thread_rng();
    let mut population = Population::new(size, &mut rng)?;

    println!("Roster ({} agents per group):", size);
    for agent in population.proposers() {
        println!("  proposer  {:10} => {}", agent.name, preference_names(&population, agent.preferences(), false));
    }
    for agent in population.responders() {
        println!("  responder {:10} => {}", agent.name, preference_names(&population, agent.preferences(), true));
    }

    MatchingEngine::new().solve(&mut population)?;

    println!();
    println!("Pairings:");
    let mut responders: Vec<_> = population.pairing_table().keys().copied().collect();
    responders.sort_unstable();
    for responder in responders {
        if let Some(pairing) = population.pairing_table().get(&responder) {
            if let (Some(p), Some(r)) = (
                population.proposer(pairing.proposer),
                population.responder(pairing.responder),
            ) {
                println!("  {:10} - {}", p.name, r.name);
            }
        }
    }

    let report = stats::report(&population)?.rounded();
    println!();
    println!("Proposals issued:         {}", report.proposal_count);
    println!("Avg proposer rank index:  {}", report.average_proposer_index);
    println!("Avg responder rank index: {}", report.average_responder_index);
    println!("Proposer advantage:       {}%", report.advantage_percent);
    println!("Fingerprint:              {}", population.fingerprint_hex());

    Ok(())
}

/// Join preference ids into a display string of names
fn preference_names(population: &Population, preferences: &[u64], ids_are_proposers: bool) -> String {
    let names: Vec<&str> = preferences
        .iter()
        .filter_map(|&id| {
            if ids_are_proposers {
                population.proposer(id).map(|a| a.name.as_str())
            } else {
                population.responder(id).map(|a| a.name.as_str())
            }
        })
        .collect();
    names.join(", ")
}

/// Run the engine across increasing population sizes and print one table
/// row per size, averaging `trials` independent fresh markets each.
fn sweep(start: usize, step: usize, points: usize, trials: usize) -> Result<(), MatchError> {
    println!(
        "{:>8} {:>12} {:>14} {:>15} {:>12} {:>10}",
        "N", "Proposals", "Proposer Idx", "Responder Idx", "Advantage", "Time"
    );
    println!(
        "{:->8} {:->12} {:->14} {:->15} {:->12} {:->10}",
        "", "", "", "", "", ""
    );

    let mut rng = rand::thread_rng();
    let sweep_start = Instant::now();

    for point in 0..points {
        let size = start + point * step;
        let size_start = Instant::now();

        let mut reports = Vec::with_capacity(trials.max(1));
        for _ in 0..trials.max(1) {
            let mut population = Population::new(size, &mut rng)?;
            MatchingEngine::new().solve(&mut population)?;
            reports.push(stats::report(&population)?);
        }

        let mean = MatchReport::mean(&reports)?.rounded();
        println!(
            "{:>8} {:>12} {:>14.2} {:>15.2} {:>11.2}% {:>9.2?}",
            size,
            mean.proposal_count,
            mean.average_proposer_index,
            mean.average_responder_index,
            mean.advantage_percent,
            size_start.elapsed()
        );
    }

    println!();
    println!(
        "Finished {} sizes x {} trial(s) in {:.2?}",
        points,
        trials.max(1),
        sweep_start.elapsed()
    );

    Ok(())
}
