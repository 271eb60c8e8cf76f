//! Transcript inspection command implementation.

use super::{CliError, PolicyArgs};
use frontline::engine::{FeatureSet, Frontline, Policy, TurnView, pair_features, planet_features};
use frontline::protocol::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Replay a recorded engine transcript through a policy and print what it
/// sees and decides each turn.
///
/// # Errors
///
/// Returns an error if the transcript cannot be read or is malformed, or
/// if the policy cannot be built.
pub(crate) fn execute(transcript: &Path, flags: &PolicyArgs) -> Result<(), CliError> {
    let policy = flags.build()?;
    let file = File::open(transcript)
        .map_err(|e| CliError::new(format!("Failed to open {}: {e}", transcript.display())))?;
    let mut reader = Reader::new(BufReader::new(file));

    let settings = reader.read_settings()?;
    settings
        .validate()
        .map_err(|e| CliError::new(format!("invalid game settings: {e}")))?;

    println!(
        "Match: seed {}, {} players, playing as {} with policy '{}'",
        settings.seed,
        settings.num_players,
        settings.player_id,
        policy.kind()
    );

    let mut number = 0u32;
    while let Some(turn) = reader.next_turn(&settings)? {
        number += 1;
        let view = TurnView::new(&settings, &turn)
            .map_err(|e| CliError::new(format!("turn {number}: {e}")))?;

        println!();
        println!(
            "Turn {number}: {} planets ({} mine), {} ships",
            turn.planets.len(),
            turn.my_planets().count(),
            turn.ships.len()
        );
        print_frontline(&Frontline::compute(&view.index));
        print_features(&view, policy.as_ref());

        let orders = policy.decide(&view);
        println!("  Orders:");
        if orders.is_empty() {
            println!("    (none)");
        }
        for order in &orders {
            println!("    {} -> {}  power {}", order.source, order.destination, order.power);
        }
    }

    println!();
    println!("{number} turns inspected");
    Ok(())
}

fn print_frontline(frontline: &Frontline) {
    println!("  Layers:");
    for (depth, layer) in frontline.layers().iter().enumerate() {
        println!("    {depth}: {}", join_ids(layer));
    }
    if !frontline.unreachable().is_empty() {
        println!("    unreachable: {}", join_ids(frontline.unreachable()));
    }
}

fn print_features(view: &TurnView<'_>, policy: &dyn Policy) {
    match policy.kind().feature_set() {
        None => {}
        Some(FeatureSet::Planet) => {
            println!("  Planet features:");
            for planet in view.index.planets() {
                println!("    {}: {}", planet.id, join_values(&planet_features(planet, &view.index)));
            }
        }
        Some(FeatureSet::Pair) => {
            println!("  Pair features:");
            for planet in view.my_planets() {
                for target in view.index.neighbors(planet) {
                    let features = pair_features(planet, target, &view.index);
                    println!("    {} -> {}: {}", planet.id, target.id, join_values(&features));
                }
            }
        }
    }
}

fn join_ids(ids: &[usize]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}
