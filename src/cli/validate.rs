//! Oracle validation command implementation.

use super::CliError;
use frontline::engine::PolicyKind;
use frontline::oracle::{LoadedOracle, Model, Oracle};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the oracle file cannot be read or is invalid.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", path.display());
    println!();

    let oracle = LoadedOracle::load(path)?;
    let model = match &oracle.model {
        Model::Linear(_) => "linear",
        Model::FeedForward(_) => "feed_forward",
    };
    let policies: Vec<&str> = PolicyKind::ALL
        .into_iter()
        .filter(|kind| kind.feature_set() == Some(oracle.feature_set))
        .map(PolicyKind::name)
        .collect();

    let zero_score = oracle.score(&vec![0.0; oracle.arity()]);

    println!("Summary:");
    println!("  Model:        {model}");
    println!("  Feature set:  {}", oracle.feature_set);
    println!("  Inputs:       {}", oracle.arity());
    println!("  Usable with:  {}", policies.join(", "));
    println!("  Zero score:   {zero_score}");

    if !zero_score.is_finite() {
        return Err(CliError::new("Oracle returns a non-finite score on the zero vector"));
    }

    println!();
    println!("Validation successful!");
    Ok(())
}
