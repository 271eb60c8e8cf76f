//! Play command implementation.

use super::{CliError, PolicyArgs};
use frontline::Bot;
use std::io::{self, BufWriter};

/// Play one match on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the policy cannot be built or the match ends
/// abnormally.
pub(crate) fn execute(flags: &PolicyArgs, annotate: bool) -> Result<(), CliError> {
    let bot = Bot::new(flags.build()?).with_annotations(annotate);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    let summary = bot.run(stdin.lock(), &mut output)?;
    tracing::info!(
        turns = summary.turns,
        orders = summary.orders,
        policy = %bot.policy().kind(),
        "game over"
    );
    Ok(())
}
