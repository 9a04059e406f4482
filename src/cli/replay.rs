//! Replay command implementation.

use super::output::{JsonMatchResult, format_entry, format_log_text};
use super::{CliError, OutputFormat};
use ladders::replay::{Recording, ReplayEngine};
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or replayed.
pub(crate) fn execute(
    recording_path: &Path,
    step: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let recording = Recording::load(recording_path).map_err(|e| {
        CliError::new(format!(
            "Failed to load recording {}: {e}",
            recording_path.display()
        ))
    })?;

    let total = recording.rolls.len();
    let engine = ReplayEngine::new_at_step(recording, step.unwrap_or(total))?;
    let winner = engine.state().winner(engine.board());

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult::from_state(engine.state(), winner))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!(
                "Replay: {} players on {} cells ({:?} layout), step {}/{}",
                engine.state().player_count(),
                engine.board().size(),
                engine.recording().config.layout,
                engine.step(),
                engine.total_steps()
            );
            println!();
            print!("{}", format_log_text(engine.state().log()));
            println!();
            for (slot, position) in engine.state().positions().iter().enumerate() {
                println!("  Player {}: cell {position}", slot + 1);
            }
            if let Some(last) = engine.state().log().entries().last() {
                println!();
                println!("Last:{}", format_entry(last));
            }
            if let Some(slot) = winner {
                println!("Winner: Player {}", slot + 1);
            }
        }
    }

    Ok(())
}
