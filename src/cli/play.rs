//! Play command implementation.

use super::output::{JsonMatchResult, format_entry, format_match_text};
use super::{CliError, MatchArgs, OutputFormat};
use ladders::game::{DiceRoller, RandomDice, RecordingDice};
use ladders::replay::Recording;
use ladders::session::Match;
use ladders::snapshot::{decode_match, encode_match};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Options for the play command.
#[derive(Debug)]
pub(crate) struct PlayOptions {
    pub(crate) setup: MatchArgs,
    pub(crate) seed: Option<u64>,
    pub(crate) max_turns: u32,
    pub(crate) format: OutputFormat,
    pub(crate) save: Option<PathBuf>,
    pub(crate) resume: Option<PathBuf>,
    pub(crate) snapshot: Option<PathBuf>,
    pub(crate) interactive: bool,
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the match cannot be set up or its files written.
pub(crate) fn execute(options: PlayOptions) -> Result<(), CliError> {
    let mut game = match &options.resume {
        Some(path) => {
            if options.save.is_some() {
                return Err(CliError::new(
                    "--save records from the first roll; it cannot be used with --resume",
                ));
            }
            let json = fs::read_to_string(path).map_err(|e| {
                CliError::new(format!("Failed to read snapshot {}: {e}", path.display()))
            })?;
            decode_match(&json)?
        }
        None => Match::start(options.setup.resolve()?)?,
    };
    let start = game.clone();

    let mut inner = match options.seed {
        Some(seed) => RandomDice::seeded(seed),
        None => RandomDice::from_entropy(),
    };
    let mut dice = RecordingDice::new(&mut inner);

    if options.interactive {
        play_interactive(&mut game, &mut dice)?;
    } else if !game.state().is_finished() {
        game.play_to_end(&mut dice, options.max_turns)?;
    }

    if let Some(path) = &options.save {
        let recording = Recording::from_match(&start, dice.into_rolls());
        recording.save(path)?;
        log::info!("Recording saved to {}", path.display());
    }

    if let Some(path) = &options.snapshot {
        fs::write(path, encode_match(&game)?)?;
        log::info!("Snapshot saved to {}", path.display());
    }

    if !options.interactive {
        match options.format {
            OutputFormat::Text => print!("{}", format_match_text(&game)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&JsonMatchResult::from_match(&game))?;
                println!("{json}");
            }
        }
    }

    Ok(())
}

/// Humans press Enter to roll; computer seats roll on their own.
fn play_interactive<D: DiceRoller + ?Sized>(game: &mut Match, dice: &mut D) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut shown = game.state().log().entries().count();
    print_new_entries(game, &mut shown);

    while !game.state().is_finished() {
        if game.is_human_turn() {
            let slot = game.state().current_player();
            print!(
                "Player {} (cell {}), press Enter to roll or q to quit: ",
                slot + 1,
                game.state().positions()[slot]
            );
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if line.trim().eq_ignore_ascii_case("q") {
                break;
            }
            game.play_turn(slot, dice)?;
        } else {
            game.play_computer_turns(dice)?;
        }
        print_new_entries(game, &mut shown);
    }

    if let Some(slot) = game.winner() {
        println!("Player {} wins after {} rounds.", slot + 1, game.state().round_number());
    }
    Ok(())
}

fn print_new_entries(game: &Match, shown: &mut usize) {
    for entry in game.state().log().entries().skip(*shown) {
        println!("{}", format_entry(entry));
        *shown += 1;
    }
}
