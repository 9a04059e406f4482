//! Board command implementation.

use super::output::format_board_text;
use super::{CliError, MatchArgs, OutputFormat};
use ladders::session::build_board;
use ladders::snapshot::encode_board;

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if the board cannot be built.
pub(crate) fn execute(setup: &MatchArgs, format: OutputFormat) -> Result<(), CliError> {
    let config = setup.resolve()?;
    let board = build_board(&config)?;

    match format {
        OutputFormat::Text => print!("{}", format_board_text(&board, config.rows, config.cols)),
        OutputFormat::Json => println!("{}", encode_board(&board)?),
    }
    Ok(())
}
