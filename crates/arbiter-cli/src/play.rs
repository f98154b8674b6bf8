//! Interactive console match between two players sharing a terminal.

use crate::config::CliConfig;
use crate::render::{self, Style};
use arbiter_core::{ChessPosition, MoveMatrix};
use arbiter_engine::{ChessMatch, MatchError};
use std::io::{BufRead, Write};

/// Reads one trimmed line, or `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Console session state.
pub struct Session<R, W> {
    input: R,
    output: W,
    style: Style,
    show_captured: bool,
    chess_match: ChessMatch,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: &CliConfig) -> Self {
        Session {
            input,
            output,
            style: Style {
                unicode: config.unicode,
            },
            show_captured: config.show_captured,
            chess_match: ChessMatch::new(),
        }
    }

    /// Runs until checkmate, `quit`, or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_board(MoveMatrix::EMPTY)?;
            if self.chess_match.checkmate() {
                return Ok(());
            }
            match self.turn()? {
                Step::Continue => {}
                Step::Quit => {
                    writeln!(self.output, "Bye.")?;
                    return Ok(());
                }
            }
        }
    }

    fn print_board(&mut self, highlight: MoveMatrix) -> anyhow::Result<()> {
        writeln!(self.output)?;
        write!(
            self.output,
            "{}",
            render::board(&self.chess_match, highlight, self.style)
        )?;
        if self.show_captured {
            write!(
                self.output,
                "{}",
                render::captured(&self.chess_match, self.style)
            )?;
        }
        write!(self.output, "{}", render::status(&self.chess_match))?;
        Ok(())
    }

    fn read_square(&mut self, label: &str) -> anyhow::Result<Option<Input>> {
        let Some(line) = prompt(&mut self.input, &mut self.output, label)? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match line.parse::<ChessPosition>() {
            Ok(square) => Ok(Some(Input::Square(square))),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(Some(Input::Retry))
            }
        }
    }

    fn turn(&mut self) -> anyhow::Result<Step> {
        let source = match self.read_square("Source: ")? {
            None => return Ok(Step::Quit),
            Some(Input::Retry) => return Ok(Step::Continue),
            Some(Input::Square(square)) => square,
        };
        let moves = match self.chess_match.legal_moves(source) {
            Ok(moves) => moves,
            Err(e) => return self.reject(e),
        };
        self.print_board(moves)?;

        let target = match self.read_square("Target: ")? {
            None => return Ok(Step::Quit),
            Some(Input::Retry) => return Ok(Step::Continue),
            Some(Input::Square(square)) => square,
        };
        match self.chess_match.perform_move(source, target) {
            Ok(Some(piece)) => {
                tracing::info!("{}{} captured {} {}", source, target, piece.color, piece.kind);
                writeln!(self.output, "Captured {} {}", piece.color, piece.kind)?;
            }
            Ok(None) => tracing::info!("{}{}", source, target),
            Err(e) => return self.reject(e),
        }

        if self.chess_match.promoted().is_some() {
            return self.choose_promotion();
        }
        Ok(Step::Continue)
    }

    fn choose_promotion(&mut self) -> anyhow::Result<Step> {
        loop {
            let Some(code) = prompt(
                &mut self.input,
                &mut self.output,
                "Enter piece for promotion (B/C/Q/R): ",
            )?
            else {
                return Ok(Step::Quit);
            };
            match self.chess_match.choose_promotion(&code) {
                Ok(piece) => {
                    tracing::info!("promoted to {}", piece.kind);
                    return Ok(Step::Continue);
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn reject(&mut self, error: MatchError) -> anyhow::Result<Step> {
        tracing::warn!("rejected: {}", error);
        writeln!(self.output, "{}", error)?;
        Ok(Step::Continue)
    }
}

enum Input {
    Square(ChessPosition),
    Retry,
}

enum Step {
    Continue,
    Quit,
}
