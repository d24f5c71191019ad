//! The engine runs a game session on top of a [`Board`]: it reads commands
//! from the input stream, applies them and writes the responses.
//!
//! [`Engine::run`] is the "main loop" of the engine. Each line of the input is
//! a single command:
//!
//! ```text
//! <x1> <y1> -> <x2> <y2>          move with the rules enforced
//! force <x1> <y1> -> <x2> <y2>    legal move that does not pass the turn
//! frame                           print the current frame
//! load <frame>                    replace the board
//! new                             start over from the standard setup
//! undo                            restore the board before the last change
//! eaten                           list captured pieces of both sides
//! skip                            pass the turn
//! clear                           remove everything except the Generals
//! place <Side> <Kind> <x> <y>     put a captured piece back
//! remove <x> <y>                  take a piece off the board
//! contested <x> <y>               count pieces able to capture on a square
//! concede                         the side to move gives up
//! quit
//! ```
//!
//! Rejected commands are answered with a line starting with `error:` and
//! leave the session as it was.

use std::io::{BufRead, Write};

use anyhow::Context;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::engine::command::Command;
use crate::rules::core::Side;
use crate::rules::{Board, Error, MoveRequest};

mod command;

/// The Engine owns the board of the current game along with the session
/// state that is not a part of the board: history of previous frames for
/// `undo` and the concession.
pub struct Engine<'a, R: BufRead, W: Write> {
    board: Board,
    history: Vec<String>,
    conceded: Option<Side>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self::with_board(Board::starting(), input, output)
    }

    /// Creates an engine that continues the game from `board`.
    #[must_use]
    pub fn with_board(board: Board, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            board,
            history: Vec::new(),
            conceded: None,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input ends.
    ///
    /// # Errors
    ///
    /// I/O failures are returned, as well as the errors that mean the board
    /// is corrupted ([`Error::is_recoverable`] is false for them). Every other
    /// error is reported to the output and the loop goes on.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self
                .input
                .read_line(&mut line)
                .context("reading the input")?
                == 0
            {
                break;
            }
            let command = match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "error: {e:#}")?;
                    continue;
                },
            };
            debug!("executing {command:?}");
            if let Err(e) = self.execute(command) {
                match e.downcast_ref::<Error>() {
                    Some(error) if error.is_recoverable() => {
                        writeln!(self.output, "error: {e:#}")?;
                    },
                    _ => return Err(e),
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Move(request) => self.handle_move(request, true),
            Command::Force(request) => self.handle_move(request, false),
            Command::Frame => Ok(writeln!(self.output, "{}", self.board)?),
            Command::Load(frame) => self.handle_load(&frame),
            Command::New => {
                self.replace_board(Board::starting());
                Ok(writeln!(self.output, "new game, Red to move")?)
            },
            Command::Undo => self.handle_undo(),
            Command::Eaten => self.handle_eaten(),
            Command::Skip => {
                self.record(|board| {
                    board.skip_turn();
                    Ok(())
                })?;
                Ok(writeln!(self.output, "{} to move", self.board.side_to_move())?)
            },
            Command::Clear => {
                self.record(|board| {
                    board.clear();
                    Ok(())
                })?;
                Ok(writeln!(self.output, "board cleared")?)
            },
            Command::Place { side, kind, square } => {
                let description = self.record(|board| board.place(side, kind, square))?;
                writeln!(self.output, "{description}")?;
                self.report_winner()
            },
            Command::Remove(square) => {
                let description = self.record(|board| {
                    let description = board.remove(square)?;
                    match board.winner() {
                        Ok(_) => Ok(description),
                        Err(_) => Err(Error::Placement(
                            "at least one General has to stay on the board".into(),
                        )),
                    }
                })?;
                writeln!(self.output, "{description}")?;
                self.report_winner()
            },
            Command::Contested(square) => {
                let contest = self.board.contested_count(square);
                Ok(writeln!(
                    self.output,
                    "{square}: Red {}, Green {}",
                    contest.red, contest.green
                )?)
            },
            Command::Concede => self.handle_concede(),
            Command::Unknown(command) => {
                Ok(writeln!(self.output, "error: unknown command: {command}")?)
            },
            Command::Empty | Command::Quit => Ok(()),
        }
    }

    /// Applies `change` to a copy of the board. The copy replaces the board
    /// and the previous frame is saved only if `change` succeeds.
    fn record<T>(
        &mut self,
        change: impl FnOnce(&mut Board) -> crate::rules::Result<T>,
    ) -> crate::rules::Result<T> {
        let mut board = self.board.clone();
        let result = change(&mut board)?;
        self.history.push(self.board.to_string());
        self.board = board;
        Ok(result)
    }

    fn replace_board(&mut self, board: Board) {
        self.history.push(self.board.to_string());
        self.board = board;
        self.conceded = None;
    }

    /// Returns the winner if the game is over, either because a General was
    /// captured or because a side conceded.
    fn winner(&self) -> crate::rules::Result<Option<Side>> {
        match self.conceded {
            Some(side) => Ok(Some(!side)),
            None => self.board.winner(),
        }
    }

    fn report_winner(&mut self) -> anyhow::Result<()> {
        if let Some(side) = self.board.winner()? {
            info!("{side} won");
            writeln!(self.output, "{side} wins")?;
        }
        Ok(())
    }

    fn handle_move(&mut self, request: MoveRequest, enforce_rules: bool) -> anyhow::Result<()> {
        if let Some(side) = self.winner()? {
            writeln!(self.output, "error: the game is over, {side} won")?;
            return Ok(());
        }
        let description = self.record(|board| board.apply_move(request, enforce_rules))?;
        if enforce_rules {
            writeln!(self.output, "{description}")?;
        } else {
            writeln!(self.output, "FORCE: {description}")?;
        }
        self.report_winner()
    }

    /// Replaces the board with the one from `frame`. Frames without both
    /// Generals on record are rejected.
    fn handle_load(&mut self, frame: &str) -> anyhow::Result<()> {
        let board = Board::try_from(frame)?;
        if let Err(e) = board.winner() {
            warn!("rejected frame {frame}: {e}");
            writeln!(self.output, "error: rejected frame: {e}")?;
            return Ok(());
        }
        self.replace_board(board);
        writeln!(self.output, "loaded, {} to move", self.board.side_to_move())?;
        self.report_winner()
    }

    fn handle_undo(&mut self) -> anyhow::Result<()> {
        let Some(frame) = self.history.pop() else {
            writeln!(self.output, "error: nothing to undo")?;
            return Ok(());
        };
        self.board = Board::from_frame(&frame).context("restoring a saved frame")?;
        self.conceded = None;
        Ok(writeln!(
            self.output,
            "undone, {} to move",
            self.board.side_to_move()
        )?)
    }

    fn handle_eaten(&mut self) -> anyhow::Result<()> {
        for side in Side::BOTH {
            let eaten = self.board.eaten(side).join(", ");
            if eaten.is_empty() {
                writeln!(self.output, "{side}: none")?;
            } else {
                writeln!(self.output, "{side}: {eaten}")?;
            }
        }
        Ok(())
    }

    fn handle_concede(&mut self) -> anyhow::Result<()> {
        if let Some(side) = self.winner()? {
            writeln!(self.output, "error: the game is over, {side} won")?;
            return Ok(());
        }
        let side = self.board.side_to_move();
        self.history.push(self.board.to_string());
        self.conceded = Some(side);
        info!("{side} conceded");
        Ok(writeln!(self.output, "{side} concedes, {} wins", !side)?)
    }
}
