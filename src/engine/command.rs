use anyhow::{bail, Context};
use itertools::Itertools;

use crate::rules::core::{PieceKind, Side, Square};
use crate::rules::MoveRequest;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Move(MoveRequest),
    Force(MoveRequest),
    Frame,
    Load(String),
    New,
    Undo,
    Eaten,
    Skip,
    Clear,
    Place {
        side: Side,
        kind: PieceKind,
        square: Square,
    },
    Remove(Square),
    Contested(Square),
    Concede,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_square(col: &str, row: &str) -> anyhow::Result<Square> {
    let coordinate = |token: &str| {
        token
            .parse::<i32>()
            .with_context(|| format!("'{token}' is not a coordinate"))
    };
    let (col, row) = (coordinate(col)?, coordinate(row)?);
    if !Square::on_board(col, row) {
        bail!("({col},{row}) is outside the board");
    }
    Ok(Square::new(col, row)?)
}

fn parse_square_arguments(command: &str, arguments: &[&str]) -> anyhow::Result<Square> {
    let Some((col, row)) = arguments.iter().collect_tuple() else {
        bail!("usage: {command} <x> <y>");
    };
    parse_square(col, row)
}

fn no_arguments(command: Command, arguments: &[&str]) -> anyhow::Result<Command> {
    if !arguments.is_empty() {
        bail!("unexpected arguments: {}", arguments.join(" "));
    }
    Ok(command)
}

impl Command {
    /// Moves are recognized by their leading coordinate, everything else by
    /// the first word.
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&first, arguments)) = parts.split_first() else {
            return Ok(Self::Empty);
        };
        if first.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            return Ok(Self::Move(MoveRequest::try_from(input)?));
        }
        match first {
            "force" => Ok(Self::Force(MoveRequest::try_from(arguments.join(" ").as_str())?)),
            "frame" => no_arguments(Self::Frame, arguments),
            "load" => {
                if arguments.is_empty() {
                    bail!("usage: load <frame>");
                }
                // Fields of a frame record are separated by spaces.
                Ok(Self::Load(arguments.join(" ")))
            },
            "new" => no_arguments(Self::New, arguments),
            "undo" => no_arguments(Self::Undo, arguments),
            "eaten" => no_arguments(Self::Eaten, arguments),
            "skip" => no_arguments(Self::Skip, arguments),
            "clear" => no_arguments(Self::Clear, arguments),
            "place" => {
                let Some((side, kind, col, row)) = arguments.iter().collect_tuple() else {
                    bail!("usage: place <Side> <Kind> <x> <y>");
                };
                Ok(Self::Place {
                    side: Side::try_from(*side)?,
                    kind: PieceKind::try_from(*kind)?,
                    square: parse_square(col, row)?,
                })
            },
            "remove" => Ok(Self::Remove(parse_square_arguments(first, arguments)?)),
            "contested" => Ok(Self::Contested(parse_square_arguments(first, arguments)?)),
            "concede" => no_arguments(Self::Concede, arguments),
            "quit" => no_arguments(Self::Quit, arguments),
            _ => Ok(Self::Unknown(input.to_string())),
        }
    }
}
