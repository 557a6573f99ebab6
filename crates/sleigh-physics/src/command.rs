//! Name-addressed commands as they appear in action logs.
//!
//! ```text
//! AccUp 3          AccDown 1        AccLeft 2        AccRight 8
//! Float 5          LoadCarrots 20   LoadGift Alice   DeliverGift Alice
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Direction, ParseCommandError};

/// One line of an action log.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Accelerate { direction: Direction, magnitude: u64 },
    Float(u64),
    LoadCarrots(u64),
    LoadGift(String),
    DeliverGift(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Accelerate { direction, magnitude } => {
                write!(f, "{} {magnitude}", direction.command_name())
            }
            Command::Float(ticks)      => write!(f, "Float {ticks}"),
            Command::LoadCarrots(n)    => write!(f, "LoadCarrots {n}"),
            Command::LoadGift(name)    => write!(f, "LoadGift {name}"),
            Command::DeliverGift(name) => write!(f, "DeliverGift {name}"),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| ParseCommandError { line: s.to_owned(), reason };

        let mut parts = s.split_whitespace();
        let keyword = parts.next().ok_or_else(|| err("empty command".into()))?;
        let argument = parts
            .next()
            .ok_or_else(|| err(format!("{keyword} requires an argument")))?;
        if parts.next().is_some() {
            return Err(err("trailing input after argument".into()));
        }

        let number = || {
            argument
                .parse::<u64>()
                .map_err(|e| err(format!("invalid number {argument:?}: {e}")))
        };

        match keyword {
            "Float"       => Ok(Command::Float(number()?)),
            "LoadCarrots" => Ok(Command::LoadCarrots(number()?)),
            "LoadGift"    => Ok(Command::LoadGift(argument.to_owned())),
            "DeliverGift" => Ok(Command::DeliverGift(argument.to_owned())),
            other => match Direction::from_command_name(other) {
                Some(direction) => Ok(Command::Accelerate { direction, magnitude: number()? }),
                None => Err(err(format!("unknown action {other:?}"))),
            },
        }
    }
}
