//! Commands accepted from the messaging layer

use crate::Error;
use crate::color::{Rgb, rgb_clamped};

const COMMAND_ON: &str = "ON";
const COMMAND_OFF: &str = "OFF";
const COMMAND_AUTO: &str = "AUTO";
const COMMAND_PARTY: &str = "PARTY";
const COMMAND_COLOR: &str = "COLOR";

/// Named command from the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Force the lights on
    On,
    /// Force the lights off
    Off,
    /// Return to the daily schedule
    Auto,
    /// Bouncing balls on every seasonal-eligible channel
    Party,
    /// Set one channel's color
    SetColor { channel: usize, color: Rgb },
}

impl Command {
    /// Parse a text payload
    ///
    /// Accepts `ON`, `OFF`, `AUTO`, `PARTY` and `COLOR <channel> <r> <g> <b>`.
    /// Color components outside 0-255 are clamped.
    pub fn parse(payload: &str) -> Result<Self, Error> {
        let mut words = payload.split_whitespace();
        let command = match words.next().ok_or(Error::InvalidCommand)? {
            COMMAND_ON => Self::On,
            COMMAND_OFF => Self::Off,
            COMMAND_AUTO => Self::Auto,
            COMMAND_PARTY => Self::Party,
            COMMAND_COLOR => {
                let channel = parse_number(words.next())?;
                let red = parse_number(words.next())?;
                let green = parse_number(words.next())?;
                let blue = parse_number(words.next())?;
                let channel = usize::try_from(channel).map_err(|_| Error::InvalidCommand)?;
                Self::SetColor {
                    channel,
                    color: rgb_clamped(red, green, blue),
                }
            }
            _ => return Err(Error::InvalidCommand),
        };
        if words.next().is_some() {
            return Err(Error::InvalidCommand);
        }
        Ok(command)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => COMMAND_ON,
            Self::Off => COMMAND_OFF,
            Self::Auto => COMMAND_AUTO,
            Self::Party => COMMAND_PARTY,
            Self::SetColor { .. } => COMMAND_COLOR,
        }
    }
}

fn parse_number(word: Option<&str>) -> Result<i32, Error> {
    word.and_then(|w| w.parse().ok())
        .ok_or(Error::InvalidCommand)
}
