//! Line-oriented player commands.

/// A command typed by the player, coordinates already converted to zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlayerCommand {
    /// Start a brand-new match under the current session.
    New,
    /// Plant a catalog entry.
    Plant {
        /// Catalog key as typed.
        key: String,
        /// Zero-based row.
        row: u32,
        /// Zero-based column.
        column: u32,
    },
    /// Collect one income portion.
    Collect,
    /// Release the current wave.
    Wave,
    /// Show the status report.
    Status,
    /// Restart the running match in place.
    Reset,
    /// List the commands.
    Help,
    /// Leave the program.
    Quit,
}

/// Reasons a line could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    /// The first word names no command.
    #[error("I didn't understand `{0}`.")]
    Unknown(String),
    /// `plant` was missing arguments or had too many.
    #[error("Tell me what to plant and where, for example: plant горох 1 3")]
    PlantUsage,
    /// A row or position was not a positive whole number.
    #[error("Rows and positions are counted from 1, `{0}` is not one of them.")]
    BadCoordinate(String),
}

impl PlayerCommand {
    /// Parses a line, returning `None` for blank input.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "new" => Self::New,
            "plant" => {
                let (Some(key), Some(row), Some(column), None) =
                    (words.next(), words.next(), words.next(), words.next())
                else {
                    return Err(ParseError::PlantUsage);
                };
                Self::Plant {
                    key: key.to_owned(),
                    row: parse_coordinate(row)?,
                    column: parse_coordinate(column)?,
                }
            }
            "collect" => Self::Collect,
            "wave" => Self::Wave,
            "status" => Self::Status,
            "reset" => Self::Reset,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(ParseError::Unknown(line.trim().to_owned())),
        };
        Ok(Some(command))
    }
}

fn parse_coordinate(word: &str) -> Result<u32, ParseError> {
    word.parse::<u32>()
        .ok()
        .and_then(|value| value.checked_sub(1))
        .ok_or_else(|| ParseError::BadCoordinate(word.to_owned()))
}
