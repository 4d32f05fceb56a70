use std::fmt;

use quiz_core::model::{Board, Token};

/// One line typed during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: the answer for the scalar question or the focused part.
    Answer(String),
    Back,
    Next,
    New,
    Drop { row: String, token: Token },
    Undo { row: String, board: Board, index: usize },
    Freq { row: String, value: String },
    Key(String),
    Part { part: usize, text: String },
    Sub { part: usize, sub: usize, text: String },
    Submit,
    Score,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument { command: &'static str, usage: &'static str },
    InvalidToken(String),
    InvalidBoard(String),
    InvalidIndex { raw: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try :help)"),
            CommandError::MissingArgument { command, usage } => {
                write!(f, "{command} needs arguments: {usage}")
            }
            CommandError::InvalidToken(msg) | CommandError::InvalidBoard(msg) => f.write_str(msg),
            CommandError::InvalidIndex { raw } => write!(f, "not a valid index: {raw}"),
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP: &str = "\
Type an answer and press enter, or use a command:
  :submit                     grade the current question
  :next / :back               move through the questions
  :new                        start a new question from here
  :part <n> <text>            answer part n (a, b, ... or 1, 2, ...)
  :sub <n> <m> <text>         answer sub-part m of part n
  :drop <row> <token>         place a token: 1-5 tally marks, full, half, quarter
  :undo <row> <board> <index> remove a token (board is tally or pictogram)
  :freq <row> <value>         fill a frequency cell
  :key <value>                state the pictogram key
  :score                      show the running score
  :quit                       finish the session";

impl Command {
    /// # Errors
    ///
    /// Returns `CommandError` for an unknown command or bad arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Answer(line.to_string()));
        };
        let (name, args) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, args)| (name, args.trim()));

        match name {
            "back" => Ok(Command::Back),
            "next" => Ok(Command::Next),
            "new" => Ok(Command::New),
            "submit" => Ok(Command::Submit),
            "score" => Ok(Command::Score),
            "help" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            "drop" => {
                let [row, token] = words::<2>(args, ":drop", "<row> <token>")?;
                let token = token.parse().map_err(CommandError::InvalidToken)?;
                Ok(Command::Drop {
                    row: row.to_string(),
                    token,
                })
            }
            "undo" => {
                let [row, board, index] = words::<3>(args, ":undo", "<row> <board> <index>")?;
                Ok(Command::Undo {
                    row: row.to_string(),
                    board: board.parse().map_err(CommandError::InvalidBoard)?,
                    index: one_based(index)?,
                })
            }
            "freq" => {
                let [row, value] = words::<2>(args, ":freq", "<row> <value>")?;
                Ok(Command::Freq {
                    row: row.to_string(),
                    value: value.to_string(),
                })
            }
            "key" => {
                let [value] = words::<1>(args, ":key", "<value>")?;
                Ok(Command::Key(value.to_string()))
            }
            "part" => {
                let (part, text) = args.split_once(char::is_whitespace).ok_or(
                    CommandError::MissingArgument {
                        command: ":part",
                        usage: "<n> <text>",
                    },
                )?;
                Ok(Command::Part {
                    part: part_index(part)?,
                    text: text.trim().to_string(),
                })
            }
            "sub" => {
                let missing = CommandError::MissingArgument {
                    command: ":sub",
                    usage: "<n> <m> <text>",
                };
                let (part, rest) = args.split_once(char::is_whitespace).ok_or(missing.clone())?;
                let (sub, text) = rest.trim().split_once(char::is_whitespace).ok_or(missing)?;
                Ok(Command::Sub {
                    part: part_index(part)?,
                    sub: sub_index(sub)?,
                    text: text.trim().to_string(),
                })
            }
            other => Err(CommandError::Unknown(format!(":{other}"))),
        }
    }
}

fn words<'a, const N: usize>(
    args: &'a str,
    command: &'static str,
    usage: &'static str,
) -> Result<[&'a str; N], CommandError> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    <[&str; N]>::try_from(parts).map_err(|_| CommandError::MissingArgument { command, usage })
}

fn one_based(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidIndex {
            raw: raw.to_string(),
        })
}

/// `a`, `b`, ... or `1`, `2`, ...
fn part_index(raw: &str) -> Result<usize, CommandError> {
    let lower = raw.to_ascii_lowercase();
    match lower.as_bytes() {
        [letter @ b'a'..=b'z'] => Ok(usize::from(letter - b'a')),
        _ => one_based(raw),
    }
}

/// `i`, `ii`, ... up to `x`, or `1`, `2`, ...
fn sub_index(raw: &str) -> Result<usize, CommandError> {
    const ROMAN: [&str; 10] = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];
    let lower = raw.to_ascii_lowercase();
    ROMAN
        .iter()
        .position(|numeral| *numeral == lower)
        .map_or_else(|| one_based(raw), Ok)
}
