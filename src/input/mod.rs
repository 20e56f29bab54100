//! Line commands typed at the terminal, and their dispatch onto playback.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::application::Playback;
use crate::error::LifeError;
use crate::rendering;

/// One user intent parsed from a command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    /// Advance this many generations immediately
    Step(u32),
    Toggle { row: usize, col: usize },
    Random,
    Clear,
    Speed(u64),
    Size { rows: usize, cols: usize },
    /// Clear and center a catalog pattern
    Pattern(String),
    Patterns,
    Save(String),
    Load(String),
    Delete(String),
    Saves,
    /// Let this many milliseconds of playback time pass
    Wait(u64),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    #[error("'{value}' is not a valid {argument}")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

pub const HELP: &str = "\
commands:
  start | stop              run or pause playback
  step [n]                  advance n generations (default 1)
  wait <ms>                 let playback time pass
  toggle <row> <col>        flip a cell
  random | clear            fill randomly / kill every cell
  speed <ms>                set the tick interval
  size <rows> <cols>        resize (clears the board)
  pattern <name>            clear and center a catalog pattern
  patterns                  list the catalog
  save | load | delete <name>
  saves                     list saved states
  show | help | quit";

/// Whitespace-split arguments following the command word
struct Args<'a> {
    command: String,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn number<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ParseError> {
        let word = self.words.next().ok_or_else(|| ParseError::MissingArgument {
            command: self.command.clone(),
            argument,
        })?;
        word.parse().map_err(|_| ParseError::InvalidNumber {
            argument,
            value: word.to_string(),
        })
    }

    fn optional_number<T: FromStr>(&mut self, argument: &'static str, default: T) -> Result<T, ParseError> {
        match self.words.clone().next() {
            Some(_) => self.number(argument),
            None => Ok(default),
        }
    }

    /// The rest of the line as one name, inner spaces kept
    fn name(&mut self) -> Result<String, ParseError> {
        let name = self.words.by_ref().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(ParseError::MissingArgument {
                command: self.command.clone(),
                argument: "a name",
            });
        }
        Ok(name)
    }

    fn finish(mut self, command: Command) -> Result<Command, ParseError> {
        match self.words.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let mut args = Args { command: word.clone(), words };

        let parsed = match word.as_str() {
            "start" | "play" => Command::Start,
            "stop" | "pause" => Command::Stop,
            "step" | "n" => Command::Step(args.optional_number("a generation count", 1)?),
            "toggle" | "t" => Command::Toggle {
                row: args.number("a row")?,
                col: args.number("a column")?,
            },
            "random" | "randomize" => Command::Random,
            "clear" => Command::Clear,
            "speed" => Command::Speed(args.number("a speed in ms")?),
            "size" => Command::Size {
                rows: args.number("a row count")?,
                cols: args.number("a column count")?,
            },
            "pattern" | "p" => Command::Pattern(args.name()?),
            "patterns" => Command::Patterns,
            "save" => Command::Save(args.name()?),
            "load" => Command::Load(args.name()?),
            "delete" | "rm" => Command::Delete(args.name()?),
            "saves" => Command::Saves,
            "wait" | "w" => Command::Wait(args.number("a duration in ms")?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ParseError::UnknownCommand(word)),
        };
        args.finish(parsed)
    }
}

/// What the caller should do after a command ran
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading; print the reply if there is one
    Continue(Option<String>),
    Quit,
}

/// Let `total` of playback time pass, stopping at every tick boundary so
/// the number of ticks is exact. Returns the ticks fired.
pub fn wait(playback: &mut Playback, total: Duration) -> u64 {
    let mut left = total;
    let mut ticks = 0;
    while !left.is_zero() {
        let slice = playback.until_next_tick().map_or(left, |next| next.min(left));
        left -= slice;
        if playback.advance(slice) {
            ticks += 1;
        }
    }
    ticks
}

/// Run one command against playback
pub fn execute(playback: &mut Playback, command: Command) -> Result<Flow, LifeError> {
    let reply = match command {
        Command::Start => {
            playback.start();
            Some("running".to_string())
        }
        Command::Stop => {
            playback.stop();
            Some(format!("stopped at generation {}", playback.engine().generation()))
        }
        Command::Step(count) => {
            (0..count).for_each(|_| playback.step());
            None
        }
        Command::Toggle { row, col } => {
            playback.toggle_cell(row, col);
            None
        }
        Command::Random => {
            playback.randomize();
            None
        }
        Command::Clear => {
            playback.clear();
            None
        }
        Command::Speed(speed) => {
            playback.set_speed(speed)?;
            None
        }
        Command::Size { rows, cols } => {
            playback.set_size(rows, cols)?;
            None
        }
        Command::Pattern(name) => {
            playback.select_pattern_named(&name)?;
            None
        }
        Command::Patterns => Some(rendering::draw_patterns(playback.patterns())),
        Command::Save(name) => {
            playback.save_state(&name);
            Some(format!("saved '{name}'"))
        }
        Command::Load(name) => Some(if playback.load_state(&name) {
            format!("loaded '{name}'")
        } else {
            format!("no saved state named '{name}'")
        }),
        Command::Delete(name) => {
            playback.delete_state(&name);
            None
        }
        Command::Saves => Some(rendering::draw_saved_states(&playback.saved_states())),
        Command::Wait(millis) => {
            let ticks = wait(playback, Duration::from_millis(millis));
            Some(format!("{ticks} generation(s) passed"))
        }
        Command::Show => {
            let engine = playback.engine();
            Some(rendering::draw_frame(&engine.board(), &engine.settings()))
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(reply))
}
