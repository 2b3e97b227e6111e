//! Line commands typed at the terminal, translated into root inputs.

use life_core::favorite::FavoriteInput;
use life_core::game::GameInput;
use life_core::pattern_select::PatternSelectInput;
use life_core::root::{RootInput, RootState};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  start | stop | step          run, pause or advance one generation
  tap X Y | drag X Y | drag-end  edit cells
  reset                        rebuild the board from its pattern
  size W H                     resize the board to W x H cells
  fav | unfav                  (un)favorite the current pattern
  open | close                 show or hide the pattern picker
  search TEXT                  filter the picker
  pick N                       choose row N of the picker
  show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Inputs to dispatch, in order.
    Dispatch(Vec<RootInput>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("the pattern picker is not open, try `open`")]
    NoPicker,
    #[error("there is no row {0} in the picker")]
    NoSuchRow(usize),
}

/// Parses one line against the current state. Blank lines show the board.
pub fn parse(line: &str, state: &RootState) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let game = |input| Ok(Command::Dispatch(vec![RootInput::Game(input)]));
    match name {
        "" | "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "start" => game(GameInput::StartTimer),
        "stop" => game(GameInput::StopTimer),
        "step" => game(GameInput::Tick),
        "reset" => game(GameInput::ResetBoard),
        "drag-end" => game(GameInput::DragEnd),
        "tap" => {
            let (x, y) = coordinates("tap", &mut args)?;
            game(GameInput::Tap { x, y })
        }
        "drag" => {
            let (x, y) = coordinates("drag", &mut args)?;
            game(GameInput::Drag { x, y })
        }
        "size" => {
            let width: f64 = number("size", "a width and a height", args.next())?;
            let height: f64 = number("size", "a width and a height", args.next())?;
            let cell = state.game.cell_length;
            game(GameInput::UpdateBoardSize {
                width: width * cell,
                height: height * cell,
            })
        }
        "fav" | "unfav" => {
            let title = state.game.selected_pattern().title().to_string();
            let input = if name == "fav" {
                FavoriteInput::AddFavorite(title)
            } else {
                FavoriteInput::RemoveFavorite(title)
            };
            Ok(Command::Dispatch(vec![RootInput::Favorite(input)]))
        }
        "open" => Ok(Command::Dispatch(vec![
            RootInput::PresentPatternSelect,
            RootInput::PatternSelect(PatternSelectInput::LoadPatternFiles),
        ])),
        "close" => Ok(Command::Dispatch(vec![RootInput::DismissPatternSelect])),
        "search" => {
            if state.pattern_select.is_none() {
                return Err(CommandError::NoPicker);
            }
            Ok(Command::Dispatch(vec![RootInput::PatternSelect(
                PatternSelectInput::UpdateSearchText(rest.to_string()),
            )]))
        }
        "pick" => {
            let picker = state.pattern_select.as_ref().ok_or(CommandError::NoPicker)?;
            let index: usize = number("pick", "a row number", args.next())?;
            let locator = picker
                .filtered_sections()
                .into_iter()
                .flat_map(|section| section.rows)
                .nth(index.wrapping_sub(1))
                .map(|row| row.locator)
                .ok_or(CommandError::NoSuchRow(index))?;
            Ok(Command::Dispatch(vec![RootInput::PatternSelect(
                PatternSelectInput::DidSelectPattern(locator),
            )]))
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn coordinates<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<(i64, i64), CommandError> {
    let x = number(command, "X and Y coordinates", args.next())?;
    let y = number(command, "X and Y coordinates", args.next())?;
    Ok((x, y))
}

fn number<T: std::str::FromStr>(
    command: &'static str,
    expected: &'static str,
    arg: Option<&str>,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument { command, expected })?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}
