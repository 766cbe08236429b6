use common::games::tictactoe::{ClientCommand, Difficulty, GameMode, Mark};

use crate::config::BotConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(ClientCommand),
    /// Route following commands to another seat (1-based).
    SelectSeat(usize),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9                      place a mark (cells are numbered row by row)
  new                      start a new game
  reset                    clear scores and start a new game
  mode 1p [x|o] [easy|medium|hard]
  mode 2p                  two players on this console
  mode online
  create [ROOM]            host a room (random id if omitted)
  join ROOM                take the O seat of a room
  leave                    leave the current room
  seat 1|2                 switch which seat receives commands
  help
  quit";

/// Parses one console line. Single-player options fall back to `bot_defaults`.
pub fn parse_line(line: &str, bot_defaults: &BotConfig) -> Result<Option<ConsoleInput>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    if let Ok(cell) = head.parse::<usize>() {
        if !(1..=9).contains(&cell) || !args.is_empty() {
            return Err(format!("Cell must be a number from 1 to 9, got '{}'", line.trim()));
        }
        return Ok(Some(ConsoleInput::Command(ClientCommand::CellClick(cell - 1))));
    }

    let input = match head.to_ascii_lowercase().as_str() {
        "new" => ConsoleInput::Command(ClientCommand::NewGame),
        "reset" => ConsoleInput::Command(ClientCommand::ResetScores),
        "mode" => ConsoleInput::Command(ClientCommand::SwitchMode(parse_mode(&args, bot_defaults)?)),
        "create" => {
            let requested = args.first().map(|id| id.to_string());
            ConsoleInput::Command(ClientCommand::CreateRoom(requested))
        }
        "join" => {
            let id = args.first().ok_or("Usage: join ROOM")?;
            ConsoleInput::Command(ClientCommand::JoinRoom(id.to_string()))
        }
        "leave" => ConsoleInput::Command(ClientCommand::LeaveRoom),
        "seat" => {
            let seat = args
                .first()
                .and_then(|seat| seat.parse::<usize>().ok())
                .filter(|seat| (1..=2).contains(seat))
                .ok_or("Usage: seat 1|2")?;
            ConsoleInput::SelectSeat(seat)
        }
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    };
    Ok(Some(input))
}

fn parse_mode(args: &[&str], bot_defaults: &BotConfig) -> Result<GameMode, String> {
    let Some((kind, options)) = args.split_first() else {
        return Err("Usage: mode 1p|2p|online".to_string());
    };
    match kind.to_ascii_lowercase().as_str() {
        "1p" => {
            let mut human = bot_defaults.human_mark;
            let mut difficulty = bot_defaults.difficulty;
            for option in options {
                if let Ok(mark) = option.parse::<Mark>() {
                    human = mark;
                } else {
                    difficulty = option.parse::<Difficulty>()?;
                }
            }
            Ok(GameMode::SinglePlayer { human, difficulty })
        }
        "2p" => Ok(GameMode::LocalTwoPlayer),
        "online" => Ok(GameMode::Networked),
        other => Err(format!("Unknown mode '{}', expected 1p, 2p or online", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<ConsoleInput>, String> {
        parse_line(line, &BotConfig::default())
    }

    fn command(line: &str) -> ClientCommand {
        match parse(line) {
            Ok(Some(ConsoleInput::Command(command))) => command,
            other => panic!("'{}' parsed to {:?}", line, other),
        }
    }

    #[test]
    fn test_cells_are_one_based() {
        assert_eq!(command("1"), ClientCommand::CellClick(0));
        assert_eq!(command(" 9 "), ClientCommand::CellClick(8));
        assert!(parse("0").is_err());
        assert!(parse("10").is_err());
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_single_player_options() {
        assert_eq!(
            command("mode 1p o easy"),
            ClientCommand::SwitchMode(GameMode::SinglePlayer { human: Mark::O, difficulty: Difficulty::Easy })
        );
        assert_eq!(
            command("mode 1p"),
            ClientCommand::SwitchMode(GameMode::SinglePlayer { human: Mark::X, difficulty: Difficulty::Hard })
        );
        assert!(parse("mode 1p brutal").is_err());
    }

    #[test]
    fn test_other_modes() {
        assert_eq!(command("MODE 2p"), ClientCommand::SwitchMode(GameMode::LocalTwoPlayer));
        assert_eq!(command("mode online"), ClientCommand::SwitchMode(GameMode::Networked));
        assert!(parse("mode").is_err());
    }

    #[test]
    fn test_room_commands() {
        assert_eq!(command("create"), ClientCommand::CreateRoom(None));
        assert_eq!(command("create abc123"), ClientCommand::CreateRoom(Some("abc123".to_string())));
        assert_eq!(command("join ABC123"), ClientCommand::JoinRoom("ABC123".to_string()));
        assert_eq!(command("leave"), ClientCommand::LeaveRoom);
        assert!(parse("join").is_err());
    }

    #[test]
    fn test_console_only_inputs() {
        assert_eq!(parse("seat 2"), Ok(Some(ConsoleInput::SelectSeat(2))));
        assert!(parse("seat 3").is_err());
        assert_eq!(parse("help"), Ok(Some(ConsoleInput::Help)));
        assert_eq!(parse("quit"), Ok(Some(ConsoleInput::Quit)));
        assert!(parse("dance").is_err());
    }
}
