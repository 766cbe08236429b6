mod broadcaster;
mod command_parser;
mod render;

pub use broadcaster::ConsoleBroadcaster;
pub use command_parser::{parse_line, ConsoleInput, HELP_TEXT};

