//! Input handling: shell commands and their help text

mod command;

pub use command::{COMMANDS, Command, CommandHelp};
