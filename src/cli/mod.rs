//! CLI module for nodechat.
//!
//! Handles flags before the TUI starts:
//!
//! ```ignore
//! use nodechat::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if let Some(code) = run_cli_command(&command) {
//!     std::process::exit(code);
//! }
//! ```

pub mod args;

pub use args::{parse_args, CliCommand, CliOverrides};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn usage() -> String {
    format!(
        "nodechat {VERSION}\n\
         Terminal client for agent chat conversations\n\
         \n\
         USAGE:\n    nodechat [OPTIONS]\n\
         \n\
         OPTIONS:\n\
         \x20   --url <URL>        Backend base URL (env: NODECHAT_URL)\n\
         \x20   --project <ID>     Project for new conversations (env: NODECHAT_PROJECT_ID)\n\
         \x20   -V, --version      Print version\n\
         \x20   -h, --help         Print this help\n\
         \n\
         Logging is controlled by NODECHAT_LOG (default: info).\n"
    )
}

/// Run a CLI-only command.
///
/// Returns `None` for [`CliCommand::RunTui`], otherwise the process exit
/// code after printing.
pub fn run_cli_command(command: &CliCommand) -> Option<i32> {
    match command {
        CliCommand::Version => {
            println!("nodechat {}", VERSION);
            Some(0)
        }
        CliCommand::Help => {
            print!("{}", usage());
            Some(0)
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, usage());
            Some(2)
        }
        CliCommand::RunTui(_) => None,
    }
}
