//! Slash commands typed into the composer.

use std::path::PathBuf;

/// Commands available from the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Create a new conversation
    /// Primary: /new
    New,

    /// Create a project and use it for new conversations
    /// Primary: /project <name> [| description]
    Project { name: String, description: String },

    /// Attach an image to the next message
    /// Primary: /image <path>
    /// Aliases: /attach
    Image(PathBuf),

    /// Drop the pending image
    /// Primary: /clear-image
    ClearImage,

    /// Re-check the model backend
    /// Primary: /status
    Status,

    /// Reload the conversation list
    /// Primary: /refresh
    Refresh,

    /// Jump to the most recently updated conversation
    /// Primary: /recent
    Recent,

    /// List commands
    /// Primary: /help
    Help,

    /// Exit
    /// Primary: /quit
    /// Aliases: /exit
    Quit,
}

impl SlashCommand {
    /// Usage line and description for every command, in display order.
    pub fn help_entries() -> &'static [(&'static str, &'static str)] {
        &[
            ("/new", "Start a new conversation"),
            ("/project <name> [| description]", "Create a project"),
            ("/image <path>", "Attach an image to the next message"),
            ("/clear-image", "Remove the pending image"),
            ("/status", "Check the model backend"),
            ("/refresh", "Reload conversations"),
            ("/recent", "Open the most recent conversation"),
            ("/help", "Show commands"),
            ("/quit", "Exit"),
        ]
    }

    /// Parse composer input.
    ///
    /// Returns `None` when the input is not a command (does not start with
    /// `/`), `Some(Err(..))` for an unknown or malformed command.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodechat::app::SlashCommand;
    ///
    /// assert_eq!(SlashCommand::parse("/new"), Some(Ok(SlashCommand::New)));
    /// assert_eq!(SlashCommand::parse("hello"), None);
    /// assert!(matches!(SlashCommand::parse("/nope"), Some(Err(_))));
    /// ```
    pub fn parse(input: &str) -> Option<Result<Self, String>> {
        let input = input.trim();
        let rest = input.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "new" => Ok(SlashCommand::New),
            "project" => parse_project(arg),
            "image" | "attach" => {
                if arg.is_empty() {
                    Err("Usage: /image <path>".to_string())
                } else {
                    Ok(SlashCommand::Image(PathBuf::from(arg)))
                }
            }
            "clear-image" => Ok(SlashCommand::ClearImage),
            "status" => Ok(SlashCommand::Status),
            "refresh" => Ok(SlashCommand::Refresh),
            "recent" => Ok(SlashCommand::Recent),
            "help" => Ok(SlashCommand::Help),
            "quit" | "exit" => Ok(SlashCommand::Quit),
            other => Err(format!("Unknown command: /{}", other)),
        };
        Some(command)
    }
}

/// `<name> [| description]`. An empty name is passed through so the
/// project flow can reject it.
fn parse_project(arg: &str) -> Result<SlashCommand, String> {
    let (name, description) = match arg.split_once('|') {
        Some((name, description)) => (name.trim(), description.trim()),
        None => (arg.trim(), ""),
    };
    Ok(SlashCommand::Project {
        name: name.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(SlashCommand::parse("/new"), Some(Ok(SlashCommand::New)));
        assert_eq!(SlashCommand::parse("  /REFRESH "), Some(Ok(SlashCommand::Refresh)));
        assert_eq!(SlashCommand::parse("/exit"), Some(Ok(SlashCommand::Quit)));
        assert_eq!(SlashCommand::parse("/clear-image"), Some(Ok(SlashCommand::ClearImage)));
        assert_eq!(SlashCommand::parse("/recent"), Some(Ok(SlashCommand::Recent)));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(SlashCommand::parse("hello /new"), None);
        assert_eq!(SlashCommand::parse(""), None);
    }

    #[test]
    fn test_parse_project() {
        assert_eq!(
            SlashCommand::parse("/project Launch | Q4 rollout"),
            Some(Ok(SlashCommand::Project {
                name: "Launch".to_string(),
                description: "Q4 rollout".to_string(),
            }))
        );
        assert_eq!(
            SlashCommand::parse("/project"),
            Some(Ok(SlashCommand::Project {
                name: String::new(),
                description: String::new(),
            }))
        );
    }

    #[test]
    fn test_parse_image() {
        assert_eq!(
            SlashCommand::parse("/image /tmp/my cat.png"),
            Some(Ok(SlashCommand::Image(PathBuf::from("/tmp/my cat.png"))))
        );
        assert!(matches!(SlashCommand::parse("/image"), Some(Err(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            SlashCommand::parse("/dance"),
            Some(Err("Unknown command: /dance".to_string()))
        );
    }

    #[test]
    fn test_help_entries_cover_commands() {
        assert_eq!(SlashCommand::help_entries().len(), 9);
    }
}
