//! Command-line argument parsing for nodechat.

/// Values from flags that override the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub project_id: Option<i64>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI application (default)
    RunTui(CliOverrides),
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first item is the program name and is skipped. `--version` and
/// `--help` win over everything else.
///
/// # Examples
///
/// ```
/// use nodechat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["nodechat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" => match inline.or_else(|| args.next()) {
                Some(url) if !url.is_empty() => overrides.base_url = Some(url),
                _ => return CliCommand::Invalid("--url requires a value".to_string()),
            },
            "--project" => match inline.or_else(|| args.next()) {
                Some(raw) => match raw.parse::<i64>() {
                    Ok(id) => overrides.project_id = Some(id),
                    Err(_) => {
                        return CliCommand::Invalid(format!(
                            "--project expects an integer, got {:?}",
                            raw
                        ))
                    }
                },
                None => return CliCommand::Invalid("--project requires a value".to_string()),
            },
            other => return CliCommand::Invalid(format!("unknown argument {:?}", other)),
        }
    }
    CliCommand::RunTui(overrides)
}
