use std::fmt;
use std::io;
use std::path::Path;

use crate::SweepError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn sweep_cli_error(context: &str, err: SweepError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &SweepError) -> String {
    use SweepError::*;
    match err {
        Config(msg) => format!("{msg}. Check the command line arguments."),
        Lane(msg) => format!("{msg}. A worker thread stopped early."),
        Io(io) => format!("{io}"),
        Csv(e) => format!("{e}. Could not write CSV output."),
        Json(e) => format!("{e}. Could not write JSON output."),
        Internal(msg) => format!("{msg}. This is a bug."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_carry_path_and_hint() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let cli = io_cli_error("reading wordlist", Path::new("words.txt"), err);
        assert!(cli.msg.contains("'words.txt'"));
        assert!(cli.msg.contains("Check that the file exists"));
        assert!(cli.source().is_some());
    }

    #[test]
    fn config_errors_get_argument_hint() {
        let cli = sweep_cli_error("brute", SweepError::Config("bad len".into()));
        assert_eq!(
            cli.to_string(),
            "brute: bad len. Check the command line arguments."
        );
    }
}
