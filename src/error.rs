//! The uniform abort signal for a scaffolding run

use thiserror::Error;

/// Terminal failure: a human message, the process exit code, and whether the
/// message has already been presented to the user.
///
/// Every stage of the pipeline aborts through this type; the binary maps it
/// to the process exit code and only prints the message when `already_shown`
/// is false, so failures surface exactly once.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliExit {
    pub message: String,
    pub exit_code: i32,
    pub already_shown: bool,
}

impl CliExit {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            already_shown: false,
        }
    }

    /// A failure whose message was already rendered to the user.
    pub fn already_shown(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            already_shown: true,
        }
    }
}

// Prompt and terminal writes abort with exit 1; the io error text is the
// message shown by main.
impl From<std::io::Error> for CliExit {
    fn from(err: std::io::Error) -> Self {
        CliExit::new(err.to_string(), 1)
    }
}

/// Cancel the current prompt session with `message` and abort with exit 1.
/// The message is rendered here, so main will not print it again.
pub fn fail<T>(message: impl Into<String>) -> Result<T, CliExit> {
    let message = message.into();
    let _ = cliclack::outro_cancel(&message);
    Err(CliExit::already_shown(message, 1))
}
