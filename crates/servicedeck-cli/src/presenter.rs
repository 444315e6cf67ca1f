//! Terminal rendition of the confirmation dialog.

use async_trait::async_trait;
use console::Term;
use owo_colors::OwoColorize;
use tracing::debug;

use servicedeck_core::{
    application::{ApplicationError, ConfirmationPresenter},
    error::DeckResult,
};

use crate::error::{CliError, CliResult};

/// Prints the confirmation as a framed message on stdout.
///
/// `show` returns once the message is on screen; dismissal is a separate
/// step ([`TerminalPresenter::await_dismissal`]).
pub struct TerminalPresenter {
    term: Term,
    no_color: bool,
}

impl TerminalPresenter {
    pub fn new(no_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            no_color,
        }
    }

    /// Block until the user picks "OK".  Returns at once when nobody is
    /// attended to the terminal.
    pub fn await_dismissal(&self) -> CliResult<()> {
        if !console::user_attended() {
            debug!("Not attended, auto-dismissing");
            return Ok(());
        }
        prompt_ok()
    }
}

#[cfg(feature = "interactive")]
fn prompt_ok() -> CliResult<()> {
    dialoguer::Select::new()
        .item("OK")
        .default(0)
        .interact_opt()
        .map_err(|e| CliError::IoError {
            message: "failed to read dismissal".into(),
            source: std::io::Error::other(e),
        })?
        .map(|_| ())
        .ok_or(CliError::Cancelled)
}

#[cfg(not(feature = "interactive"))]
fn prompt_ok() -> CliResult<()> {
    use std::io::BufRead as _;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::IoError {
            message: "failed to read dismissal".into(),
            source: e,
        })?;
    // EOF
    if read == 0 {
        return Err(CliError::Cancelled);
    }
    Ok(())
}

pub(crate) fn frame(message: &str) -> String {
    let width = message.chars().count() + 2;
    let bar = "\u{2500}".repeat(width);
    format!("\u{250c}{bar}\u{2510}\n\u{2502} {message} \u{2502}\n\u{2514}{bar}\u{2518}")
}

#[async_trait]
impl ConfirmationPresenter for TerminalPresenter {
    async fn show(&self, message: &str) -> DeckResult<()> {
        let framed = frame(message);
        let text = if self.no_color {
            framed
        } else {
            framed.bold().to_string()
        };

        self.term.write_line(&text).map_err(|e| {
            ApplicationError::ConfirmationFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
