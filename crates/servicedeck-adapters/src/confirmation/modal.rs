//! In-process modal confirmation.
//!
//! Holds at most one open message. The UI driver reads and accepts it the
//! way an automation session reads and accepts a native alert.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::info;

use servicedeck_core::{
    application::{ApplicationError, ConfirmationPresenter},
    error::DeckResult,
};

#[derive(Debug, Clone, Default)]
pub struct ModalPresenter {
    inner: Arc<Mutex<ModalState>>,
}

#[derive(Debug, Default)]
struct ModalState {
    open: Option<String>,
    history: Vec<String>,
}

impl ModalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the open confirmation, if any.
    pub fn text(&self) -> Option<String> {
        self.lock().ok().and_then(|s| s.open.clone())
    }

    pub fn is_open(&self) -> bool {
        self.text().is_some()
    }

    /// Dismiss the open confirmation, returning its text.
    pub fn accept(&self) -> DeckResult<String> {
        let mut state = self.lock()?;
        let text = state.open.take().ok_or_else(|| ApplicationError::ConfirmationFailed {
            reason: "no confirmation is open".into(),
        })?;
        info!(%text, "Confirmation accepted");
        Ok(text)
    }

    /// Every message shown so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().map(|s| s.history.clone()).unwrap_or_default()
    }

    fn lock(&self) -> DeckResult<MutexGuard<'_, ModalState>> {
        self.inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

#[async_trait]
impl ConfirmationPresenter for ModalPresenter {
    async fn show(&self, message: &str) -> DeckResult<()> {
        let mut state = self.lock()?;
        if let Some(open) = &state.open {
            return Err(ApplicationError::ConfirmationFailed {
                reason: format!("'{}' is still open", open),
            }
            .into());
        }

        info!(%message, "Confirmation shown");
        state.open = Some(message.to_string());
        state.history.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn show_then_accept_round() {
        let modal = ModalPresenter::new();
        modal.show("Button Pressed!").await.unwrap();

        assert_eq!(modal.text().as_deref(), Some("Button Pressed!"));
        assert_eq!(modal.accept().unwrap(), "Button Pressed!");
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn second_show_while_open_fails() {
        let modal = ModalPresenter::new();
        modal.show("first").await.unwrap();

        assert!(modal.show("second").await.is_err());
        assert_eq!(modal.history(), ["first"]);
    }

    #[test]
    fn accept_without_open_confirmation_fails() {
        assert!(ModalPresenter::new().accept().is_err());
    }
}
