//! Confirmation presenter adapters.

mod modal;

pub use modal::ModalPresenter;
