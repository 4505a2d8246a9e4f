//! Veil Tab Registry
//!
//! An ordered collection of tabs with exactly one active tab.
//! The registry is created with one tab and can never become empty:
//! closing the last tab is rejected.

mod error;
mod registry;
mod tab;

pub use error::TabError;
pub use registry::{CloseOutcome, TabRegistry};
pub use tab::{NewTabTemplate, Tab, TabId, BLANK_URL, NEW_TAB_TITLE};

pub type Result<T> = std::result::Result<T, TabError>;
