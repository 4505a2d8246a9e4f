//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Search engine template must contain %s: {0}")]
    MissingPlaceholder(String),

    #[error("Search engine template must be an http(s) URL: {0}")]
    InvalidSearchTemplate(String),
}
