//! Veil Navigation
//!
//! Address bar input resolution:
//!   1. `http://` / `https://` → navigate verbatim
//!   2. Text with a space, or without a dot → search
//!   3. Anything else → bare host, `https://` prepended
//!
//! The display title is derived from the destination host.
//! Suggestions are filtered from a fixed corpus as the user types.

mod error;
mod input;
mod suggest;

pub use error::NavigationError;
pub use input::{
    derive_title, Destination, DestinationKind, InputResolver, DEFAULT_SEARCH_ENGINE,
    FALLBACK_TITLE,
};
pub use suggest::{
    default_corpus, suggest, Suggester, MAX_SUGGESTIONS, MIN_QUERY_CHARS,
};

pub type Result<T> = std::result::Result<T, NavigationError>;
