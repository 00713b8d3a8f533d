//! # scape-pages
//!
//! Page controllers for the four Smellscape pages plus the navigation shell.
//!
//! Every page owns its state exclusively and moves through
//! [`LoadState`]: `Loading`, then `Loaded` on success or `Degraded` when the
//! backend is unreachable. A degraded page substitutes the static sample
//! collection and keeps a banner, so it is always renderable.
//!
//! Time-dependent behavior (search debounce, page fades) takes explicit
//! [`std::time::Instant`]s so hosts drive the clock.

pub mod articles;
pub mod debounce;
pub mod error;
pub mod form;
pub mod home;
pub mod library;
pub mod listing;
pub mod map;
pub mod shell;
pub mod state;

#[cfg(test)]
mod test_support;

pub use articles::ArticlesPage;
pub use debounce::Debouncer;
pub use error::SubmitError;
pub use form::{Editor, FormMode};
pub use home::HomePage;
pub use library::LibraryPage;
pub use listing::Listing;
pub use map::MapPage;
pub use shell::{Route, Shell, Transition};
pub use state::{LoadState, PageData};
