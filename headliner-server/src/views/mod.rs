//! Server-rendered HTML pages.
//!
//! Pages are assembled with [`std::fmt::Write`] into a `String`; every
//! value that did not originate in this module goes through [`escape`].

mod layout;
mod pages;

pub use layout::escape;
pub use pages::{IndexPage, SavedPage};
