//! # Headliner Core
//!
//! Domain logic for the Headliner news aggregator.
//!
//! - [`theme`]: the global background color, its file-backed store, and the
//!   luminance-based contrast resolver that picks black or white text
//! - [`feeds`]: topic to feed URL registry, RSS/Atom parsing, HTTP retrieval
//!   and per-render aggregation
//! - [`database`]: SQLite repositories for saved articles and topics
//! - [`domain`]: plain records shared by the layers above
//!
//! ```
//! use headliner_core::theme::{ContrastColor, contrast_color};
//!
//! assert_eq!(contrast_color(Some("#ffffff")), ContrastColor::Black);
//! assert_eq!(contrast_color(Some("not a color")).hex(), "#000000");
//! ```

pub mod database;
pub mod domain;
pub mod error;
pub mod feeds;
pub mod theme;

pub use error::{NewsError, Result};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
