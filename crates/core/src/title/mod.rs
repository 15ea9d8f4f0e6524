//! Title cleanup and alternate-name lookup.
//!
//! Titles coming from metadata catalogs are decorated in ways release groups
//! never use (full-width brackets, stars, music notes). They are normalized
//! before query generation, and the alias table maps a canonical series name
//! to the names fansub groups actually publish under.

mod aliases;
mod normalize;

pub use aliases::{AliasEntry, AliasTable};
pub use normalize::normalize_title;
