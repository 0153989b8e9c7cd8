//! Documentation URL resolution
//!
//! Maps a fully-qualified Python symbol name onto the docs.python.org page
//! that documents it. The site is irregular (shared pages for related
//! types, per-submodule pages, renamed modules, hand-curated exceptions),
//! so resolution runs as an ordered cascade of rules.
//!
//! # Modules
//!
//! - [`symbol`]: splits a dotted name into (documented module, member path)
//! - [`tables`]: the fixed page-mapping tables
//! - [`rules`]: the ordered special-case rules
//! - [`engine`]: the cascade itself plus the generic fallbacks

pub mod engine;
pub mod rules;
pub mod symbol;
pub mod tables;

pub use engine::resolve_doc_url;
