//! Resolve the Python symbol under the cursor to its documentation URL.
//!
//! Two pieces do the real work: [`jedi`] provisions and talks to a
//! long-lived jedi-backed resolver process that turns a (file, line,
//! column) position into a fully-qualified symbol name, and [`docs`] maps
//! that name onto the right docs.python.org page through an ordered rule
//! cascade. The CLI, configuration and logging are glue.

pub mod config;
pub mod docs;
pub mod jedi;
