//! Resolver process plumbing
//!
//! Provisions a Python environment with jedi installed and talks to the
//! resolver process over a line-delimited JSON protocol.
//!
//! # Modules
//!
//! - [`env`]: venv provisioning with smoke check and bounded self-repair
//! - [`bridge`]: the child process session and single-flight query path
//! - [`protocol`]: request/response codec for the line protocol
//! - [`error`]: provisioning and bridge error types

pub mod bridge;
pub mod env;
pub mod error;
pub mod protocol;

pub use bridge::{JediBridge, SymbolQuery};
pub use env::JediEnvironment;
pub use error::{BridgeError, ProvisionError};
