//! Public types for the Banjo permission hook
//!
//! This module contains all the shared types used across the crate.

mod config;
mod error;
mod hook;
mod query;

pub use config::{DEFAULT_TIMEOUT, RelayConfig, SOCKET_ENV_VAR};
pub use error::{ErrorKind, RelayError, Result};
pub use hook::{Behavior, HOOK_EVENT_NAME, HookDecision, HookOutput, HookSpecificOutput};
pub use query::{PermissionQuery, RelayRequest, RelayResponse};
