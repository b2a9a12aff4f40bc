//! Permission relay between Claude Code and Banjo
//!
//! Reads one PermissionRequest hook query, forwards it over Banjo's Unix
//! socket and turns the answer into a hook directive.

mod client;
mod decision;
mod runner;

pub use client::{PermissionClient, decode_response, encode_request, read_frame};
pub use decision::{DEFAULT_DENY_MESSAGE, Outcome};
pub use runner::{run_relay, run_with_cli};
