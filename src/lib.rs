//! Banjo permission hook
//!
//! A Claude Code `PermissionRequest` hook that forwards each permission
//! request to Banjo over a Unix socket. Banjo asks the user (through the
//! editor) and answers with a decision, which is printed back to Claude
//! Code as a hook directive.
//!
//! ## Behavior
//!
//! - `allow` / `deny`: a `hookSpecificOutput` directive is printed to stdout
//! - `ask`, anything unrecognized, or any failure reaching Banjo: nothing is
//!   printed and Claude Code falls back to its own permission prompt
//! - malformed hook input: diagnostic on stderr, exit status 1
//!
//! ## Quick Start
//!
//! ```no_run
//! use banjo_permission_hook::{RelayConfig, run_relay};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RelayConfig::from_env();
//!     run_relay(&config, tokio::io::stdin(), tokio::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! - `BANJO_PERMISSION_SOCKET`: Path to Banjo's permission socket. When unset
//!   or empty the hook always defers.
//! - `RUST_LOG`: Log filter, overrides `-v`/`-q`
//!
//! ## Wire Protocol
//!
//! One newline-terminated JSON object each way:
//!
//! ```json
//! {"tool_name": "Bash", "tool_input": {"command": "ls"}, "tool_use_id": "toolu_01", "session_id": "abc"}
//! {"decision": "deny", "message": "Not in this repo"}
//! ```

pub mod cli;
pub mod relay;
pub mod tracing;
pub mod types;

pub use cli::Cli;
pub use relay::{Outcome, PermissionClient, run_relay, run_with_cli};
pub use types::{PermissionQuery, RelayConfig, RelayError, RelayRequest, RelayResponse, Result};
