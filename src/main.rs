//! Banjo permission hook binary
//!
//! Configured in Claude Code settings as a `PermissionRequest` hook command.
//!
//! For help: cargo run -- --help

use banjo_permission_hook::{Cli, run_with_cli};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_with_cli(&cli).await {
        // Stdout is reserved for the hook directive
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
