//! Hook runner
//!
//! Entry point for one PermissionRequest hook invocation: read the query,
//! ask Banjo, print the directive.

use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::client::PermissionClient;
use super::decision::Outcome;
use crate::cli::Cli;
use crate::tracing::ErrorTraceExt;
use crate::types::{PermissionQuery, RelayConfig, RelayError, RelayRequest, Result};

/// Build an EnvFilter based on CLI args and RUST_LOG environment variable
///
/// Priority: RUST_LOG environment variable > CLI arguments (-v, -vv, -q)
fn build_env_filter(cli: &Cli) -> tracing_subscriber::EnvFilter {
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        if !rust_log.is_empty() {
            return tracing_subscriber::EnvFilter::new(rust_log);
        }
    }

    tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into())
}

/// Initialize logging with file output (diagnostic mode)
fn init_logging_to_file(cli: &Cli) -> anyhow::Result<()> {
    let log_path = cli.log_path();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(&log_path)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(build_env_filter(cli))
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "Diagnostic mode enabled");
    Ok(())
}

/// Initialize logging with stderr output (normal mode)
///
/// Stdout carries the hook directive and must never receive log lines.
fn init_logging_to_stderr(cli: &Cli) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    // Only fails if a subscriber is already installed, which is fine
    drop(
        tracing_subscriber::registry()
            .with(build_env_filter(cli))
            .with(fmt_layer)
            .try_init(),
    );
}

/// Initialize logging based on CLI arguments
///
/// A diagnostic log file that cannot be created falls back to stderr so
/// that logging problems never change the hook's outcome.
fn init_logging(cli: &Cli) {
    if cli.is_diagnostic() {
        if let Err(e) = init_logging_to_file(cli) {
            eprintln!("Failed to open diagnostic log {}: {e:#}", cli.log_path().display());
            init_logging_to_stderr(cli);
        }
    } else {
        init_logging_to_stderr(cli);
    }
}

/// Run the hook with CLI arguments over the process stdin/stdout
///
/// Only caller-side failures come back as errors; their
/// [`RelayError::exit_code`] is the process exit status.
pub async fn run_with_cli(cli: &Cli) -> Result<Outcome> {
    init_logging(cli);

    tracing::debug!(
        version = %env!("CARGO_PKG_VERSION"),
        pid = %std::process::id(),
        "Permission hook starting"
    );

    let config = RelayConfig::from_cli(cli);
    run_relay(&config, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Relay one permission query to the approval authority
///
/// Without a configured socket this returns [`Outcome::DeferToDefault`]
/// without touching `input`. Every failure talking to the authority is
/// logged and also defers. Errors are returned only for unreadable or
/// malformed input and for failures writing the directive to `output`.
pub async fn run_relay<R, W>(config: &RelayConfig, mut input: R, mut output: W) -> Result<Outcome>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(socket_path) = config.endpoint() else {
        tracing::debug!("No permission socket configured, deferring to default behavior");
        return Ok(Outcome::DeferToDefault);
    };

    // Fatal errors are reported once, by the binary
    let query = read_query(&mut input).await?;

    let span = tracing::info_span!(
        "permission_request",
        tool_name = query.tool_name_str(),
        tool_use_id = %query.tool_use_id,
        session_id = %query.session_id,
        socket = %socket_path.display(),
        decision = tracing::field::Empty,
        elapsed_ms = tracing::field::Empty,
    );

    let start_time = Instant::now();
    let client = PermissionClient::new(socket_path, config.timeout);
    let outcome = request_decision(&client, query)
        .instrument(span.clone())
        .await;

    span.record("decision", outcome.as_str());
    span.record("elapsed_ms", start_time.elapsed().as_millis());

    write_outcome(&outcome, &mut output).instrument(span).await?;

    Ok(outcome)
}

/// Read all of `input` and decode it as a permission query
async fn read_query<R>(input: &mut R) -> Result<PermissionQuery>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .await
        .map_err(RelayError::ReadInput)?;

    PermissionQuery::from_slice(&buf).map_err(RelayError::InvalidInput)
}

/// Ask the authority, turning any failure into a deferral
async fn request_decision(client: &PermissionClient, query: PermissionQuery) -> Outcome {
    let request = RelayRequest::from(query);

    match client.request(&request).await {
        Ok(response) => {
            let outcome = Outcome::from_response(&response);
            tracing::info!(
                decision = ?response.decision,
                outcome = outcome.as_str(),
                "Permission decision received"
            );
            outcome
        }
        Err(e) => {
            e.trace_error();
            Outcome::DeferToDefault
        }
    }
}

/// Write the hook directive for `outcome`; deferring writes nothing
async fn write_outcome<W>(outcome: &Outcome, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let Some(hook_output) = outcome.to_hook_output() else {
        return Ok(());
    };

    let line = hook_output
        .to_line()
        .map_err(|e| RelayError::WriteOutput(e.into()))?;

    output
        .write_all(line.as_bytes())
        .await
        .map_err(RelayError::WriteOutput)?;
    output.flush().await.map_err(RelayError::WriteOutput)?;

    Ok(())
}
