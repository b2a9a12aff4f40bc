//! Error types for the permission hook

use std::time::Duration;

use thiserror::Error;

/// Coarse classification of relay errors, used as a structured log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something we could not decode
    Input,
    /// The request for the approval authority could not be built
    Encode,
    /// The approval authority could not be reached or the exchange broke
    Transport,
    /// No decision arrived before the deadline
    Timeout,
    /// The approval authority replied with something unusable
    Response,
    /// The directive could not be written back to the caller
    Output,
}

impl ErrorKind {
    /// Stable name for logs
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Input => "input",
            ErrorKind::Encode => "encode",
            ErrorKind::Transport => "transport",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Response => "response",
            ErrorKind::Output => "output",
        }
    }
}

/// Main error type for the permission relay
#[derive(Debug, Error)]
pub enum RelayError {
    // === Caller-side errors ===
    /// Hook input is not a valid permission query
    #[error("Invalid JSON input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// Hook input could not be read
    #[error("Failed to read hook input: {0}")]
    ReadInput(#[source] std::io::Error),

    /// Directive could not be written to stdout
    #[error("Failed to write hook output: {0}")]
    WriteOutput(#[source] std::io::Error),

    // === Approval authority errors ===
    /// Request could not be serialized
    #[error("Failed to encode permission request: {0}")]
    EncodeRequest(#[source] serde_json::Error),

    /// Could not connect to the permission socket
    #[error("Socket error: {0}")]
    ConnectionFailed(#[source] std::io::Error),

    /// Read or write on an established connection failed
    #[error("Socket error: {0}")]
    Io(#[source] std::io::Error),

    /// Deadline elapsed before a complete response was received
    #[error("Timeout waiting for permission decision after {0:?}")]
    Timeout(Duration),

    /// Peer closed the connection without sending anything
    #[error("Empty response from Banjo")]
    EmptyResponse,

    /// Response was not a JSON object
    #[error("Invalid JSON response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Result type for the permission relay
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::InvalidInput(_) | RelayError::ReadInput(_) => ErrorKind::Input,
            RelayError::WriteOutput(_) => ErrorKind::Output,
            RelayError::EncodeRequest(_) => ErrorKind::Encode,
            RelayError::ConnectionFailed(_) | RelayError::Io(_) => ErrorKind::Transport,
            RelayError::Timeout(_) => ErrorKind::Timeout,
            RelayError::EmptyResponse | RelayError::InvalidResponse(_) => ErrorKind::Response,
        }
    }

    /// Check if this error must be reported to the caller via the exit status
    ///
    /// Only problems on the caller's side of the hook are fatal. Anything that
    /// goes wrong talking to the approval authority degrades to the default
    /// permission flow instead.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Input | ErrorKind::Output)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        i32::from(self.is_fatal())
    }
}
