//! Unix socket client for Banjo's permission endpoint
//!
//! One connection carries exactly one newline-delimited JSON request and
//! one newline-delimited JSON response, then it is closed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::Error as _;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use crate::types::{RelayError, RelayRequest, RelayResponse, Result};

/// Size of each read from the socket
const READ_CHUNK_SIZE: usize = 4096;

/// Client for a single permission exchange
#[derive(Debug, Clone)]
pub struct PermissionClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl PermissionClient {
    /// Create a client for the socket at `socket_path`
    ///
    /// `timeout` bounds connect, write and read together.
    pub fn new(socket_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a request and wait for the decision
    pub async fn request(&self, request: &RelayRequest) -> Result<RelayResponse> {
        let line = encode_request(request)?;

        // The stream lives inside `exchange`, so it is closed on every path,
        // including when the deadline drops the future mid-read.
        let frame = tokio::time::timeout(self.timeout, self.exchange(&line))
            .await
            .map_err(|_| RelayError::Timeout(self.timeout))??;

        decode_response(&frame)
    }

    async fn exchange(&self, line: &[u8]) -> Result<Vec<u8>> {
        let mut stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(RelayError::ConnectionFailed)?;
        tracing::debug!(socket = %self.socket_path.display(), "Connected to permission socket");

        stream.write_all(line).await.map_err(RelayError::Io)?;
        stream.flush().await.map_err(RelayError::Io)?;

        let frame = read_frame(&mut stream).await.map_err(RelayError::Io)?;
        if frame.is_empty() {
            return Err(RelayError::EmptyResponse);
        }

        tracing::trace!(bytes = frame.len(), "Received response frame");
        Ok(frame)
    }
}

/// Serialize a request as one JSON line
pub fn encode_request(request: &RelayRequest) -> Result<Vec<u8>> {
    let mut line = serde_json::to_vec(request).map_err(RelayError::EncodeRequest)?;
    line.push(b'\n');
    Ok(line)
}

/// Read until the first newline or until the peer closes the connection
///
/// Returns everything up to and including the first newline. Bytes that
/// arrived in the same chunk after it are discarded. An empty result means
/// the peer closed without sending anything.
pub async fn read_frame<R>(reader: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut frame = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }

        if let Some(pos) = chunk[..n].iter().position(|&b| b == b'\n') {
            frame.extend_from_slice(&chunk[..=pos]);
            break;
        }
        frame.extend_from_slice(&chunk[..n]);
    }

    Ok(frame)
}

/// Parse a response frame
///
/// Surrounding whitespace (including the newline delimiter) is ignored. The
/// payload must be a JSON object; missing fields are fine.
pub fn decode_response(frame: &[u8]) -> Result<RelayResponse> {
    let value: serde_json::Value =
        serde_json::from_slice(frame.trim_ascii()).map_err(RelayError::InvalidResponse)?;

    if !value.is_object() {
        return Err(RelayError::InvalidResponse(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }

    serde_json::from_value(value).map_err(RelayError::InvalidResponse)
}
