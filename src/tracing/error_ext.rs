//! Error tracing extensions
//!
//! Provides utilities for enriching error handling with tracing context.

use crate::types::RelayError;
use std::error::Error as StdError;

/// Extension trait for adding tracing context to errors
pub trait ErrorTraceExt {
    /// Log error with its kind, fatality and source chain
    fn trace_error(&self) -> &Self;
}

/// Collect the `source()` chain of an error as strings
fn error_chain(error: &dyn StdError) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current_source = error.source();
    while let Some(source) = current_source {
        chain.push(source.to_string());
        current_source = source.source();
    }
    chain
}

impl ErrorTraceExt for RelayError {
    fn trace_error(&self) -> &Self {
        let kind = self.kind();
        let chain = error_chain(self);

        if self.is_fatal() {
            tracing::error!(
                error = %self,
                error_kind = kind.as_str(),
                exit_code = self.exit_code(),
                error_chain = ?chain,
                "Permission hook failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                error_kind = kind.as_str(),
                error_chain = ?chain,
                "Deferring to default permission behavior"
            );
        }

        self
    }
}
