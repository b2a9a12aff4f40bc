//! Mapping from Banjo's decision to the hook outcome

use crate::types::{HookOutput, RelayResponse};

/// Reason used when Banjo denies without saying why
pub const DEFAULT_DENY_MESSAGE: &str = "Permission denied by user";

/// Final disposition of one permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Let the tool call proceed
    Allow,
    /// Block the tool call
    Deny { reason: String },
    /// Print nothing so Claude Code falls back to its own prompt
    DeferToDefault,
}

impl Outcome {
    /// Interpret a response from the approval authority
    ///
    /// Only "allow" and "deny" produce a directive. "ask", an empty or
    /// missing decision, and unrecognized values all defer.
    pub fn from_response(response: &RelayResponse) -> Self {
        match response.decision.as_deref() {
            Some("allow") => Outcome::Allow,
            Some("deny") => Outcome::Deny {
                reason: response
                    .message
                    .as_deref()
                    .filter(|message| !message.is_empty())
                    .unwrap_or(DEFAULT_DENY_MESSAGE)
                    .to_string(),
            },
            Some("ask") | None => Outcome::DeferToDefault,
            Some(other) => {
                tracing::debug!(decision = %other, "Unrecognized decision, deferring");
                Outcome::DeferToDefault
            }
        }
    }

    /// Hook directive for this outcome, `None` when deferring
    pub fn to_hook_output(&self) -> Option<HookOutput> {
        match self {
            Outcome::Allow => Some(HookOutput::allow()),
            Outcome::Deny { reason } => Some(HookOutput::deny(reason.clone())),
            Outcome::DeferToDefault => None,
        }
    }

    /// Short label for logs and span fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Allow => "allow",
            Outcome::Deny { .. } => "deny",
            Outcome::DeferToDefault => "defer",
        }
    }
}
