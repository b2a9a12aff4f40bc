//! PermissionRequest hook output written to stdout

use serde::Serialize;

/// Hook event name Claude Code expects in the directive
pub const HOOK_EVENT_NAME: &str = "PermissionRequest";

/// Top-level hook output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

/// Event-specific part of the hook output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: &'static str,
    pub decision: HookDecision,
}

/// Permission behavior for the tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookDecision {
    pub behavior: Behavior,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HookOutput {
    fn new(decision: HookDecision) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME,
                decision,
            },
        }
    }

    /// Directive allowing the tool call
    pub fn allow() -> Self {
        Self::new(HookDecision {
            behavior: Behavior::Allow,
            message: None,
        })
    }

    /// Directive denying the tool call with a reason shown to the model
    pub fn deny(message: impl Into<String>) -> Self {
        Self::new(HookDecision {
            behavior: Behavior::Deny,
            message: Some(message.into()),
        })
    }

    /// Serialize as a single stdout line
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
