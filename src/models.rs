// src/models.rs

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Represents a message in the conversation.
///
/// Messages are never edited once created; the session only appends them.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: DateTime<Local>,
    is_error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), false)
    }

    /// An assistant message rendered with error styling.
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), true)
    }

    fn new(role: Role, content: String, is_error: bool) -> Self {
        Self {
            role,
            content,
            timestamp: Local::now(),
            is_error,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

const SESSION_ID_LEN: usize = 26;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier correlating all remote calls of one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..SESSION_ID_LEN)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        SessionId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body posted to the remote endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_alias_id: Option<&'a str>,
}

/// Logs details of each API call.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
