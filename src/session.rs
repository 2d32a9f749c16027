use crate::{
    constants::EXCHANGE_FAILED_REPLY,
    errors::AssistantResult,
    models::{Message, SessionId},
    resolver::Reply,
};
use std::time::Instant;

/// Identifies one submitted message awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        RequestId(id)
    }
}

/// Whether a reply is outstanding. Only one request may be pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    Pending { request: RequestId, started: Instant },
}

/// Ticket handed out by [`ChatSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub text: String,
}

/// Conversation state for one run of the assistant.
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    messages: Vec<Message>,
    state: ExchangeState,
    next_request: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_id(SessionId::generate())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            messages: Vec::new(),
            state: ExchangeState::Idle,
            next_request: 1,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ExchangeState::Pending { .. })
    }

    pub fn can_send(&self, draft: &str) -> bool {
        !self.is_pending() && !draft.trim().is_empty()
    }

    /// Appends `draft` as a user message and enters the pending state.
    ///
    /// Returns `None` without touching anything when the draft is blank or
    /// another request is still pending. On success the draft is cleared.
    pub fn submit(&mut self, draft: &mut String) -> Option<PendingRequest> {
        if !self.can_send(draft) {
            return None;
        }

        let text = std::mem::take(draft);
        let id = RequestId(self.next_request);
        self.next_request += 1;

        self.messages.push(Message::user(text.clone()));
        self.state = ExchangeState::Pending {
            request: id,
            started: Instant::now(),
        };
        log::debug!("session {}: dispatched request {:?}", self.id, id);

        Some(PendingRequest { id, text })
    }

    /// Records the outcome of `request` and returns to idle.
    ///
    /// Outcomes for anything but the pending request are dropped; the
    /// return value tells whether the outcome was accepted.
    pub fn settle(&mut self, request: RequestId, outcome: AssistantResult<Reply>) -> bool {
        let started = match self.state {
            ExchangeState::Pending {
                request: active,
                started,
            } if active == request => started,
            _ => {
                log::warn!("ignoring reply for inactive request {:?}", request);
                return false;
            }
        };

        let message = match outcome {
            Ok(Reply::Text(text)) => Message::assistant(text),
            Ok(Reply::Failed(text)) => Message::error(text),
            Err(e) => {
                log::error!("error calling assistant: {}", e);
                Message::error(EXCHANGE_FAILED_REPLY)
            }
        };

        log::debug!(
            "request {:?} settled after {}ms",
            request,
            started.elapsed().as_millis()
        );
        self.messages.push(message);
        self.state = ExchangeState::Idle;
        true
    }
}
