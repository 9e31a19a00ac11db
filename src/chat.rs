use crate::infra::anthropic::{Message, Role};

/// Upper bound on the number of messages kept in a chat transcript.
/// Older turns are dropped from the front once the bound is hit.
const MAX_TRANSCRIPT_MESSAGES: usize = 40;

/// Conversation history for the interactive chat, oldest first.
///
/// The transcript is what gets sent to the model on every turn, so it
/// is kept bounded and always starts on a user message after trimming.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
        self.trim();
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
        self.trim();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn trim(&mut self) {
        if self.messages.len() > MAX_TRANSCRIPT_MESSAGES {
            let excess = self.messages.len() - MAX_TRANSCRIPT_MESSAGES;
            self.messages.drain(..excess);
        }
        // The endpoint rejects transcripts that open on an assistant turn.
        while self
            .messages
            .first()
            .is_some_and(|m| m.role == Role::Assistant)
        {
            self.messages.remove(0);
        }
    }
}
