//! Chat session: thread id plus the visible transcript.

use chatgraph::RunnableConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// One conversation. The graph keeps the real memory under `thread_id`; the transcript only holds
/// what the user saw (their inputs and final answers).
#[derive(Clone, Debug)]
pub struct ChatSession {
    thread_id: String,
    transcript: Vec<Turn>,
}

impl ChatSession {
    /// Session on a fresh UUID v4 thread.
    pub fn new() -> Self {
        Self::with_thread_id(uuid::Uuid::new_v4().to_string())
    }

    /// Session resuming an existing thread.
    pub fn with_thread_id(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            transcript: Vec::new(),
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn config(&self) -> RunnableConfig {
        RunnableConfig::for_thread(self.thread_id.clone())
    }

    /// Starts a new chat: new thread id, empty transcript.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.transcript.push(Turn {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.transcript.push(Turn {
            role: Role::Assistant,
            content: content.into(),
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
