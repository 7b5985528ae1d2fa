use std::collections::VecDeque;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{types::ChatMessage, utils};

pub const CHAT_CAPACITY: usize = 100;
pub const CHAT_READ_WINDOW: usize = 50;

/// Process-wide chat log kept in memory only.
///
/// Holds at most [`CHAT_CAPACITY`] messages, dropping the oldest first, and
/// hands out the newest [`CHAT_READ_WINDOW`] on read.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Mutex<VecDeque<ChatMessage>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn post(&self, user: Option<&str>, message: &str) -> ChatMessage {
        let user = user.filter(|u| !u.is_empty());
        let entry = ChatMessage {
            id: Uuid::new_v4(),
            user: user.unwrap_or("Anonymous").to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            avatar: utils::avatar_url(user),
        };

        let mut messages = self.messages.lock().await;
        messages.push_back(entry.clone());
        while messages.len() > CHAT_CAPACITY {
            messages.pop_front();
        }

        entry
    }

    /// Newest [`CHAT_READ_WINDOW`] messages, oldest first.
    pub async fn recent(&self) -> Vec<ChatMessage> {
        let messages = self.messages.lock().await;
        let skip = messages.len().saturating_sub(CHAT_READ_WINDOW);
        messages.iter().skip(skip).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
