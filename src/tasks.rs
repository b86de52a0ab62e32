//! Task tracking and log broadcast
//!
//! Process-wide mutable state modeled as explicit registries with a defined
//! lifecycle: created once at startup and injected into whatever drives the
//! pipeline, never reached through ambient globals. Entries are evicted
//! after completion or timeout.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Pipeline phases a classification-and-generation task moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Cloning,
    Analyzing,
    Generating,
    Pushing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    fn default_message(&self) -> &'static str {
        match self {
            TaskStatus::Cloning => "Cloning repository...",
            TaskStatus::Analyzing => "Analyzing project structure...",
            TaskStatus::Generating => "Generating deployment files...",
            TaskStatus::Pushing => "Pushing changes to remote...",
            TaskStatus::Completed => "Analysis and generation complete.",
            TaskStatus::Failed => "Task failed.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskEntry {
    pub id: Uuid,
    pub status: TaskStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory task store for UI progress reporting.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: RwLock<HashMap<Uuid, TaskEntry>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let entry = TaskEntry {
            id,
            status: TaskStatus::Cloning,
            message: "Task initialized".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(id, entry);
        id
    }

    /// Update status; `message` overrides the per-status default (used for
    /// failure details). Unknown ids are ignored.
    pub async fn update(&self, id: Uuid, status: TaskStatus, message: Option<String>) {
        let mut tasks = self.tasks.write().await;
        if let Some(entry) = tasks.get_mut(&id) {
            entry.status = status;
            entry.message = message.unwrap_or_else(|| status.default_message().to_string());
            entry.updated_at = Utc::now();
            debug!(task = %id, status = ?status, "Task updated");
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<TaskEntry> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Drop terminal tasks older than `max_age`. Returns how many were
    /// evicted.
    pub async fn evict_finished(&self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|_, entry| !(entry.status.is_terminal() && entry.updated_at < cutoff));
        before - tasks.len()
    }
}

const LOG_CHANNEL_CAPACITY: usize = 256;

/// Fan-out log channel. Lagging subscribers lose old lines rather than
/// blocking the publisher.
pub struct LogBroadcaster {
    sender: broadcast::Sender<String>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(LOG_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    pub fn publish(&self, line: impl Into<String>) {
        // Err only means no subscribers are listening right now
        let _ = self.sender.send(line.into());
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
