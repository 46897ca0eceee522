//! Bounded queue of user-facing notifications

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Operation succeeded
    Info,
    /// Operation succeeded with caveats
    Warning,
    /// Operation failed
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    /// Warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    /// Error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this reports a failure
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// FIFO that drops its oldest entry when full
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Create queue; a capacity of 0 is treated as 1
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting the oldest entry if full
    pub fn push(&mut self, notification: Notification) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    /// Remove and return everything, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.entries.drain(..).collect()
    }

    /// Queued entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Number queued
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
