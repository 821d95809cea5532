//! Dismissible alerts that expire on their own.

use std::time::{Duration, Instant};

use uuid::Uuid;

/// How long an alert stays up without being dismissed.
pub const ALERT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub level: AlertLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Alert stack, oldest first.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    ttl: Duration,
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::with_ttl(ALERT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            alerts: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>) -> Uuid {
        self.push_at(level, message, Instant::now())
    }

    pub fn push_at(&mut self, level: AlertLevel, message: impl Into<String>, now: Instant) -> Uuid {
        let alert = Alert {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: now,
        };
        let id = alert.id;
        self.alerts.push(alert);
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        before != self.alerts.len()
    }

    /// Dismiss the most recent alert.
    pub fn dismiss_latest(&mut self) -> Option<Alert> {
        self.alerts.pop()
    }

    /// Drop expired alerts. Returns how many were removed.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.alerts.len();
        let ttl = self.ttl;
        self.alerts.retain(|alert| !alert.is_expired(now, ttl));
        before - self.alerts.len()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// True if any alert carries exactly this message.
    pub fn contains_message(&self, message: &str) -> bool {
        self.alerts.iter().any(|alert| alert.message == message)
    }
}
