//! Transient auto-expiring notices.

use opsdesk_core::EpochMillis;

/// How long a notice stays visible: five seconds.
pub const NOTICE_TTL_MS: EpochMillis = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message surfaced by a controller, typically a load
/// failure. Expiry is checked against a caller-supplied clock; nothing
/// dismisses a notice in the background.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub created_at: EpochMillis,
}

impl Notice {
    pub fn error(message: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
            created_at: now,
        }
    }

    pub fn info(message: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
            created_at: now,
        }
    }

    /// Whether the display window has elapsed at the given instant.
    pub fn is_expired(&self, now: EpochMillis) -> bool {
        now - self.created_at >= NOTICE_TTL_MS
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
