//! Transient warning banner with token-scoped dismissal.
//!
//! # Responsibility
//! - Hold at most one user-visible warning.
//! - Expire warnings after a fixed lifetime and let hosts dismiss them through
//!   the token issued when they were shown.
//!
//! # Invariants
//! - Tokens increase monotonically; a token identifies exactly one warning.
//! - Dismissing with a stale token never clears a newer warning.
//! - Expiry is computed from each warning's own deadline, so a replaced
//!   warning cannot shorten the lifetime of its successor.

use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// How long a warning stays visible.
pub const WARNING_TTL: Duration = Duration::from_secs(3);

/// Identifies one shown warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeToken(u64);

impl NoticeToken {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl Display for NoticeToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notice-{}", self.0)
    }
}

/// A shown warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub token: NoticeToken,
    pub expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before the warning hides itself. Hosts use this to schedule
    /// a `dismiss` callback.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Single-slot warning holder.
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    current: Option<Notice>,
    next_token: u64,
    ttl: Duration,
}

impl NoticeSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            next_token: 1,
            ttl,
        }
    }

    /// Replaces any current warning and returns the new token.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> NoticeToken {
        let token = NoticeToken(self.next_token);
        self.next_token += 1;
        self.current = Some(Notice {
            message: message.into(),
            token,
            expires_at: now + self.ttl,
        });
        token
    }

    /// Returns the warning if it has not expired yet.
    pub fn visible(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| !notice.is_expired(now))
    }

    /// Clears the warning only when `token` still identifies it.
    pub fn dismiss(&mut self, token: NoticeToken) -> bool {
        match &self.current {
            Some(notice) if notice.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for NoticeSlot {
    fn default() -> Self {
        Self::new(WARNING_TTL)
    }
}
