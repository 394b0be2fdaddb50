// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification bus.
//!
//! A [`Notifier`] is an ordinary value the app creates with a sink and passes to whatever needs
//! to notify. There is no global. Expiry follows the same explicit-time model as hover intent:
//! the host calls [`Notifier::poll`] with a monotonic `now`.

use core::time::Duration;

/// How long a notification stays up unless told otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

/// Severity, for styling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Neutral.
    #[default]
    Info,
    /// Completed successfully.
    Success,
    /// Needs attention.
    Warning,
    /// Failed.
    Error,
}

/// Identifies a notification for early dismissal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

/// A posted notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Identity.
    pub id: NotificationId,
    /// Severity.
    pub level: Level,
    /// Text.
    pub message: String,
    /// When it expires.
    pub deadline: Duration,
}

/// What the sink is told.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotifierEvent<'a> {
    /// A notification was posted.
    Shown(&'a Notification),
    /// A notification expired or was dismissed.
    Dismissed(NotificationId),
}

/// Sink callback type.
pub type NotifySink = Box<dyn FnMut(NotifierEvent<'_>)>;

/// Posts notifications to a host-provided sink and expires them.
pub struct Notifier {
    sink: NotifySink,
    active: Vec<Notification>,
    duration: Duration,
    next_id: u64,
}

impl core::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier")
            .field("active", &self.active)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Create a notifier that reports to `sink`.
    pub fn new(sink: impl FnMut(NotifierEvent<'_>) + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            active: Vec::new(),
            duration: DEFAULT_DURATION,
            next_id: 0,
        }
    }

    /// Default lifetime for notifications posted without an explicit duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Post a notification with the default lifetime.
    pub fn notify(
        &mut self,
        level: Level,
        message: impl Into<String>,
        now: Duration,
    ) -> NotificationId {
        self.notify_for(level, message, now, self.duration)
    }

    /// Post a notification that expires after `duration`.
    pub fn notify_for(
        &mut self,
        level: Level,
        message: impl Into<String>,
        now: Duration,
        duration: Duration,
    ) -> NotificationId {
        self.next_id += 1;
        let notification = Notification {
            id: NotificationId(self.next_id),
            level,
            message: message.into(),
            deadline: now.saturating_add(duration),
        };
        let id = notification.id;
        (self.sink)(NotifierEvent::Shown(&notification));
        self.active.push(notification);
        id
    }

    /// Post an info notification.
    pub fn info(&mut self, message: impl Into<String>, now: Duration) -> NotificationId {
        self.notify(Level::Info, message, now)
    }

    /// Post a success notification.
    pub fn success(&mut self, message: impl Into<String>, now: Duration) -> NotificationId {
        self.notify(Level::Success, message, now)
    }

    /// Post a warning notification.
    pub fn warning(&mut self, message: impl Into<String>, now: Duration) -> NotificationId {
        self.notify(Level::Warning, message, now)
    }

    /// Post an error notification.
    pub fn error(&mut self, message: impl Into<String>, now: Duration) -> NotificationId {
        self.notify(Level::Error, message, now)
    }

    /// Remove a notification before it expires. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        if self.active.len() == before {
            return false;
        }
        (self.sink)(NotifierEvent::Dismissed(id));
        true
    }

    /// Expire everything whose deadline is at or before `now`. Returns how many expired.
    pub fn poll(&mut self, now: Duration) -> usize {
        let mut expired = 0;
        let sink = &mut self.sink;
        self.active.retain(|n| {
            if n.deadline <= now {
                sink(NotifierEvent::Dismissed(n.id));
                expired += 1;
                false
            } else {
                true
            }
        });
        if expired > 0 {
            log::trace!("expired {expired} notification(s)");
        }
        expired
    }

    /// Notifications currently up, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Earliest pending expiry, for scheduling the next [`Notifier::poll`].
    pub fn next_deadline(&self) -> Option<Duration> {
        self.active.iter().map(|n| n.deadline).min()
    }
}
