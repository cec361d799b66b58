//! Transient notices and the toast stack that presents them.
//!
//! The flow only says *what happened* by emitting a [`Notice`]; the
//! [`Toaster`] decides how long it stays on screen and how many are shown.
use std::borrow::Cow;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

/// The fixed set of things the user is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    MissingInput,
    InvalidInput,
    Shortened,
    Copied,
    CopyFailed,
}

impl NoticeKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::MissingInput => "URL Required",
            Self::InvalidInput => "Invalid URL",
            Self::Shortened => "Link shortened successfully!",
            Self::Copied => "Copied to clipboard!",
            Self::CopyFailed => "Copy failed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MissingInput => "Please enter a URL to shorten",
            Self::InvalidInput => "Please enter a valid URL (include https://)",
            Self::Shortened => "Your premium short link is ready",
            Self::Copied => "Your short link is ready to share",
            Self::CopyFailed => "Please copy the link manually",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::MissingInput | Self::InvalidInput | Self::CopyFailed => Severity::Destructive,
            Self::Shortened | Self::Copied => Severity::Normal,
        }
    }
}

/// A notification: title, description and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub severity: Severity,
}

impl From<NoticeKind> for Notice {
    fn from(kind: NoticeKind) -> Self {
        Self {
            kind,
            title: Cow::Borrowed(kind.title()),
            description: Cow::Borrowed(kind.description()),
            severity: kind.severity(),
        }
    }
}

/// A notice currently on screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Default number of toasts visible at once; a newer toast evicts the oldest.
pub const DEFAULT_TOAST_LIMIT: usize = 1;

/// Bounded stack of auto-dismissing toasts.
pub struct Toaster {
    toasts: VecDeque<Toast>,
    limit: usize,
    duration: Duration,
}

impl Toaster {
    pub fn new(limit: usize, duration: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(limit.max(1)),
            limit: limit.max(1),
            duration,
        }
    }

    /// Show a notice, evicting the oldest toasts beyond the limit.
    pub fn push(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Normal => tracing::info!(
                title = %notice.title,
                description = %notice.description,
                "Notice"
            ),
            Severity::Destructive => tracing::warn!(
                title = %notice.title,
                description = %notice.description,
                "Notice"
            ),
        }

        self.toasts.push_back(Toast {
            notice,
            shown_at: Instant::now(),
        });
        while self.toasts.len() > self.limit {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts older than the display duration.
    /// Returns true if anything was removed.
    pub fn clear_expired(&mut self) -> bool {
        let before = self.toasts.len();
        let duration = self.duration;
        self.toasts.retain(|t| t.shown_at.elapsed() < duration);
        self.toasts.len() != before
    }

    /// Dismiss every visible toast. Returns true if any were showing.
    pub fn dismiss_all(&mut self) -> bool {
        let had_any = !self.toasts.is_empty();
        self.toasts.clear();
        had_any
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Most recent toast, if any.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_LIMIT, DEFAULT_TOAST_DURATION)
    }
}
