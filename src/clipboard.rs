//! Clipboard capability.
//!
//! The flow only needs "write this text, tell me whether it worked".
//! [`SystemClipboard`] talks to the desktop clipboard through `arboard`;
//! [`MemoryClipboard`] keeps the text in memory and can be told to fail.
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard was opened but refused the text.
    #[error("Clipboard write rejected: {0}")]
    WriteRejected(String),
}

/// Plain-text clipboard writes.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Desktop clipboard backed by `arboard`.
///
/// The handle is opened lazily on first write and dropped after a failure so the
/// next copy retries from scratch (e.g. after an X11 server restart).
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(handle);
        }

        let Some(handle) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".into()));
        };

        match handle.set_text(text) {
            Ok(()) => {
                tracing::debug!(len = text.len(), "Wrote link to system clipboard");
                Ok(())
            }
            Err(e) => {
                self.inner = None;
                Err(ClipboardError::WriteRejected(e.to_string()))
            }
        }
    }
}

/// In-memory clipboard shared between clones.
///
/// Clones observe the same contents, so a test can hand one clone to the app and
/// keep another to inspect what was written.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    contents: Option<String>,
    writes: usize,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write.
    pub fn denying() -> Self {
        let clipboard = Self::default();
        clipboard.set_deny(true);
        clipboard
    }

    pub fn set_deny(&self, deny: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.deny = deny;
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.contents.clone())
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.state.lock().map(|s| s.writes).unwrap_or(0)
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard state poisoned".into()))?;
        if state.deny {
            return Err(ClipboardError::WriteRejected("permission denied".into()));
        }
        state.contents = Some(text.to_owned());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shared_between_clones() {
        let observer = MemoryClipboard::new();
        let mut writer = observer.clone();
        writer.write("https://linklux.io/abc123").unwrap();

        assert_eq!(
            observer.contents().as_deref(),
            Some("https://linklux.io/abc123")
        );
        assert_eq!(observer.writes(), 1);
    }

    #[test]
    fn test_memory_clipboard_denies() {
        let mut clipboard = MemoryClipboard::denying();
        let err = clipboard.write("x").unwrap_err();
        assert!(matches!(err, ClipboardError::WriteRejected(_)));
        assert!(clipboard.contents().is_none());
        assert_eq!(clipboard.writes(), 0);

        clipboard.set_deny(false);
        assert!(clipboard.write("x").is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = ClipboardError::Unavailable("no display".into());
        assert_eq!(err.to_string(), "Clipboard unavailable: no display");
    }
}
