//! Copy-to-clipboard with recents tracking
//!
//! Clipboard failures (denied permission, unsupported platform) are handled
//! here: the user gets a failure toast and recents stay untouched. Nothing
//! is propagated to the caller.

use crate::feedback::{Toast, ToastKind, Toaster, FAILURE_TOAST_DURATION, SUCCESS_TOAST_DURATION};
use crate::interface::ClipboardError;
use crate::recents::Recents;
use crate::storage::KeyValueStore;
use parking_lot::Mutex;

pub const COPY_FAILED_MESSAGE: &str = "복사 실패 (브라우저 권한 확인)";

pub fn copied_message(emoji: &str) -> String {
    format!("복사됨: {}", emoji)
}

/// System clipboard seam
#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last written text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

pub struct CopyService<C: Clipboard, S: KeyValueStore> {
    clipboard: C,
    recents: Mutex<Recents<S>>,
    toaster: Toaster,
}

impl<C: Clipboard, S: KeyValueStore> CopyService<C, S> {
    pub fn new(clipboard: C, store: S) -> Self {
        Self {
            clipboard,
            recents: Mutex::new(Recents::load(store)),
            toaster: Toaster::new(),
        }
    }

    /// Copy one emoji. Must run inside a Tokio runtime (toast timers).
    pub async fn copy_emoji(&self, emoji: &str) -> CopyOutcome {
        match self.clipboard.write_text(emoji).await {
            Ok(()) => {
                self.toaster.show(
                    Toast { message: copied_message(emoji), kind: ToastKind::Success },
                    SUCCESS_TOAST_DURATION,
                );
                self.recents.lock().record(emoji);
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::info!(error = %e, "clipboard write failed");
                self.toaster.show(
                    Toast { message: COPY_FAILED_MESSAGE.to_string(), kind: ToastKind::Failure },
                    FAILURE_TOAST_DURATION,
                );
                CopyOutcome::Failed
            }
        }
    }

    pub fn recents(&self) -> Vec<String> {
        self.recents.lock().items().to_vec()
    }

    pub fn clear_recents(&self) {
        self.recents.lock().clear();
    }

    pub fn toast(&self) -> Option<Toast> {
        self.toaster.current()
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}
