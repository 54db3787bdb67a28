//! Transient toast messages
//!
//! Only one toast is visible at a time. Showing a new toast cancels the
//! pending dismissal of the previous one, so an old timer can never clear a
//! newer message. Dropping the `Toaster` cancels whatever timer is pending.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_millis(900);
pub const FAILURE_TOAST_DURATION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Toast, generation and pending timer change together under one lock
#[derive(Default)]
struct ToastSlot {
    toast: Option<Toast>,
    /// Bumped on every show so a stale timer can recognise itself
    generation: u64,
    timer: Option<CancellationToken>,
}

/// Requires a Tokio runtime: dismissal timers are spawned tasks.
pub struct Toaster {
    slot: Arc<Mutex<ToastSlot>>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
        }
    }

    /// Show `toast` for `duration`, replacing any visible toast and its timer
    pub fn show(&self, toast: Toast, duration: Duration) {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.toast = Some(toast);
            if let Some(previous) = slot.timer.replace(token.clone()) {
                previous.cancel();
            }
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    let mut slot = slot.lock();
                    if slot.generation == generation {
                        slot.toast = None;
                        slot.timer = None;
                    }
                }
            }
        });
    }

    pub fn current(&self) -> Option<Toast> {
        self.slot.lock().toast.clone()
    }

    /// Hide the current toast immediately
    pub fn dismiss(&self) {
        let mut slot = self.slot.lock();
        if let Some(token) = slot.timer.take() {
            token.cancel();
        }
        slot.toast = None;
    }
}

impl Drop for Toaster {
    fn drop(&mut self) {
        if let Some(token) = self.slot.lock().timer.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(message: &str) -> Toast {
        Toast { message: message.into(), kind: ToastKind::Success }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires() {
        let toaster = Toaster::new();
        toaster.show(toast("a"), Duration::from_millis(900));
        assert_eq!(toaster.current(), Some(toast("a")));

        tokio::time::sleep(Duration::from_millis(950)).await;
        assert_eq!(toaster.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_cancels_old_timer() {
        let toaster = Toaster::new();
        toaster.show(toast("first"), Duration::from_millis(900));
        tokio::time::sleep(Duration::from_millis(800)).await;
        toaster.show(toast("second"), Duration::from_millis(900));

        // The first timer would have fired here
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(toaster.current(), Some(toast("second")));

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(toaster.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss() {
        let toaster = Toaster::new();
        toaster.show(toast("a"), Duration::from_secs(5));
        toaster.dismiss();
        assert_eq!(toaster.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let toaster = Toaster::new();
        let slot = Arc::clone(&toaster.slot);
        toaster.show(toast("a"), Duration::from_millis(900));
        drop(toaster);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        // Cancelled timer never ran, so the slot still holds the toast
        assert_eq!(slot.lock().toast, Some(toast("a")));
        assert_eq!(Arc::strong_count(&slot), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_timer_is_the_live_one() {
        let toaster = Toaster::new();
        toaster.show(toast("first"), Duration::from_millis(900));
        let first = toaster.slot.lock().timer.clone().unwrap();
        toaster.show(toast("second"), Duration::from_millis(900));

        let slot = toaster.slot.lock();
        assert!(first.is_cancelled());
        assert!(!slot.timer.as_ref().unwrap().is_cancelled());
        assert_eq!(slot.generation, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_shows_always_dismiss() {
        let toaster = Arc::new(Toaster::new());
        for round in 0..30 {
            let a = Arc::clone(&toaster);
            let b = Arc::clone(&toaster);
            let (ra, rb) = tokio::join!(
                tokio::spawn(async move { a.show(toast("a"), Duration::from_millis(5)) }),
                tokio::spawn(async move { b.show(toast("b"), Duration::from_millis(5)) }),
            );
            ra.unwrap();
            rb.unwrap();

            tokio::time::sleep(Duration::from_millis(100)).await;
            assert_eq!(toaster.current(), None, "toast stuck after round {}", round);
        }
    }
}
