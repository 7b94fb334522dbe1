//! Per-device interruptible lock.
//!
//! Every driver instance keeps its bus handle and its small piece of state
//! behind one [`DeviceLock`]. Acquisition waits like a normal async mutex
//! but can be cancelled from outside with [`DeviceLock::interrupt`]; the
//! waiter then gets [`Interrupted`] instead of blocking indefinitely.
//!
//! Only callers already waiting see an interrupt. One raised while nobody
//! waits is dropped when the next caller starts to acquire.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_sync::signal::Signal;

/// Lock acquisition was interrupted; the caller should retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interrupted;

/// Async mutex whose waiters can be interrupted.
pub struct DeviceLock<M: RawMutex, T> {
    inner: Mutex<M, T>,
    interrupt: Signal<M, ()>,
}

impl<M: RawMutex, T> DeviceLock<M, T> {
    /// Wrap `value` in a new, unlocked device lock.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
            interrupt: Signal::new(),
        }
    }

    /// Acquire the lock, or fail with [`Interrupted`] if
    /// [`interrupt`](Self::interrupt) is called while waiting.
    pub async fn lock(&self) -> Result<MutexGuard<'_, M, T>, Interrupted> {
        self.interrupt.reset();
        match select(self.inner.lock(), self.interrupt.wait()).await {
            Either::First(guard) => {
                self.interrupt.reset();
                Ok(guard)
            }
            Either::Second(()) => Err(Interrupted),
        }
    }

    /// Wake the current waiter with [`Interrupted`].
    pub fn interrupt(&self) {
        self.interrupt.signal(());
    }

    /// Consume the lock and return the protected value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embassy_futures::join::join;
    use embassy_futures::yield_now;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[tokio::test]
    async fn uncontended_lock_succeeds() {
        let lock = DeviceLock::<NoopRawMutex, u8>::new(7);
        let mut guard = lock.lock().await.unwrap();
        *guard += 1;
        drop(guard);
        assert_eq!(lock.into_inner(), 8);
    }

    #[tokio::test]
    async fn interrupt_while_waiting_fails_with_interrupted() {
        let lock = DeviceLock::<NoopRawMutex, u8>::new(0);
        let held = lock.lock().await.unwrap();

        let (waiter, ()) = join(lock.lock(), async {
            yield_now().await;
            lock.interrupt();
        })
        .await;
        assert!(matches!(waiter, Err(Interrupted)));

        drop(held);
        assert!(lock.lock().await.is_ok());
    }

    #[tokio::test]
    async fn interrupt_before_waiting_does_not_reach_later_waiter() {
        let lock = DeviceLock::<NoopRawMutex, u8>::new(0);
        let held = lock.lock().await.unwrap();

        // Nobody waiting yet.
        lock.interrupt();

        let (waiter, ()) = join(lock.lock(), async move {
            yield_now().await;
            drop(held);
        })
        .await;
        assert!(waiter.is_ok());
    }

    #[tokio::test]
    async fn interrupt_on_free_lock_is_dropped() {
        let lock = DeviceLock::<NoopRawMutex, u8>::new(0);
        lock.interrupt();
        drop(lock.lock().await.unwrap());
        assert!(lock.lock().await.is_ok());
    }
}
