//! Signal/slot notifications for rowbox.
//!
//! A [`Signal<Args>`] holds any number of connected slots (closures). Emitting
//! the signal invokes every slot on the emitting thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type used for change notifications
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionGuard`] - Keeps a slot connected for as long as it lives
//!
//! # Re-entrancy
//!
//! Slots are collected before any of them run and the connection table is not
//! locked while they execute. A slot may therefore connect, disconnect, or emit
//! on the same signal, and it may call back into whatever object owns the
//! signal. Connections made during an emission take effect on the next one.
//!
//! # Example
//!
//! ```
//! use rowbox_core::Signal;
//!
//! let rows_changed = Signal::<usize>::new();
//!
//! let conn_id = rows_changed.connect(|count| {
//!     println!("now {count} rows");
//! });
//!
//! rows_changed.emit(3);
//! rows_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};

use parking_lot::Mutex;
use slotmap::SlotMap;

use crate::error::{Result, SignalError};
use crate::logging::targets;

slotmap::new_key_type! {
    /// Handle to one connected slot.
    ///
    /// Pass it to [`Signal::disconnect`] to remove the slot. Once removed, the
    /// handle is stale and never matches a later connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of slots called with `&Args` on every emission.
///
/// `Args` is usually a small value or a tuple; use `()` when there is nothing
/// to pass.
///
/// `Signal<Args>` is `Send + Sync`. Slots always run on the thread that calls
/// [`emit`](Self::emit); there is no queued delivery.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    muted: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.lock().len())
            .field("blocked", &self.muted.load(SeqCst))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// An unconnected signal.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            muted: AtomicBool::new(false),
        }
    }

    /// Adds `slot`, to be called on every later emission.
    ///
    /// ```
    /// use rowbox_core::Signal;
    ///
    /// let titled = Signal::<String>::new();
    /// let id = titled.connect(|title| println!("title is now {title}"));
    /// titled.emit("Settings".to_owned());
    /// # let _ = id;
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Adds `slot` until the returned guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            id: self.connect(slot),
            signal: self,
        }
    }

    /// Removes the slot behind `id`. Returns `false` for a stale ID.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnect a slot, reporting a stale or unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<()> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Removes every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of slots currently connected.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Mutes or unmutes the signal. A muted signal drops emissions.
    pub fn set_blocked(&self, blocked: bool) {
        self.muted.store(blocked, SeqCst);
    }

    /// Whether emissions are currently dropped.
    pub fn is_blocked(&self) -> bool {
        self.muted.load(SeqCst)
    }

    /// Calls every connected slot with `args`, in connection order.
    ///
    /// Does nothing while the signal is blocked.
    #[tracing::instrument(skip_all, target = "rowbox_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(
            target: targets::SIGNAL,
            connection_count = snapshot.len(),
            "emitting signal"
        );

        for slot in &snapshot {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

/// Disconnects its slot on drop.
///
/// Returned by [`Signal::connect_scoped`]. It borrows the signal, so it cannot
/// outlive it.
///
/// ```
/// use rowbox_core::Signal;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let tapped = Signal::<usize>::new();
/// let total = Arc::new(AtomicUsize::new(0));
/// {
///     let total = total.clone();
///     let _guard = tapped.connect_scoped(move |&row| {
///         total.fetch_add(row, Ordering::Relaxed);
///     });
///     tapped.emit(5);
/// }
/// tapped.emit(7);
/// assert_eq!(total.load(Ordering::Relaxed), 5);
/// ```
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> std::fmt::Debug for ConnectionGuard<'_, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("ConnectionGuard").field(&self.id).finish()
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn recorder<T: Copy + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        signal.connect(move |&v| sink.lock().push(v));
        log
    }

    #[test]
    fn test_emit_reaches_slot() {
        let rows = Signal::<usize>::new();
        let log = recorder(&rows);

        rows.emit(3);
        rows.emit(7);

        assert_eq!(*log.lock(), vec![3, 7]);
    }

    #[test]
    fn test_disconnected_slot_stays_quiet() {
        let rows = Signal::<usize>::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let id = rows.connect(move |&v| sink.lock().push(v));

        rows.emit(1);
        assert!(rows.disconnect(id));
        rows.emit(2);

        assert_eq!(*log.lock(), vec![1]);
        assert!(!rows.disconnect(id));
        assert_eq!(rows.try_disconnect(id), Err(SignalError::InvalidConnection));
    }

    #[test]
    fn test_muted_signal_drops_emissions() {
        let rows = Signal::<usize>::new();
        let log = recorder(&rows);

        rows.emit(1);
        rows.set_blocked(true);
        assert!(rows.is_blocked());
        rows.emit(2);
        rows.set_blocked(false);
        rows.emit(3);

        assert_eq!(*log.lock(), vec![1, 3]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let ping = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..4 {
            let order = order.clone();
            ping.connect(move |_| order.lock().push(i));
        }

        ping.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disconnect_all_empties_signal() {
        let ping = Signal::<()>::new();
        (0..5).for_each(|_| {
            ping.connect(|_| {});
        });

        assert_eq!(ping.connection_count(), 5);
        ping.disconnect_all();
        assert_eq!(ping.connection_count(), 0);
    }

    #[test]
    fn test_guard_disconnects_on_drop() {
        let rows = Signal::<usize>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        {
            let sink = log.clone();
            let guard = rows.connect_scoped(move |&v| sink.lock().push(v));
            assert_eq!(rows.connection_count(), 1);
            let _ = guard.id();
            rows.emit(1);
        }

        rows.emit(2);

        assert_eq!(*log.lock(), vec![1]);
        assert_eq!(rows.connection_count(), 0);
    }

    #[test]
    fn test_slot_may_reenter_signal() {
        let signal = Arc::new(Signal::<u32>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner = signal.clone();
        let hits_clone = hits.clone();
        signal.connect(move |&depth| {
            hits_clone.fetch_add(1, SeqCst);
            if depth < 2 {
                inner.emit(depth + 1);
                inner.connect(|_| {});
            }
        });

        signal.emit(0);

        assert_eq!(hits.load(SeqCst), 3);
        assert_eq!(signal.connection_count(), 3);
    }

    #[test]
    fn test_concurrent_emitters() {
        let rows = Arc::new(Signal::<usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let counted = calls.clone();
        rows.connect(move |_| {
            counted.fetch_add(1, SeqCst);
        });

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let rows = rows.clone();
                std::thread::spawn(move || rows.emit(i))
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(calls.load(SeqCst), 8);
    }
}
