//! Explicit state containers for the client front end.
//!
//! `Store<S>` is the one subscription mechanism: read with `get`, mutate
//! with `update` (which always publishes), observe with `subscribe`. The
//! decoder and tokenizer never touch a store; they communicate through the
//! stream-event callback, and front ends fold events into state here.

crate::reexport!(connections);
crate::reexport!(history);
crate::reexport!(query);

use tokio::sync::watch;

/// Shared state container with change notification.
pub struct Store<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> Store<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Watch for state changes. The receiver observes every publish.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Mutate the state and publish the result to all subscribers.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_publishes_to_subscribers() {
        let store = Store::new(0_u32);
        let mut rx = store.subscribe();
        store.update(|n| *n += 1);
        rx.changed().await.expect("change notification");
        assert_eq!(*rx.borrow(), 1);
        assert_eq!(store.get(), 1);
    }

    #[test]
    fn get_returns_a_snapshot() {
        let store = Store::new(vec![1, 2]);
        let snapshot = store.get();
        store.update(|v| v.push(3));
        assert_eq!(snapshot, vec![1, 2]);
        assert_eq!(store.get(), vec![1, 2, 3]);
    }
}
