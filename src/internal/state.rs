use tokio::sync::{broadcast, watch};

/// Holder of a single current value that listeners can observe.
///
/// The owner writes through `set`/`update`; readers either take a snapshot with
/// `get` or `subscribe` and await changes. Every write notifies, even when the
/// new value equals the old one.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// A receiver whose current value is already marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// A second handle that writes into the same cell.
    pub(crate) fn writer(&self) -> StateWriter<T> {
        StateWriter {
            tx: self.tx.clone(),
        }
    }
}

/// Write handle moved into background tasks.
#[derive(Debug, Clone)]
pub(crate) struct StateWriter<T> {
    tx: watch::Sender<T>,
}

impl<T> StateWriter<T> {
    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }
}

/// One-shot notifications (snackbar-style). Each listener sees each effect at
/// most once; effects sent while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct EffectQueue<T> {
    tx: broadcast::Sender<T>,
}

const EFFECT_CAPACITY: usize = 16;

impl<T: Clone> EffectQueue<T> {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EFFECT_CAPACITY);
        Self { tx }
    }

    pub fn send(&self, effect: T) {
        // Err only means there are no listeners right now.
        let _ = self.tx.send(effect);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for EffectQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_get_set_update() {
        let cell = StateCell::new(1);
        assert_eq!(cell.get(), 1);

        cell.set(2);
        assert_eq!(cell.get(), 2);

        cell.update(|v| *v += 10);
        assert_eq!(cell.get(), 12);
    }

    #[tokio::test]
    async fn test_state_cell_notifies_every_subscriber() {
        let cell = StateCell::new("loading".to_string());
        let mut a = cell.subscribe();
        let mut b = cell.subscribe();
        assert!(!a.has_changed().unwrap());

        cell.set("ready".to_string());

        a.changed().await.unwrap();
        b.changed().await.unwrap();
        assert_eq!(*a.borrow_and_update(), "ready");
        assert_eq!(*b.borrow_and_update(), "ready");
        assert!(!a.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_writer_shares_cell() {
        let cell = StateCell::new(0u8);
        let writer = cell.writer();
        tokio::spawn(async move { writer.set(5) }).await.unwrap();
        assert_eq!(cell.get(), 5);
    }

    #[tokio::test]
    async fn test_effect_queue_delivers_once_per_listener() {
        let queue = EffectQueue::new();
        queue.send("dropped");

        let mut first = queue.subscribe();
        let mut second = queue.subscribe();
        queue.send("hello");

        assert_eq!(first.recv().await.unwrap(), "hello");
        assert_eq!(second.recv().await.unwrap(), "hello");
        assert!(first.try_recv().is_err());
    }
}
