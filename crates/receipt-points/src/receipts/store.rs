use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{Points, ReceiptId};

/// Storage abstraction so the service can be exercised against any backend.
pub trait ReceiptStore: Send + Sync {
    /// Record the points for `id`, replacing any earlier value.
    fn put(&self, id: ReceiptId, points: Points) -> Result<(), StoreError>;
    fn get(&self, id: &ReceiptId) -> Result<Option<Points>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("receipt store lock poisoned")]
    Poisoned,
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store backed by a lock-guarded map.
///
/// Entries are never evicted, so memory grows with every processed receipt until the process
/// exits.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReceiptStore {
    entries: Arc<RwLock<HashMap<ReceiptId, Points>>>,
}

impl InMemoryReceiptStore {
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, id: ReceiptId, points: Points) -> Result<(), StoreError> {
        let mut guard = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(id, points);
        Ok(())
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<Points>, StoreError> {
        let guard = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn put_overwrites_existing_entry() {
        let store = InMemoryReceiptStore::default();
        let id = ReceiptId("7fb1377b-b223-49d9-a31a-5a02701dd310".to_string());

        store.put(id.clone(), 28).expect("first put");
        store.put(id.clone(), 109).expect("second put");

        assert_eq!(store.get(&id).expect("get succeeds"), Some(109));
        assert_eq!(store.len().expect("len"), 1);
    }

    #[test]
    fn get_returns_none_for_unknown_ids() {
        let store = InMemoryReceiptStore::default();
        assert!(store.is_empty().expect("is_empty"));
        assert_eq!(
            store
                .get(&ReceiptId("nonexistent-id".to_string()))
                .expect("get succeeds"),
            None
        );
    }

    #[test]
    fn concurrent_inserts_are_all_visible() {
        let store = InMemoryReceiptStore::default();
        let handles: Vec<_> = (0..8u64)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for n in 0..50u64 {
                        let id = ReceiptId(format!("worker-{worker}-{n}"));
                        store.put(id, worker * 100 + n).expect("put succeeds");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker finished");
        }

        assert_eq!(store.len().expect("len"), 400);
        assert_eq!(
            store
                .get(&ReceiptId("worker-3-7".to_string()))
                .expect("get succeeds"),
            Some(307)
        );
    }
}
