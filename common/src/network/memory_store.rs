use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;

use super::room::{RoomDocument, RoomUpdate};
use super::store::{DocumentStore, StoreError, StoreEvent, Subscription};

type DocumentKey = (String, String);

struct Subscriber {
    id: u64,
    sender: mpsc::UnboundedSender<StoreEvent>,
}

#[derive(Default)]
struct StoreState {
    documents: HashMap<DocumentKey, RoomDocument>,
    subscribers: HashMap<DocumentKey, Vec<Subscriber>>,
    next_subscriber_id: u64,
    write_count: usize,
    fail_writes: bool,
}

impl StoreState {
    fn check_writable(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        self.write_count += 1;
        Ok(())
    }

    fn notify(&mut self, key: &DocumentKey, event: StoreEvent) {
        if let Some(subscribers) = self.subscribers.get_mut(key) {
            subscribers.retain(|subscriber| subscriber.sender.send(event.clone()).is_ok());
        }
    }

    fn notify_current(&mut self, key: &DocumentKey) {
        let event = match self.documents.get(key) {
            Some(document) => StoreEvent::Updated(document.clone()),
            None => StoreEvent::Removed,
        };
        self.notify(key, event);
    }
}

/// Process-local document store. Every clone shares the same documents, so
/// several controllers in one process can play against each other.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Successful set/update/delete calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn document(&self, collection: &str, id: &str) -> Option<RoomDocument> {
        self.lock().documents.get(&key(collection, id)).cloned()
    }

    pub fn subscriber_count(&self, collection: &str, id: &str) -> usize {
        self.lock()
            .subscribers
            .get(&key(collection, id))
            .map_or(0, |subscribers| subscribers.len())
    }

    /// Drops every subscriber of a document, which closes their feeds.
    pub fn disconnect_subscribers(&self, collection: &str, id: &str) {
        self.lock().subscribers.remove(&key(collection, id));
    }
}

fn key(collection: &str, id: &str) -> DocumentKey {
    (collection.to_string(), id.to_string())
}

fn remove_subscriber(state: &Weak<Mutex<StoreState>>, key: &DocumentKey, id: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(subscribers) = state.subscribers.get_mut(key) {
        subscribers.retain(|subscriber| subscriber.id != id);
        if subscribers.is_empty() {
            state.subscribers.remove(key);
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<RoomDocument>, StoreError> {
        Ok(self.document(collection, id))
    }

    async fn set(&self, collection: &str, id: &str, document: RoomDocument) -> Result<(), StoreError> {
        let key = key(collection, id);
        let mut state = self.lock();
        state.check_writable()?;
        state.documents.insert(key.clone(), document);
        state.notify_current(&key);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, update: RoomUpdate) -> Result<(), StoreError> {
        let key = key(collection, id);
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        let Some(document) = state.documents.get_mut(&key) else {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        };
        update.apply_to(document);
        state.check_writable()?;
        state.notify_current(&key);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let key = key(collection, id);
        let mut state = self.lock();
        state.check_writable()?;
        if state.documents.remove(&key).is_some() {
            state.notify(&key, StoreEvent::Removed);
        }
        Ok(())
    }

    async fn subscribe(&self, collection: &str, id: &str) -> Result<Subscription, StoreError> {
        let key = key(collection, id);
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut state = self.lock();
        if let Some(document) = state.documents.get(&key) {
            let _ = sender.send(StoreEvent::Updated(document.clone()));
        }
        let subscriber_id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        state
            .subscribers
            .entry(key.clone())
            .or_default()
            .push(Subscriber { id: subscriber_id, sender });
        drop(state);

        let weak_state = Arc::downgrade(&self.state);
        Ok(Subscription::new(receiver, move || {
            remove_subscriber(&weak_state, &key, subscriber_id)
        }))
    }
}
