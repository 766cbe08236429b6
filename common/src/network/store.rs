use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;

use super::room::{RoomDocument, RoomUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound { collection: String, id: String },
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { collection, id } => {
                write!(f, "Document {}/{} does not exist", collection, id)
            }
            StoreError::Unavailable(reason) => write!(f, "Store unavailable: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Updated(RoomDocument),
    Removed,
}

/// Live feed of one document. Dropping it cancels the registration.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<StoreEvent>,
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<StoreEvent>,
        cancel: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            receiver,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// `None` once the store has closed the feed.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        self.receiver.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.cancel_registration();
    }

    fn cancel_registration(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
        self.receiver.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_registration();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Remote document store holding room documents keyed by collection and id.
pub trait DocumentStore: Send + Sync + 'static {
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<RoomDocument>, StoreError>> + Send;

    fn set(
        &self,
        collection: &str,
        id: &str,
        document: RoomDocument,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fails with `NotFound` if the document does not exist.
    fn update(
        &self,
        collection: &str,
        id: &str,
        update: RoomUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn subscribe(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Subscription, StoreError>> + Send;
}
