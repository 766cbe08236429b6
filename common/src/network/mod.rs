mod error;
mod memory_store;
mod protocol;
pub mod room;
mod store;

pub use error::NetworkError;
pub use memory_store::InMemoryDocumentStore;
pub use protocol::{
    MoveSubmission, NetworkClient, NetworkSession, STATUS_DISCONNECTED, STATUS_LEFT, STATUS_NOT_CONNECTED,
    STATUS_ROOM_CLOSED, SnapshotEvent,
};
pub use room::{DEFAULT_ROOM_COLLECTION, RoomDocument, RoomPlayers, RoomUpdate};
pub use store::{DocumentStore, StoreError, StoreEvent, Subscription};
