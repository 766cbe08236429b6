use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::error::NetworkError;
use super::room::{RoomDocument, RoomUpdate};
use super::store::{DocumentStore, StoreError, StoreEvent, Subscription};
use crate::games::SessionRng;
use crate::games::tictactoe::{DecisionKey, GameSession, Mark, MoveError, Outcome, SnapshotEffect, evaluate};
use crate::id_generator::generate_room_id;
use crate::identifiers::RoomId;
use crate::log;

pub const STATUS_NOT_CONNECTED: &str = "Not connected.";
pub const STATUS_LEFT: &str = "Left room.";
pub const STATUS_ROOM_CLOSED: &str = "Room closed.";
pub const STATUS_DISCONNECTED: &str = "Disconnected.";

/// Local view of the room this client is seated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSession {
    pub room_id: RoomId,
    pub local_mark: Mark,
    pub is_local_turn: bool,
}

impl NetworkSession {
    pub fn turn_label(&self) -> String {
        if self.is_local_turn {
            format!("You = {} (Your turn)", self.local_mark)
        } else {
            format!("You = {}", self.local_mark)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEvent {
    Updated(RoomDocument),
    Removed,
    /// The store stopped delivering updates.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSubmission {
    Written { outcome: Outcome },
    /// The latest document rejected the placement; nothing was written.
    Rejected(MoveError),
    GameDecided,
    RoomClosed,
}

pub struct NetworkClient<S: DocumentStore> {
    store: Option<Arc<S>>,
    collection: String,
    auto_reset_delay: Duration,
    session: Option<NetworkSession>,
    subscription: Option<Subscription>,
    status: String,
}

impl<S: DocumentStore> NetworkClient<S> {
    /// `store: None` disables every room operation.
    pub fn new(store: Option<Arc<S>>, collection: impl Into<String>, auto_reset_delay: Duration) -> Self {
        Self {
            store,
            collection: collection.into(),
            auto_reset_delay,
            session: None,
            subscription: None,
            status: STATUS_NOT_CONNECTED.to_string(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&NetworkSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn store(&self) -> Result<Arc<S>, NetworkError> {
        self.store.clone().ok_or(NetworkError::NetworkDisabled)
    }

    /// Writes a fresh room and seats this client as X.
    pub async fn create_room(
        &mut self,
        requested_id: Option<&str>,
        rng: &mut SessionRng,
    ) -> Result<RoomId, NetworkError> {
        let store = self.store()?;
        let room_id = match requested_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => RoomId::parse(id).ok_or(NetworkError::InvalidRoomId)?,
            None => generate_room_id(rng),
        };

        let document = RoomDocument::new(Utc::now().timestamp_millis());
        store.set(&self.collection, room_id.as_str(), document).await?;
        log!("Created room {}", room_id);

        self.subscribe(room_id.clone(), Mark::X).await?;
        self.set_local_turn(true);
        Ok(room_id)
    }

    /// Takes the O seat of an existing room.
    pub async fn join_room(&mut self, requested_id: &str) -> Result<RoomId, NetworkError> {
        let store = self.store()?;
        let room_id = RoomId::parse(requested_id).ok_or(NetworkError::InvalidRoomId)?;

        let document = store
            .get(&self.collection, room_id.as_str())
            .await?
            .ok_or(NetworkError::RoomNotFound)?;
        if document.players.is_present(Mark::O) {
            return Err(NetworkError::RoomFull);
        }

        store
            .update(&self.collection, room_id.as_str(), RoomUpdate::presence(Mark::O, true))
            .await?;
        log!("Joined room {} as O", room_id);

        self.subscribe(room_id.clone(), Mark::O).await?;
        self.set_local_turn(document.current == Mark::O);
        Ok(room_id)
    }

    /// Follows a room as `local_mark`, replacing any previous subscription. The turn
    /// flag stays off until a snapshot says otherwise.
    pub async fn subscribe(&mut self, room_id: RoomId, local_mark: Mark) -> Result<(), NetworkError> {
        let store = self.store()?;
        if let Some(previous) = self.subscription.take() {
            log!("Replacing subscription before connecting to {}", room_id);
            previous.unsubscribe();
        }
        self.session = None;

        let subscription = store.subscribe(&self.collection, room_id.as_str()).await?;
        self.subscription = Some(subscription);
        self.status = format!("Connected to {} as {}.", room_id, local_mark);
        self.session = Some(NetworkSession {
            room_id,
            local_mark,
            is_local_turn: false,
        });
        Ok(())
    }

    fn set_local_turn(&mut self, is_local_turn: bool) {
        if let Some(session) = self.session.as_mut() {
            session.is_local_turn = is_local_turn;
        }
    }

    /// Waits for the next room event. Never resolves while unsubscribed.
    pub async fn next_snapshot(&mut self) -> SnapshotEvent {
        let Some(subscription) = self.subscription.as_mut() else {
            return std::future::pending().await;
        };
        match subscription.recv().await {
            Some(StoreEvent::Updated(document)) => SnapshotEvent::Updated(document),
            Some(StoreEvent::Removed) => SnapshotEvent::Removed,
            None => SnapshotEvent::Closed,
        }
    }

    /// Mirrors a room event into the local game. The document is authoritative.
    pub fn apply_snapshot(&mut self, event: SnapshotEvent, game: &mut GameSession) -> Option<SnapshotEffect> {
        match event {
            SnapshotEvent::Updated(document) => {
                let session = self.session.as_mut()?;
                session.is_local_turn = document.current == session.local_mark;
                let key = DecisionKey {
                    room: session.room_id.to_string(),
                    created_at: document.created_at,
                    round: document.round,
                };
                Some(game.apply_remote_snapshot(document.board, document.current, key))
            }
            SnapshotEvent::Removed => {
                if let Some(session) = &self.session {
                    log!("Room {} was removed", session.room_id);
                }
                self.status = STATUS_ROOM_CLOSED.to_string();
                None
            }
            SnapshotEvent::Closed => {
                if let Some(session) = self.session.take() {
                    log!("Subscription to room {} closed", session.room_id);
                }
                self.subscription = None;
                self.status = STATUS_DISCONNECTED.to_string();
                None
            }
        }
    }

    /// Places the local mark on the latest document, then hands the turn over.
    pub async fn submit_move(&mut self, index: usize) -> Result<MoveSubmission, NetworkError> {
        let store = self.store()?;
        let session = self.session.as_ref().ok_or(NetworkError::NotConnected)?;
        if !session.is_local_turn {
            return Err(NetworkError::NotYourTurn);
        }
        let room_id = session.room_id.clone();
        let mark = session.local_mark;

        let Some(document) = store.get(&self.collection, room_id.as_str()).await? else {
            return Ok(MoveSubmission::RoomClosed);
        };
        if evaluate(&document.board).is_decided() {
            return Ok(MoveSubmission::GameDecided);
        }
        if document.current != mark {
            return Err(NetworkError::NotYourTurn);
        }
        let board = match document.board.place(index, mark) {
            Ok(board) => board,
            Err(e) => return Ok(MoveSubmission::Rejected(e)),
        };

        store
            .update(&self.collection, room_id.as_str(), RoomUpdate::move_played(board, mark.opponent()))
            .await?;
        self.set_local_turn(false);

        let outcome = evaluate(&board);
        if outcome.is_decided() {
            self.schedule_auto_reset(store, room_id, document.round + 1);
        }
        Ok(MoveSubmission::Written { outcome })
    }

    fn schedule_auto_reset(&self, store: Arc<S>, room_id: RoomId, round: u64) {
        let collection = self.collection.clone();
        let delay = self.auto_reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.update(&collection, room_id.as_str(), RoomUpdate::next_round(round)).await {
                Ok(()) => log!("Room {} reset for round {}", room_id, round),
                Err(e) => log!("Auto-reset of room {} failed: {}", room_id, e),
            }
        });
    }

    /// Gives up the local seat. Always succeeds locally; remote cleanup errors are only logged.
    pub async fn leave_room(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            self.status = STATUS_NOT_CONNECTED.to_string();
            return false;
        };

        if let Some(store) = self.store.clone()
            && let Err(e) = self.release_seat(&store, &session).await
        {
            log!("Cleanup of room {} failed: {}", session.room_id, e);
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }

        log!("Left room {}", session.room_id);
        self.status = STATUS_LEFT.to_string();
        true
    }

    async fn release_seat(&self, store: &S, session: &NetworkSession) -> Result<(), StoreError> {
        let id = session.room_id.as_str();
        store
            .update(&self.collection, id, RoomUpdate::presence(session.local_mark, false))
            .await?;
        if let Some(document) = store.get(&self.collection, id).await?
            && document.players.is_empty()
        {
            store.delete(&self.collection, id).await?;
        }
        Ok(())
    }
}
