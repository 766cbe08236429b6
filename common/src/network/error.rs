use std::fmt;

use super::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    NetworkDisabled,
    InvalidRoomId,
    RoomNotFound,
    RoomFull,
    NotConnected,
    NotYourTurn,
    Store(StoreError),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::NetworkDisabled => write!(f, "Online play is not enabled."),
            NetworkError::InvalidRoomId => write!(f, "Enter a Room ID."),
            NetworkError::RoomNotFound => write!(f, "Room not found."),
            NetworkError::RoomFull => write!(f, "Room already full."),
            NetworkError::NotConnected => write!(f, "Not connected."),
            NetworkError::NotYourTurn => write!(f, "Wait for your turn."),
            NetworkError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for NetworkError {
    fn from(e: StoreError) -> Self {
        NetworkError::Store(e)
    }
}
