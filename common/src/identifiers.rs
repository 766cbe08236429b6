use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    /// Trims and uppercases user input. `None` when nothing usable is left or
    /// the id would not be a valid single document key.
    pub fn parse(input: &str) -> Option<Self> {
        let id = input.trim().to_uppercase();
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
