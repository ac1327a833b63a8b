//! Domain primitives: GameId, PlayerId.

use serde::{Deserialize, Serialize};

/// Game identifier (uuid string for games created by this service).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Create a GameId from a string.
    pub fn new(id: String) -> Self {
        GameId(id)
    }

    /// Generate a fresh random GameId.
    pub fn generate() -> Self {
        GameId(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identifier, assigned by whoever owns the roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a PlayerId from a string.
    pub fn new(id: String) -> Self {
        PlayerId(id)
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_game_ids_are_unique() {
        let a = GameId::generate();
        let b = GameId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = PlayerId::new("p-7".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-7\"");
        assert_eq!(id.to_string(), "p-7");
    }
}
