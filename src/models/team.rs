//! Team data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// A registered team. Immutable after creation except for deletion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name, unique across all teams.
    pub name: String,
}

impl Team {
    /// Create a new team with the given name and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Compact view of this team (for match representations).
    pub fn summary(&self) -> TeamSummary {
        TeamSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Compact team view embedded in match representations (id + name).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
}
