//! Tournament and TournamentError.

use crate::models::team::TeamId;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// All kinds are detected before any mutation, so a failed call leaves the
/// record store untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 teams supplied to bracket generation or the draw.
    InsufficientTeams,
    /// A team with this name already exists (names are unique).
    DuplicateTeamName,
    /// Team not found in the store.
    TeamNotFound(TeamId),
    /// Operation addressed at a nonexistent match.
    MatchNotFound,
    /// Declared winner is not one of the match's two occupants.
    InvalidWinner,
    /// Tournament not found in the store.
    TournamentNotFound,
    /// Record store failure, propagated without interpretation.
    Store(StoreError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams => {
                write!(f, "At least 2 teams are required")
            }
            TournamentError::DuplicateTeamName => {
                write!(f, "A team with this name already exists")
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound => write!(f, "Match not found"),
            TournamentError::InvalidWinner => {
                write!(f, "Winner must be one of the match's two teams")
            }
            TournamentError::TournamentNotFound => write!(f, "Tournament not found"),
            TournamentError::Store(e) => write!(f, "Record store error: {e}"),
        }
    }
}

impl From<StoreError> for TournamentError {
    fn from(e: StoreError) -> Self {
        TournamentError::Store(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Status label of a tournament. Caller-driven; transitions are not enforced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Created,
    InProgress,
    Finished,
}

/// A tournament run: one bracket's worth of matches hang off its id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
}

impl Tournament {
    /// Create a new tournament in `Created` status.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Created,
        }
    }
}
