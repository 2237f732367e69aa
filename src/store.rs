//! Record store seam: the persistence contract the bracket logic runs against,
//! plus the in-memory implementation used by the web server and tests.

use crate::models::{BracketMatch, MatchId, Team, TeamId, Tournament, TournamentId};
use std::collections::HashMap;

/// Opaque storage failure. The bracket logic never interprets it, only
/// propagates it to the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Persistence contract for teams, matches, and tournaments.
///
/// Callers must serialize whole operations against one store: within a single
/// `record_winner` call the winner write and the downstream slot write have to
/// become visible together. The web layer guarantees this by holding its
/// `RwLock` write guard across the whole call.
pub trait RecordStore {
    fn insert_team(&mut self, team: Team) -> Result<(), StoreError>;
    /// Remove one team and every match referencing it. Returns false when the
    /// id is unknown.
    fn remove_team(&mut self, id: TeamId) -> Result<bool, StoreError>;
    /// Remove all teams and all matches (matches first, referential integrity).
    fn clear_teams(&mut self) -> Result<(), StoreError>;
    fn team(&self, id: TeamId) -> Result<Option<Team>, StoreError>;
    /// All teams, ordered by registration.
    fn teams(&self) -> Result<Vec<Team>, StoreError>;

    /// Insert a batch of freshly built matches.
    fn insert_matches(&mut self, matches: Vec<BracketMatch>) -> Result<(), StoreError>;
    /// Write back a mutated match. The match must already exist.
    fn save_match(&mut self, m: BracketMatch) -> Result<(), StoreError>;
    fn match_by_id(&self, id: MatchId) -> Result<Option<BracketMatch>, StoreError>;
    fn match_at(
        &self,
        tournament_id: TournamentId,
        round: u32,
        position: u32,
    ) -> Result<Option<BracketMatch>, StoreError>;
    /// A tournament's matches ordered by (round, position).
    fn matches_ordered(&self, tournament_id: TournamentId)
        -> Result<Vec<BracketMatch>, StoreError>;
    /// Drop all matches of one tournament (bracket regeneration).
    fn delete_matches_for(&mut self, tournament_id: TournamentId) -> Result<(), StoreError>;

    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError>;
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;
    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError>;
    fn tournaments(&self) -> Result<Vec<Tournament>, StoreError>;
}

/// In-memory record store. Insertion order is preserved for listings.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    teams: Vec<Team>,
    matches: Vec<BracketMatch>,
    match_index: HashMap<MatchId, usize>,
    tournaments: Vec<Tournament>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex_matches(&mut self) {
        self.match_index = self
            .matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
    }
}

impl RecordStore for MemoryStore {
    fn insert_team(&mut self, team: Team) -> Result<(), StoreError> {
        self.teams.push(team);
        Ok(())
    }

    fn remove_team(&mut self, id: TeamId) -> Result<bool, StoreError> {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != id);
        if self.teams.len() == before {
            return Ok(false);
        }
        self.matches.retain(|m| !m.references(id));
        self.reindex_matches();
        Ok(true)
    }

    fn clear_teams(&mut self) -> Result<(), StoreError> {
        self.matches.clear();
        self.match_index.clear();
        self.teams.clear();
        Ok(())
    }

    fn team(&self, id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(self.teams.iter().find(|t| t.id == id).cloned())
    }

    fn teams(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams.clone())
    }

    fn insert_matches(&mut self, matches: Vec<BracketMatch>) -> Result<(), StoreError> {
        self.matches.extend(matches);
        self.reindex_matches();
        Ok(())
    }

    fn save_match(&mut self, m: BracketMatch) -> Result<(), StoreError> {
        let idx = self
            .match_index
            .get(&m.id)
            .copied()
            .ok_or_else(|| StoreError(format!("no match with id {}", m.id)))?;
        self.matches[idx] = m;
        Ok(())
    }

    fn match_by_id(&self, id: MatchId) -> Result<Option<BracketMatch>, StoreError> {
        Ok(self
            .match_index
            .get(&id)
            .map(|&idx| self.matches[idx].clone()))
    }

    fn match_at(
        &self,
        tournament_id: TournamentId,
        round: u32,
        position: u32,
    ) -> Result<Option<BracketMatch>, StoreError> {
        Ok(self
            .matches
            .iter()
            .find(|m| {
                m.tournament_id == tournament_id && m.round == round && m.position == position
            })
            .cloned())
    }

    fn matches_ordered(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<BracketMatch>, StoreError> {
        let mut out: Vec<BracketMatch> = self
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| (m.round, m.position));
        Ok(out)
    }

    fn delete_matches_for(&mut self, tournament_id: TournamentId) -> Result<(), StoreError> {
        self.matches.retain(|m| m.tournament_id != tournament_id);
        self.reindex_matches();
        Ok(())
    }

    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        self.tournaments.push(tournament);
        Ok(())
    }

    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        Ok(self.tournaments.iter().find(|t| t.id == id).cloned())
    }

    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        let idx = self
            .tournaments
            .iter()
            .position(|t| t.id == tournament.id)
            .ok_or_else(|| StoreError(format!("no tournament with id {}", tournament.id)))?;
        self.tournaments[idx] = tournament;
        Ok(())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        Ok(self.tournaments.clone())
    }
}
