//! Bracket match data structures and their API representations.

use crate::models::team::{Team, TeamId, TeamSummary};
use crate::models::tournament::TournamentId;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A single bracket match: two slots filled as the tournament progresses.
///
/// `slot_a`/`slot_b` are `None` while undecided; a round-1 match with only
/// `slot_a` occupied is a bye. `winner`, when set, always equals one of the
/// two slots. Only slots and winner mutate after creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// Round number, 1 = first round.
    pub round: u32,
    /// 1-based position within the round, contiguous.
    pub position: u32,
    pub slot_a: Option<TeamId>,
    pub slot_b: Option<TeamId>,
    pub winner: Option<TeamId>,
}

impl BracketMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        position: u32,
        slot_a: Option<TeamId>,
        slot_b: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            position,
            slot_a,
            slot_b,
            winner: None,
        }
    }

    /// Whether the given team occupies one of this match's slots.
    pub fn has_occupant(&self, team_id: TeamId) -> bool {
        self.slot_a == Some(team_id) || self.slot_b == Some(team_id)
    }

    /// Whether the given team appears anywhere in this match (slots or winner).
    pub fn references(&self, team_id: TeamId) -> bool {
        self.has_occupant(team_id) || self.winner == Some(team_id)
    }

    /// API representation with team ids resolved to summaries.
    /// Ids no longer in the store render as empty slots.
    pub fn view(&self, lookup: impl Fn(TeamId) -> Option<Team>) -> MatchView {
        let resolve = |slot: Option<TeamId>| slot.and_then(&lookup).map(|t| t.summary());
        MatchView {
            id: self.id,
            round: self.round,
            position: self.position,
            team_a: resolve(self.slot_a),
            team_b: resolve(self.slot_b),
            winner: resolve(self.winner),
        }
    }
}

/// Match representation returned by the API: teams as nested summaries,
/// `null` marking an empty slot or undecided winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub round: u32,
    pub position: u32,
    pub team_a: Option<TeamSummary>,
    pub team_b: Option<TeamSummary>,
    pub winner: Option<TeamSummary>,
}

/// Full bracket grouped by round, serialized as a JSON object keyed
/// `"round_1"`, `"round_2"`, ... in ascending round order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketView {
    pub rounds: Vec<(u32, Vec<MatchView>)>,
}

impl Serialize for BracketView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rounds.len()))?;
        for (round, matches) in &self.rounds {
            map.serialize_entry(&format!("round_{round}"), matches)?;
        }
        map.end()
    }
}
