//! Data structures for the bracket tournament: teams, matches, tournaments.

mod game;
mod team;
mod tournament;

pub use game::{BracketMatch, BracketView, MatchId, MatchView};
pub use team::{Team, TeamId, TeamSummary};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
