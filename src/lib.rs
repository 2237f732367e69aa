//! Single-elimination bracket web app: library with models, store, and logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    bracket_view, build_bracket, clear_teams, draw_teams, record_winner, register_team,
    remove_team,
};
pub use models::{
    BracketMatch, BracketView, MatchId, MatchView, Team, TeamId, TeamSummary, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
pub use store::{MemoryStore, RecordStore, StoreError};
