//! Draw: random seeding order for bracket generation.

use crate::models::{Team, TournamentError};
use crate::store::RecordStore;
use rand::seq::SliceRandom;

/// Shuffle all registered teams into a draw order. The resulting order is
/// what the caller feeds to `build_bracket`; the bracket logic treats it as
/// opaque. Requires at least 2 teams.
pub fn draw_teams<S: RecordStore>(store: &S) -> Result<Vec<Team>, TournamentError> {
    let mut teams = store.teams()?;
    if teams.len() < 2 {
        return Err(TournamentError::InsufficientTeams);
    }
    teams.shuffle(&mut rand::thread_rng());
    Ok(teams)
}
