//! Team registration and deletion.

use crate::models::{Team, TeamId, TournamentError};
use crate::store::RecordStore;

/// Register a team. Names are trimmed and must be unique.
pub fn register_team<S: RecordStore>(
    store: &mut S,
    name: &str,
) -> Result<Team, TournamentError> {
    let name = name.trim();
    let is_duplicate = store.teams()?.iter().any(|t| t.name == name);
    if is_duplicate {
        return Err(TournamentError::DuplicateTeamName);
    }
    let team = Team::new(name);
    store.insert_team(team.clone())?;
    Ok(team)
}

/// Remove one team. Matches referencing it are removed as well, so the store
/// never holds a dangling team reference.
pub fn remove_team<S: RecordStore>(store: &mut S, id: TeamId) -> Result<(), TournamentError> {
    if store.remove_team(id)? {
        Ok(())
    } else {
        Err(TournamentError::TeamNotFound(id))
    }
}

/// Remove all teams and all matches (matches go first, referential integrity).
pub fn clear_teams<S: RecordStore>(store: &mut S) -> Result<(), TournamentError> {
    store.clear_teams()?;
    Ok(())
}
