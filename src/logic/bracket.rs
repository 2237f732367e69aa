//! Bracket construction: round-1 pairing (with byes) and placeholder rounds.

use crate::models::{BracketMatch, BracketView, TeamId, TournamentError, TournamentId};
use crate::store::RecordStore;

/// Number of rounds for `n` teams: ⌈log2 n⌉. Only defined for n ≥ 2.
fn round_count(n: usize) -> u32 {
    n.next_power_of_two().trailing_zeros()
}

/// Build a fresh bracket for the tournament from the given draw order.
///
/// Any existing matches of this tournament are discarded first (full replace).
/// Round 1 pairs consecutive teams; an odd count leaves a trailing bye match
/// with slot B empty. Rounds 2..R are empty placeholders filled by
/// `record_winner` as results come in. A bye is not resolved here; its team
/// still advances through an explicit `record_winner` call.
///
/// Returns the complete match set ordered by (round, position).
pub fn build_bracket<S: RecordStore>(
    store: &mut S,
    tournament_id: TournamentId,
    ordered_team_ids: &[TeamId],
) -> Result<Vec<BracketMatch>, TournamentError> {
    let n = ordered_team_ids.len();
    if n < 2 {
        return Err(TournamentError::InsufficientTeams);
    }

    store.delete_matches_for(tournament_id)?;

    let rounds = round_count(n);
    let capacity = n.next_power_of_two() as u32;

    let mut matches = Vec::new();
    let mut position = 1;
    let mut pairs = ordered_team_ids.chunks_exact(2);
    for pair in &mut pairs {
        matches.push(BracketMatch::new(
            tournament_id,
            1,
            position,
            Some(pair[0]),
            Some(pair[1]),
        ));
        position += 1;
    }
    // Odd team count: the leftover team gets a bye (slot B stays empty).
    if let [leftover] = pairs.remainder() {
        matches.push(BracketMatch::new(
            tournament_id,
            1,
            position,
            Some(*leftover),
            None,
        ));
    }

    for round in 2..=rounds {
        let count = std::cmp::max(1, capacity >> round);
        for position in 1..=count {
            matches.push(BracketMatch::new(tournament_id, round, position, None, None));
        }
    }

    log::info!(
        "Generated bracket for tournament {tournament_id}: {n} teams, {rounds} round(s), {} match(es)",
        matches.len()
    );

    store.insert_matches(matches)?;
    store.matches_ordered(tournament_id).map_err(Into::into)
}

/// A tournament's matches grouped by round for display, teams resolved to
/// id + name summaries.
pub fn bracket_view<S: RecordStore>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<BracketView, TournamentError> {
    let teams = store.teams()?;
    let lookup = |id| teams.iter().find(|t| t.id == id).cloned();

    let mut rounds: Vec<(u32, Vec<_>)> = Vec::new();
    for m in store.matches_ordered(tournament_id)? {
        let view = m.view(&lookup);
        match rounds.last_mut() {
            Some((round, views)) if *round == m.round => views.push(view),
            _ => rounds.push((m.round, vec![view])),
        }
    }
    Ok(BracketView { rounds })
}
