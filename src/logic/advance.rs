//! Winner recording and advancement into the next round.

use crate::models::{BracketMatch, MatchId, TeamId, TournamentError};
use crate::store::RecordStore;

/// Record the winner of a match and advance them into the next round.
///
/// The winner must be one of the match's two occupants; for a bye this means
/// passing its sole occupant. The winner lands in the match at
/// (round + 1, ⌈position / 2⌉): slot A when the position is odd, slot B when
/// even, overwriting any previous occupant of that slot. When no such match
/// exists the recorded match was the final and the tournament is decided.
///
/// Re-recording with a different winner overwrites the downstream slot but
/// does not cascade further: results already propagated from that slot stay
/// as they are.
pub fn record_winner<S: RecordStore>(
    store: &mut S,
    match_id: MatchId,
    winner: TeamId,
) -> Result<BracketMatch, TournamentError> {
    let mut m = store
        .match_by_id(match_id)?
        .ok_or(TournamentError::MatchNotFound)?;
    if !m.has_occupant(winner) {
        return Err(TournamentError::InvalidWinner);
    }

    m.winner = Some(winner);

    let next_round = m.round + 1;
    let next_position = m.position.div_ceil(2);
    if let Some(mut next) = store.match_at(m.tournament_id, next_round, next_position)? {
        if m.position % 2 == 1 {
            next.slot_a = Some(winner);
        } else {
            next.slot_b = Some(winner);
        }
        store.save_match(next)?;
        log::info!(
            "Match {match_id} (round {}, position {}): winner {winner} advances to round {next_round}, position {next_position}",
            m.round,
            m.position
        );
    } else {
        log::info!("Match {match_id} was the final: tournament decided, winner {winner}");
    }

    store.save_match(m.clone())?;
    Ok(m)
}
