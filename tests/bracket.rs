//! Integration tests for bracket construction: shape, byes, seeding order.

use bracket_tournament_web::{
    build_bracket, register_team, MemoryStore, RecordStore, Team, TeamId, Tournament,
    TournamentError, TournamentId,
};

fn store_with_teams(n: usize) -> (MemoryStore, TournamentId, Vec<TeamId>) {
    let mut store = MemoryStore::new();
    let tournament = Tournament::new("Cup");
    let tid = tournament.id;
    store.insert_tournament(tournament).unwrap();
    let ids: Vec<TeamId> = (0..n)
        .map(|i| register_team(&mut store, &format!("Team {i}")).unwrap().id)
        .collect();
    (store, tid, ids)
}

fn expected_matches_in_round(n: usize, round: u32) -> u32 {
    if round == 1 {
        (n as u32 + 1) / 2
    } else {
        std::cmp::max(1, (n.next_power_of_two() as u32) >> round)
    }
}

#[test]
fn rejects_fewer_than_two_teams() {
    let (mut store, tid, _) = store_with_teams(1);
    let only: Vec<TeamId> = store.teams().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(
        build_bracket(&mut store, tid, &only),
        Err(TournamentError::InsufficientTeams)
    );
    assert_eq!(
        build_bracket(&mut store, tid, &[]),
        Err(TournamentError::InsufficientTeams)
    );
    // Nothing was written
    assert!(store.matches_ordered(tid).unwrap().is_empty());
}

#[test]
fn two_teams_single_final() {
    let (mut store, tid, ids) = store_with_teams(2);
    let matches = build_bracket(&mut store, tid, &ids).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].round, 1);
    assert_eq!(matches[0].position, 1);
    assert_eq!(matches[0].slot_a, Some(ids[0]));
    assert_eq!(matches[0].slot_b, Some(ids[1]));
    assert_eq!(matches[0].winner, None);
}

#[test]
fn three_teams_has_bye_and_final() {
    let (mut store, tid, ids) = store_with_teams(3);
    let matches = build_bracket(&mut store, tid, &ids).unwrap();
    assert_eq!(matches.len(), 3);

    // Round 1: one real pairing, one bye
    assert_eq!((matches[0].round, matches[0].position), (1, 1));
    assert_eq!(matches[0].slot_a, Some(ids[0]));
    assert_eq!(matches[0].slot_b, Some(ids[1]));
    assert_eq!((matches[1].round, matches[1].position), (1, 2));
    assert_eq!(matches[1].slot_a, Some(ids[2]));
    assert_eq!(matches[1].slot_b, None);
    // The bye's winner is not auto-assigned
    assert_eq!(matches[1].winner, None);

    // Round 2: the empty final
    assert_eq!((matches[2].round, matches[2].position), (2, 1));
    assert_eq!(matches[2].slot_a, None);
    assert_eq!(matches[2].slot_b, None);
}

#[test]
fn bracket_shape_for_all_small_team_counts() {
    for n in 2..=33 {
        let (mut store, tid, ids) = store_with_teams(n);
        let matches = build_bracket(&mut store, tid, &ids).unwrap();

        let rounds = (n.next_power_of_two() as u32).trailing_zeros();
        let last_round = matches.iter().map(|m| m.round).max().unwrap();
        assert_eq!(last_round, rounds, "round count for n={n}");

        for round in 1..=rounds {
            let in_round: Vec<_> = matches.iter().filter(|m| m.round == round).collect();
            assert_eq!(
                in_round.len() as u32,
                expected_matches_in_round(n, round),
                "matches in round {round} for n={n}"
            );
            // Positions are 1-based and contiguous
            for (i, m) in in_round.iter().enumerate() {
                assert_eq!(m.position, i as u32 + 1);
            }
        }

        // The final is always a single match
        assert_eq!(matches.iter().filter(|m| m.round == rounds).count(), 1);
    }
}

#[test]
fn odd_team_count_yields_exactly_one_bye() {
    for n in [3, 5, 7, 9, 11, 13, 15, 17, 33] {
        let (mut store, tid, ids) = store_with_teams(n);
        let matches = build_bracket(&mut store, tid, &ids).unwrap();
        let round1: Vec<_> = matches.iter().filter(|m| m.round == 1).collect();
        let byes: Vec<_> = round1.iter().filter(|m| m.slot_b.is_none()).collect();
        assert_eq!(byes.len(), 1, "bye count for n={n}");
        // The bye is the last round-1 match and holds the leftover team
        assert_eq!(byes[0].position, round1.len() as u32);
        assert_eq!(byes[0].slot_a, Some(ids[n - 1]));
        for m in round1.iter().filter(|m| m.position != byes[0].position) {
            assert!(m.slot_a.is_some() && m.slot_b.is_some());
        }
    }
}

#[test]
fn round_one_consumes_input_order() {
    let (mut store, tid, ids) = store_with_teams(8);
    let matches = build_bracket(&mut store, tid, &ids).unwrap();
    for (i, pair) in ids.chunks(2).enumerate() {
        let m = matches
            .iter()
            .find(|m| m.round == 1 && m.position == i as u32 + 1)
            .unwrap();
        assert_eq!(m.slot_a, Some(pair[0]));
        assert_eq!(m.slot_b, Some(pair[1]));
    }
}

#[test]
fn regeneration_replaces_previous_matches() {
    let (mut store, tid, ids) = store_with_teams(4);
    let first = build_bracket(&mut store, tid, &ids).unwrap();
    let reversed: Vec<TeamId> = ids.iter().rev().copied().collect();
    let second = build_bracket(&mut store, tid, &reversed).unwrap();

    // Same shape, all-new match records, old ones gone
    assert_eq!(second.len(), first.len());
    let stored = store.matches_ordered(tid).unwrap();
    assert_eq!(stored, second);
    for old in &first {
        assert_eq!(store.match_by_id(old.id).unwrap(), None);
    }
    assert_eq!(second[0].slot_a, Some(ids[3]));
}

#[test]
fn regeneration_leaves_other_tournaments_alone() {
    let (mut store, tid_a, ids) = store_with_teams(4);
    let other = Tournament::new("Other Cup");
    let tid_b = other.id;
    store.insert_tournament(other).unwrap();

    build_bracket(&mut store, tid_a, &ids).unwrap();
    let b_matches = build_bracket(&mut store, tid_b, &ids).unwrap();
    build_bracket(&mut store, tid_a, &ids).unwrap();

    assert_eq!(store.matches_ordered(tid_b).unwrap(), b_matches);
}

#[test]
fn unknown_ids_are_paired_as_given() {
    // The builder treats the draw order as opaque; it does not consult the
    // team table. Views resolve what they can.
    let mut store = MemoryStore::new();
    let tournament = Tournament::new("Cup");
    let tid = tournament.id;
    store.insert_tournament(tournament).unwrap();
    let a = Team::new("A");
    store.insert_team(a.clone()).unwrap();
    let ghost = uuid::Uuid::new_v4();
    let matches = build_bracket(&mut store, tid, &[a.id, ghost]).unwrap();
    assert_eq!(matches[0].slot_b, Some(ghost));
}
