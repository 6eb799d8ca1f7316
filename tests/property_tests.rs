//! Property tests for adjudication and the score ledger.

use dice_duel::{apply_outcome, DieFace, Identity, PlayerRecord, RoundOutcome, RuleMode, Verdict};
use proptest::prelude::*;

fn face() -> impl Strategy<Value = DieFace> {
    (1u8..=6).prop_map(|v| DieFace::new(v).unwrap())
}

fn mode() -> impl Strategy<Value = RuleMode> {
    prop_oneof![Just(RuleMode::HighWins), Just(RuleMode::LowWins)]
}

fn player_record() -> impl Strategy<Value = PlayerRecord> {
    ("[A-Za-z]{1,12}", 0u32..10_000, 0u32..10_000).prop_map(|(name, wins, losses)| {
        PlayerRecord::with_tally(Identity::parse(&name).unwrap(), wins, losses)
    })
}

proptest! {
    #[test]
    fn distinct_faces_follow_the_rule(mode in mode(), a in face(), b in face()) {
        prop_assume!(a != b);
        let outcome = RoundOutcome::adjudicate(mode, a, b);

        let player_wins = (mode == RuleMode::HighWins && a > b) || (mode == RuleMode::LowWins && a < b);
        let expected = if player_wins { Verdict::PlayerWin } else { Verdict::OpponentWin };
        prop_assert_eq!(outcome.verdict, expected);
        prop_assert_eq!(outcome.player, a);
        prop_assert_eq!(outcome.opponent, b);
    }

    #[test]
    fn equal_faces_always_tie(mode in mode(), a in face()) {
        prop_assert_eq!(RoundOutcome::adjudicate(mode, a, a).verdict, Verdict::Tie);
    }

    #[test]
    fn modes_are_mirror_images(a in face(), b in face()) {
        let high = RoundOutcome::adjudicate(RuleMode::HighWins, a, b).verdict;
        let low = RoundOutcome::adjudicate(RuleMode::LowWins, b, a).verdict;
        prop_assert_eq!(high, low);
    }

    #[test]
    fn tie_leaves_record_unchanged(record in player_record(), a in face(), mode in mode()) {
        let tie = RoundOutcome::adjudicate(mode, a, a);
        prop_assert_eq!(apply_outcome(&record, &tie), record);
    }

    #[test]
    fn win_then_loss_adds_one_each(record in player_record()) {
        let (six, one) = (DieFace::new(6).unwrap(), DieFace::new(1).unwrap());
        let win = RoundOutcome::adjudicate(RuleMode::HighWins, six, one);
        let loss = RoundOutcome::adjudicate(RuleMode::HighWins, one, six);

        let after = apply_outcome(&apply_outcome(&record, &win), &loss);
        prop_assert_eq!(after.wins, record.wins + 1);
        prop_assert_eq!(after.losses, record.losses + 1);
        prop_assert_eq!(after.identity, record.identity);
    }

    #[test]
    fn counters_never_decrease(record in player_record(), mode in mode(), a in face(), b in face()) {
        let next = apply_outcome(&record, &RoundOutcome::adjudicate(mode, a, b));
        prop_assert!(next.wins >= record.wins);
        prop_assert!(next.losses >= record.losses);
        prop_assert!(next.wins + next.losses <= record.wins + record.losses + 1);
    }
}
