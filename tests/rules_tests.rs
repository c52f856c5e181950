//! Turn state machine tests.
//!
//! Drive `DuelRules` through whole duels: captures, pass/round flow, wins,
//! draws and every rejection path.

use coexistence::cards::{CardKind, Deck, Hand};
use coexistence::core::{Command, GameRng, GameState, Side};
use coexistence::rules::{DuelRules, Event, GameResult, Rejection, RulesEngine};
use proptest::prelude::*;

/// Both hands fully dealt in a known order.
fn staged(current: Side) -> GameState {
    let mut state = GameState::new(42);
    state.set_hand(
        Side::First,
        Hand::from_kinds([
            CardKind::Axe,
            CardKind::Hammer,
            CardKind::Sword,
            CardKind::Arrow,
            CardKind::Axe,
            CardKind::Hammer,
        ]),
    );
    state.set_hand(
        Side::Second,
        Hand::from_kinds([
            CardKind::Hammer,
            CardKind::Sword,
            CardKind::Axe,
            CardKind::Arrow,
            CardKind::Sword,
            CardKind::Axe,
        ]),
    );
    state.set_current_player(current);
    state
}

/// Everything a rejected command must leave alone.
fn snapshot(state: &GameState) -> (Hand, Hand, u32, u32, Side, u32, bool, bool, bool) {
    (
        *state.hand(Side::First),
        *state.hand(Side::Second),
        state.score(Side::First),
        state.score(Side::Second),
        state.current_player(),
        state.round_number(),
        state.has_passed(Side::First),
        state.has_passed(Side::Second),
        state.is_game_over(),
    )
}

fn count_kind(state: &GameState, kind: CardKind) -> usize {
    Side::ALL
        .iter()
        .map(|&side| state.hand(side).slots().iter().filter(|s| **s == Some(kind)).count())
        .sum()
}

// ============================================================================
// Scenarios
// ============================================================================

/// Axe takes Hammer: slot cleared, point scored, turn flips.
#[test]
fn test_axe_takes_hammer() {
    let rules = DuelRules::default();
    let mut state = staged(Side::First);

    rules.apply_line(&mut state, Side::First, "AA").unwrap();

    assert_eq!(state.hand(Side::Second).get(0), None);
    assert_eq!(state.score(Side::First), 1);
    assert_eq!(state.score(Side::Second), 0);
    assert_eq!(state.current_player(), Side::Second);
    assert_eq!(state.last_log_message(), "AXE TAKES HAMMER");
}

/// Two passes in a row start a fresh round.
#[test]
fn test_mutual_pass_starts_new_round() {
    let rules = DuelRules::default();
    let mut state = staged(Side::First);
    let staged_hands = (*state.hand(Side::First), *state.hand(Side::Second));
    state.hand_mut(Side::First).take(0);
    state.hand_mut(Side::Second).take(5);

    rules.apply_line(&mut state, Side::First, "PS").unwrap();
    assert_eq!(state.round_number(), 1);

    let outcome = rules.apply_line(&mut state, Side::Second, "ps").unwrap();

    assert_eq!(outcome.event, Event::NewRound(2));
    assert_eq!(state.round_number(), 2);
    assert!(!state.has_passed(Side::First));
    assert!(!state.has_passed(Side::Second));
    assert_eq!(state.hand(Side::First).occupied(), 6);
    assert_eq!(state.hand(Side::Second).occupied(), 6);
    // Twelve of the sixteen cards are dealt, so no kind can exceed four
    let dealt: usize = CardKind::ALL.iter().map(|&kind| count_kind(&state, kind)).sum();
    assert_eq!(dealt, 12);
    for kind in CardKind::ALL {
        assert!(count_kind(&state, kind) <= 4);
    }
    // Fresh deal from the duel's RNG, not the staged hands
    assert_ne!((*state.hand(Side::First), *state.hand(Side::Second)), staged_hands);
    assert_eq!(state.last_log_message(), "NEW ROUND");
    assert_eq!(state.current_player(), Side::First);
}

/// A move between passes clears only the mover's flag.
#[test]
fn test_move_between_passes() {
    let rules = DuelRules::default();
    let mut state = staged(Side::First);

    rules.apply_line(&mut state, Side::First, "PS").unwrap();
    // Second's Hammer takes First's Sword
    rules.apply_line(&mut state, Side::Second, "AC").unwrap();
    assert!(state.has_passed(Side::First));
    assert!(!state.has_passed(Side::Second));

    rules.apply_line(&mut state, Side::First, "PS").unwrap();
    assert_eq!(state.round_number(), 1);

    rules.apply_line(&mut state, Side::Second, "PS").unwrap();
    assert_eq!(state.round_number(), 2);
}

/// The ninth point wins and the log carries the winner.
#[test]
fn test_ninth_point_wins() {
    let rules = DuelRules::default();

    for (side, suffix) in [(Side::First, "; PLAYER 1 WON!"), (Side::Second, "; PLAYER 2 WON!")] {
        let mut state = staged(side);
        state.set_score(side, 8);
        // First: Axe(A) takes Hammer(A). Second: Hammer(A) takes Sword(C).
        let line = if side == Side::First { "AA" } else { "AC" };

        let outcome = rules.apply_line(&mut state, side, line).unwrap();

        assert_eq!(outcome.result, Some(GameResult::Winner(side)));
        assert!(state.is_game_over());
        assert!(state.last_log_message().ends_with(suffix), "{}", state.last_log_message());
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(side)));
    }
}

/// Passing through five rounds ends in a draw.
#[test]
fn test_five_rounds_of_passing_is_a_draw() {
    let rules = DuelRules::default();
    let mut state = GameState::new(9);
    let mut passes = 0;

    while !state.is_game_over() {
        let side = state.current_player();
        rules.pass(&mut state, side).unwrap();
        passes += 1;
        assert!(passes <= 8);
    }

    assert_eq!(passes, 8);
    assert_eq!(state.round_number(), 5);
    assert_eq!(state.last_log_message(), "GAME OVER - DRAW");
    assert_eq!(rules.is_terminal(&state), Some(GameResult::Draw));
}

/// Malformed commands are syntax errors and change nothing but the log.
#[test]
fn test_syntax_errors() {
    let rules = DuelRules::default();

    for line in ["ZZ", "X", "", "ABC", "A1", "PASS", "GA"] {
        let mut state = staged(Side::First);
        let before = snapshot(&state);

        let err = rules.apply_line(&mut state, Side::First, line).unwrap_err();

        assert!(matches!(err, Rejection::Syntax(_)), "{line:?}");
        assert_eq!(state.last_log_message(), "SYNTAX ERROR");
        assert_eq!(snapshot(&state), before, "{line:?}");
    }
}

// ============================================================================
// Rejections
// ============================================================================

/// Every rule violation leaves the state untouched apart from the log.
#[test]
fn test_rejections_do_not_mutate() {
    let rules = DuelRules::default();
    let cases: [(Side, Command, &str); 4] = [
        // Hammer cannot take Hammer
        (Side::First, Command::Move { from: 1, to: 0 }, "INVALID MOVE: CANNOT DEFEAT TARGET"),
        // Axe cannot take Axe
        (Side::First, Command::Move { from: 0, to: 2 }, "INVALID MOVE: CANNOT DEFEAT TARGET"),
        (Side::Second, Command::Pass, "NOT YOUR TURN"),
        (Side::Second, Command::Move { from: 0, to: 2 }, "NOT YOUR TURN"),
    ];

    for (side, command, log) in cases {
        let mut state = staged(Side::First);
        let before = snapshot(&state);

        assert!(rules.apply_command(&mut state, side, command).is_err());
        assert_eq!(state.last_log_message(), log);
        assert_eq!(snapshot(&state), before);
    }
}

/// Nothing is accepted after the duel ends.
#[test]
fn test_game_over_is_terminal() {
    let rules = DuelRules::default();
    let mut state = staged(Side::First);
    state.set_score(Side::First, 8);
    rules.apply_line(&mut state, Side::First, "AA").unwrap();
    let before = snapshot(&state);

    for (side, line) in [(Side::Second, "PS"), (Side::Second, "AC"), (Side::First, "PS")] {
        let err = rules.apply_line(&mut state, side, line).unwrap_err();
        assert_eq!(err, Rejection::GameOver);
        assert_eq!(state.last_log_message(), "GAME OVER");
        assert_eq!(snapshot(&state), before);
    }
}

/// Arrow captures never score, whichever side holds the arrow.
#[test]
fn test_arrow_exchanges_never_score() {
    let rules = DuelRules::default();
    let mut state = staged(Side::First);

    // First's Arrow takes Second's Sword
    rules.apply_line(&mut state, Side::First, "DB").unwrap();
    // Second's Sword takes First's Arrow
    rules.apply_line(&mut state, Side::Second, "ED").unwrap();

    assert_eq!(state.score(Side::First), 0);
    assert_eq!(state.score(Side::Second), 0);
    assert_eq!(state.last_log_message(), "SWORD TAKES ARROW");
}

// ============================================================================
// Properties
// ============================================================================

/// Pick a random legal capture for the current side, or pass.
fn random_command(state: &GameState, rng: &mut GameRng) -> Command {
    let side = state.current_player();
    let mut captures = Vec::new();
    for (from, own) in state.hand(side).slots().iter().enumerate() {
        for (to, theirs) in state.hand(side.opponent()).slots().iter().enumerate() {
            if let (Some(a), Some(d)) = (own, theirs) {
                if a.can_defeat(*d) {
                    captures.push(Command::Move { from, to });
                }
            }
        }
    }

    if captures.is_empty() || rng.gen_bool(0.2) {
        Command::Pass
    } else {
        captures[rng.gen_range_usize(0..captures.len())]
    }
}

proptest! {
    /// Slot indices of 6 or more are always out of bounds.
    #[test]
    fn prop_out_of_bounds_never_mutates(from in 0usize..64, to in 0usize..64, seed in any::<u64>()) {
        prop_assume!(from >= 6 || to >= 6);
        let rules = DuelRules::default();
        let mut state = GameState::new(seed);
        let side = state.current_player();
        let before = snapshot(&state);

        let err = rules.make_move(&mut state, side, from, to).unwrap_err();

        prop_assert_eq!(err, Rejection::OutOfBounds { from, to });
        prop_assert_eq!(state.last_log_message(), "INVALID MOVE: OUT OF BOUNDS");
        prop_assert_eq!(snapshot(&state), before);
    }

    /// Random duels end with a win at 9 points or a draw at round 5.
    #[test]
    fn prop_duels_terminate(seed in any::<u64>()) {
        let rules = DuelRules::default();
        let mut state = GameState::new(seed);
        let mut picker = GameRng::new(seed ^ 0x5eed);
        let mut successes = 0;

        while !state.is_game_over() {
            let command = random_command(&state, &mut picker);
            let side = state.current_player();
            rules.apply_command(&mut state, side, command).unwrap();
            successes += 1;
            prop_assert!(successes < 1000);
            prop_assert!(state.round_number() <= 5);
        }

        match rules.is_terminal(&state) {
            Some(GameResult::Winner(side)) => {
                prop_assert!(state.score(side) >= 9);
                prop_assert!(state.score(side.opponent()) < 9);
            }
            Some(GameResult::Draw) => {
                prop_assert_eq!(state.round_number(), 5);
                prop_assert_eq!(state.last_log_message(), "GAME OVER - DRAW");
            }
            None => prop_assert!(false, "game over without a result"),
        }
    }

    /// Shuffling keeps four of each kind.
    #[test]
    fn prop_shuffle_preserves_multiset(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let deck = Deck::shuffled(&mut rng);
        for kind in CardKind::ALL {
            prop_assert_eq!(deck.count(kind), 4);
        }
        let hands = deck.deal();
        prop_assert_eq!(hands[Side::First].occupied(), 6);
        prop_assert_eq!(hands[Side::Second].occupied(), 6);
    }

    /// Outside the arrow, combat is a cycle with no ties.
    #[test]
    fn prop_combat_tournament(a in 0usize..4, b in 0usize..4) {
        let (a, b) = (CardKind::ALL[a], CardKind::ALL[b]);
        if a == CardKind::Arrow || b == CardKind::Arrow {
            prop_assert!(a.can_defeat(b));
            prop_assert!(!b.earns_points(a));
        } else if a == b {
            prop_assert!(!a.can_defeat(b));
        } else {
            prop_assert!(a.can_defeat(b) != b.can_defeat(a));
        }
    }
}
