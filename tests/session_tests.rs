//! Driver-level integration: the session, the generator, and the cadence.

use std::time::Duration;

use blockfall::core::{Game, ScenePhase};
use blockfall::engine::{tick_interval, PieceGenerator, Session, TickClock};
use blockfall::types::GameEvent;

#[test]
fn a_session_boots_straight_into_play() {
    let session = Session::new(PieceGenerator::seeded(11));
    let scene = session.scene();
    assert_eq!(scene.phase, ScenePhase::Playing { fast_drop: false });
    assert_eq!(scene.piece_cells.len(), 4);
    assert_eq!(scene.preview_cells.len(), 4);
    assert!(scene.fixated.is_empty());
}

#[test]
fn seeded_sessions_replay_identically() {
    let mut a = Session::new(PieceGenerator::seeded(2024));
    let mut b = Session::new(PieceGenerator::seeded(2024));

    for _ in 0..500 {
        a.apply(GameEvent::Tick);
        b.apply(GameEvent::Tick);
    }
    assert_eq!(a.scene(), b.scene());
}

#[test]
fn unattended_play_ends_in_game_over_not_fault() {
    // Gravity alone stacks everything at the spawn columns; the session must
    // keep the preview slot fed until the stack tops out.
    let mut session = Session::new(PieceGenerator::seeded(7));
    for _ in 0..5_000 {
        session.apply(GameEvent::Tick);
        if session.finished() {
            break;
        }
    }
    assert!(session.finished(), "a neglected game must top out");
    assert!(matches!(session.game(), Game::GameOver { .. }));
}

#[test]
fn fast_drop_cadence_is_twenty_times_the_base_rate() {
    let base = Duration::from_millis(1000);
    assert_eq!(tick_interval(base, false), Duration::from_millis(1000));
    assert_eq!(tick_interval(base, true), Duration::from_millis(50));
}

#[test]
fn toggling_fast_drop_rearms_and_restores_the_clock() {
    let base = Duration::from_millis(1000);
    let mut clock = TickClock::new(base);

    clock.rearm(true);
    assert_eq!(clock.interval(), tick_interval(base, true));

    clock.rearm(false);
    assert_eq!(clock.interval(), base);
}

#[test]
fn drop_keys_toggle_the_session_flag() {
    let mut session = Session::new(PieceGenerator::seeded(1));
    session.apply(GameEvent::DropStart);
    assert_eq!(
        session.scene().phase,
        ScenePhase::Playing { fast_drop: true }
    );
    session.apply(GameEvent::DropStop);
    assert_eq!(
        session.scene().phase,
        ScenePhase::Playing { fast_drop: false }
    );
}
