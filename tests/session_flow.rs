use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use snake::{
    Config, Coordinate, Direction, GameEngine, IntervalScheduler, ManualClock, Phase, Scheduler, Session,
    TickOutcome,
};

fn new_session(config: Config, seed: u64) -> (Session<IntervalScheduler<ManualClock>, StdRng>, ManualClock) {
    let clock = ManualClock::new();
    let engine = GameEngine::new(config, StdRng::seed_from_u64(seed)).unwrap();
    let mut session = Session::new(engine, IntervalScheduler::with_clock(clock.clone()));
    session.start();
    (session, clock)
}

#[test]
fn fresh_session_matches_classic_layout() {
    let (session, _) = new_session(Config::new(20, 600), 1);
    let snap = session.snapshot();

    assert_eq!(snap.snake_cells, vec![Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0)]);
    assert_eq!(snap.length, 3);
    assert_eq!(snap.direction, Direction::Right);
    assert!(!snap.paused);
    assert!(!snap.game_over);
    assert!(!snap.snake_cells.contains(&snap.item_cell));
}

#[test]
fn long_run_keeps_session_consistent() {
    let (mut session, clock) = new_session(Config::new(8, 100), 77);
    let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];
    let mut last_speed = session.snapshot().speed_ms;

    for step in 0..400 {
        if step % 5 == 0 {
            session.set_direction(turns[(step / 5) % turns.len()]);
        }

        let interval = match session.scheduler().interval() {
            Some(interval) => interval,
            None => break,
        };
        clock.advance(interval);

        for outcome in session.pump() {
            let snap = session.snapshot();
            assert_eq!(snap.length, snap.snake_cells.len());
            assert!(snap.speed_ms <= last_speed);
            assert!(snap.speed_ms >= 30);
            last_speed = snap.speed_ms;

            match outcome {
                TickOutcome::GameOver(_) => assert!(!session.scheduler().is_running()),
                TickOutcome::Grew { speed_ms, .. } => {
                    assert_eq!(session.scheduler().interval(), Some(Duration::from_millis(speed_ms)));
                }
                _ => assert!(!snap.snake_cells.contains(&snap.item_cell)),
            }
        }
    }
}

#[test]
fn pause_and_new_game_drive_the_timer() {
    let (mut session, clock) = new_session(Config::new(20, 300), 5);

    assert_eq!(session.toggle_pause(), Phase::Paused);
    session.configure(Config::new(10, 50)).unwrap();
    clock.advance(Duration::from_secs(10));
    assert!(session.pump().is_empty());

    session.restart().unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.config, Config::new(10, 50));
    assert_eq!(session.scheduler().interval(), Some(Duration::from_millis(50)));
}

#[test]
fn invalid_config_leaves_session_alone() {
    let (mut session, _) = new_session(Config::new(20, 300), 5);
    let before = session.snapshot();

    assert!(session.new_game(Config::new(0, 300)).is_err());
    assert!(session.new_game(Config::new(20, 5_000)).is_err());
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.scheduler().interval(), Some(Duration::from_millis(300)));
}
