//! Real-time behaviour of the match driver, run on paused tokio time.

use gridmatch::{
    BoardError, MatchConfig, MatchController, MatchDriver, MatchError, MatchHandle, MatchPhase,
    Outcome, Player, PlayerSymbols, Score, TICK_PERIOD,
};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

async fn started_match(size: usize) -> (MatchHandle, JoinHandle<()>) {
    let (handle, task) = MatchDriver::spawn(MatchController::default(), TICK_PERIOD);
    handle.configure(size, PlayerSymbols::default()).await.unwrap();
    (handle, task)
}

#[tokio::test(start_paused = true)]
async fn test_countdown_ticks_every_second() {
    let (handle, _task) = started_match(3).await;

    sleep(Duration::from_millis(3_500)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.time_remaining, 7);
    assert_eq!(snapshot.current_player, Some(Player::Player1));
}

#[tokio::test(start_paused = true)]
async fn test_idle_turn_is_forfeited() {
    let (handle, _task) = started_match(3).await;
    let before = handle.snapshot();

    sleep(Duration::from_millis(10_500)).await;
    let after = handle.snapshot();

    assert_eq!(after.current_player, Some(Player::Player2));
    assert_eq!(after.time_remaining, 10);
    assert!(after.timer_running);
    assert_eq!(after.board, before.board);
    assert_eq!(after.score, Score::default());
    assert_eq!(after.phase, MatchPhase::InRound);
}

#[tokio::test(start_paused = true)]
async fn test_one_second_limit_forfeits_every_tick() {
    let config = MatchConfig::default().with_turn_limit(1);
    let controller = MatchController::new(config).unwrap();
    let (handle, _task) = MatchDriver::spawn(controller, TICK_PERIOD);
    let started = handle.configure(3, PlayerSymbols::default()).await.unwrap();
    assert_eq!(started.time_remaining, 1);
    assert_eq!(started.turn_limit, 1);

    sleep(Duration::from_millis(1_500)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.current_player, Some(Player::Player2));
    assert_eq!(snapshot.time_remaining, 1);

    sleep(Duration::from_millis(1_000)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.current_player, Some(Player::Player1));
    assert_eq!(snapshot.time_remaining, 1);
    assert!(snapshot.cells().iter().all(|cell| cell.is_empty()));
    assert_eq!(snapshot.score, Score::default());
}

#[tokio::test(start_paused = true)]
async fn test_move_restarts_clock_for_opponent() {
    let (handle, _task) = started_match(3).await;

    sleep(Duration::from_millis(6_500)).await;
    assert_eq!(handle.snapshot().time_remaining, 4);

    let snapshot = handle.submit_move(1, 1).await.unwrap();
    assert_eq!(snapshot.current_player, Some(Player::Player2));
    assert_eq!(snapshot.time_remaining, 10);

    sleep(Duration::from_millis(6_500)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.current_player, Some(Player::Player2));
    assert_eq!(snapshot.time_remaining, 4);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_move_keeps_clock_running() {
    let (handle, _task) = started_match(3).await;

    sleep(Duration::from_millis(2_500)).await;
    let err = handle.submit_move(5, 5).await.unwrap_err();
    assert_eq!(
        err,
        MatchError::Board(BoardError::OutOfBounds {
            row: 5,
            col: 5,
            size: 3
        })
    );

    sleep(Duration::from_millis(1_000)).await;
    assert_eq!(handle.snapshot().time_remaining, 7);
}

#[tokio::test(start_paused = true)]
async fn test_finished_round_stops_clock() {
    let (handle, _task) = started_match(3).await;
    for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
        handle.submit_move(row, col).await.unwrap();
    }
    let finished = handle.snapshot();
    assert_eq!(finished.outcome, Some(Outcome::Win(Player::Player1)));
    assert!(!finished.timer_running);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshot(), finished);

    let next = handle.start_next_round().await.unwrap();
    assert_eq!(next.round, 2);
    assert_eq!(next.score, Score::new(1, 0, 0));
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(handle.snapshot().time_remaining, 9);
}

#[tokio::test(start_paused = true)]
async fn test_new_match_stops_clock() {
    let (handle, _task) = started_match(4).await;
    handle.start_new_match().await.unwrap();

    sleep(Duration::from_secs(20)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.phase, MatchPhase::Selecting);
    assert!(!snapshot.timer_running);
    assert_eq!(snapshot.current_player, None);
}

#[tokio::test(start_paused = true)]
async fn test_restart_round_resets_clock() {
    let (handle, _task) = started_match(5).await;
    handle.submit_move(2, 2).await.unwrap();
    sleep(Duration::from_millis(4_500)).await;

    let restarted = handle.restart_round().await.unwrap();
    assert_eq!(restarted.current_player, Some(Player::Player1));
    assert_eq!(restarted.time_remaining, 10);
    assert!(restarted.cells().iter().all(|cell| cell.is_empty()));

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(handle.snapshot().time_remaining, 9);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_ticks() {
    let (handle, _task) = started_match(3).await;
    let mut updates = handle.subscribe();
    updates.borrow_and_update();

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().time_remaining, 9);
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().time_remaining, 8);
}

#[tokio::test(start_paused = true)]
async fn test_manual_tick_and_symbol_update() {
    let (handle, _task) = started_match(3).await;

    let snapshot = handle.tick().await.unwrap();
    assert_eq!(snapshot.time_remaining, 9);

    let snapshot = handle.update_symbols("#", "@").await.unwrap();
    assert_eq!(snapshot.current_symbol(), Some("#"));
    assert!(handle.update_symbols("#", "#").await.is_err());
    assert_eq!(handle.snapshot().symbols, PlayerSymbols::new("#", "@").unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_stopped_driver_reports_disconnected() {
    let (handle, task) = started_match(3).await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(handle.submit_move(0, 0).await, Err(MatchError::Disconnected));
}
