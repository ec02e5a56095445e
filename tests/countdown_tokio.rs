use std::{sync::Arc, time::Duration};

use pomodoro_timer::{
    runtime::{BroadcastDisplay, DisplayEvent, SystemClock, TokioScheduler},
    Countdown, TimerSettings, TimerStatus,
};
use tokio::sync::broadcast;

fn tokio_countdown(total_ms: u64) -> (Countdown, broadcast::Receiver<DisplayEvent>) {
    let (display, tx) = BroadcastDisplay::channel(64);
    let rx = tx.subscribe();
    let countdown = Countdown::new(
        TimerSettings::from_millis(total_ms).unwrap(),
        TokioScheduler::current(),
        Arc::new(display),
        Arc::new(SystemClock),
    );
    (countdown, rx)
}

fn drain(rx: &mut broadcast::Receiver<DisplayEvent>) -> Vec<DisplayEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn runs_to_completion_on_tokio_time() {
    let (countdown, mut rx) = tokio_countdown(3000);
    countdown.start().unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let state = countdown.state().unwrap();
    assert_eq!(state.status, TimerStatus::Completed);
    assert_eq!(state.remaining_ms, 0);

    let events = drain(&mut rx);
    let updates: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            DisplayEvent::Update { remaining } => Some(remaining.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(updates, vec!["00:02", "00:01"]);
    assert!(events.contains(&DisplayEvent::Completed));
}

#[tokio::test(start_paused = true)]
async fn pause_stops_ticks_and_resume_continues() {
    let (countdown, _rx) = tokio_countdown(10_000);
    countdown.start().unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    countdown.pause().unwrap();
    assert_eq!(countdown.state().unwrap().remaining_ms, 8000);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(countdown.state().unwrap().remaining_ms, 8000);
    assert_eq!(countdown.status().unwrap(), TimerStatus::Paused);

    countdown.start().unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(countdown.state().unwrap().remaining_ms, 7000);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_pending_ticks() {
    let (countdown, _rx) = tokio_countdown(5000);
    countdown.start().unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    countdown.reset().unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    let state = countdown.state().unwrap();
    assert_eq!(state.status, TimerStatus::Idle);
    assert_eq!(state.remaining_ms, 5000);
}
