//! Runtime driver tests. Tokio time is paused, so sleeps advance the clock
//! instantly and deterministically.

use std::time::Duration;

use super::helpers::*;
use crate::mascot::config::MascotConfig;
use crate::mascot::idle_actions::{default_click_messages, GREETING_MESSAGE};
use crate::mascot::interface::{MascotError, MascotInput};
use crate::mascot::mood::Mood;
use crate::mascot::random::ScriptedRandom;
use crate::mascot::runtime::MascotRuntime;

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn publishes_boot_greeting_on_schedule() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::default());

    sleep_ms(1000).await;
    let view = handle.view().expect("mounted");
    assert_eq!(view.mood, Mood::Idle);
    assert!(view.bubble.is_none());

    sleep_ms(1100).await; // t = 2100
    let view = handle.view().unwrap();
    assert_eq!(view.mood, Mood::Wave);
    assert_eq!(view.bubble.as_deref(), Some(GREETING_MESSAGE));

    sleep_ms(3000).await; // t = 5100
    assert_eq!(handle.view().unwrap().mood, Mood::Idle);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn idle_action_fires_and_settles() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::new([0]));

    sleep_ms(FIRST_IDLE_ACTION_AT + 100).await;
    let view = handle.view().unwrap();
    assert_eq!(view.mood, Mood::Sleep);
    assert_eq!(view.bubble.as_deref(), Some("zzZ... 💤"));

    sleep_ms(5000).await; // t = 13100
    assert_eq!(handle.view().unwrap().mood, Mood::Idle);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn inputs_are_applied_in_order() {
    let messages = default_click_messages();
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::new([2]));
    sleep_ms(BOOT_SETTLED_AT + 500).await;

    handle.send(MascotInput::CharacterClick).unwrap();
    handle.send(pointer_move(0.4, -0.4)).unwrap();
    sleep_ms(10).await;

    let view = handle.view().unwrap();
    assert_eq!(view.mood, Mood::Happy, "pointer must not cut the reaction");
    assert_eq!(view.bubble.as_deref(), Some(messages[2].as_str()));

    sleep_ms(2000).await;
    assert_eq!(handle.view().unwrap().mood, Mood::Idle);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn minimize_and_restore_round_trip() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::new([0]));
    sleep_ms(BOOT_SETTLED_AT).await;

    handle.send(MascotInput::Minimize).unwrap();
    sleep_ms(60_000).await;
    let view = handle.view().unwrap();
    assert!(view.minimized);
    assert_eq!(view.mood, Mood::Idle);

    handle.send(MascotInput::Restore).unwrap();
    sleep_ms(10).await;
    assert_eq!(handle.view().unwrap().mood, Mood::Wave);

    sleep_ms(2000).await;
    let view = handle.view().unwrap();
    assert_eq!(view.mood, Mood::Idle);
    assert!(view.bubble.is_none());

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_changes_and_final_clear() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::default());
    let mut views = handle.subscribe();

    views.changed().await.unwrap();
    let first = views.borrow_and_update().clone();
    assert_eq!(first.map(|v| v.mood), Some(Mood::Idle));

    views.changed().await.unwrap();
    let greeting = views.borrow_and_update().clone().unwrap();
    assert_eq!(greeting.mood, Mood::Wave);

    handle.shutdown().await.unwrap();
    assert!(views.borrow().is_none(), "view is cleared on teardown");
}

#[tokio::test(start_paused = true)]
async fn shutdown_clears_view_and_closes_channel() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::default());
    let views = handle.subscribe();
    sleep_ms(100).await;
    assert!(handle.is_running());
    handle.shutdown().await.unwrap();

    // The receiver outlives the task; the view it holds is the cleared one.
    assert!(views.borrow().is_none());
    assert!(views.has_changed().is_err(), "sender dropped with the task");
}

#[tokio::test(start_paused = true)]
async fn dropped_sender_tears_down() {
    let handle = MascotRuntime::spawn(MascotConfig::default(), ScriptedRandom::default());
    let mut views = handle.subscribe();
    sleep_ms(100).await;
    drop(handle);

    // Drain until the sender goes away with the task.
    while views.changed().await.is_ok() {}
    assert!(views.borrow().is_none());
}

#[tokio::test(start_paused = true)]
async fn unreachable_deadlines_still_serve_inputs() {
    let config = MascotConfig {
        boot_delay_ms: u64::MAX,
        poll_interval_ms: u64::MAX,
        ..MascotConfig::default()
    };
    let handle = MascotRuntime::spawn(config, ScriptedRandom::default());

    sleep_ms(60_000).await;
    assert_eq!(handle.view().unwrap().mood, Mood::Idle);

    handle.send(MascotInput::CharacterClick).unwrap();
    sleep_ms(10).await;
    assert_eq!(handle.view().unwrap().mood, Mood::Happy);

    sleep_ms(2000).await;
    assert_eq!(handle.view().unwrap().mood, Mood::Idle);

    handle.shutdown().await.unwrap();
}

#[test]
fn closed_runtime_error_is_reported() {
    let err = MascotError::RuntimeClosed;
    let text: String = err.into();
    assert_eq!(text, "Mascot runtime has shut down");
}
