use bubbletea_rs::{KeyMsg, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use dial_timer::config::Settings;
use dial_timer::prelude::*;

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn plain(view: String) -> String {
    strip_ansi_escapes::strip_str(view)
}

#[tokio::test]
async fn test_space_starts_countdown() {
    let mut widget = TimerWidget::with_settings(Settings::default());

    let cmd = widget.update(key(KeyCode::Char(' '))).expect("toggle command");
    let msg = cmd.await.expect("toggle message");
    assert!(msg.downcast_ref::<ToggleMsg>().is_some());

    widget.update(msg);
    assert_eq!(widget.phase(), Phase::Started);
    assert!(plain(widget.view()).contains("■ stop"));
}

#[tokio::test]
async fn test_scheduled_ticks_advance_running_timer() {
    let mut widget = TimerWidget::with_settings(Settings::default());
    widget.on_toggle();

    let mut cmd = widget.start().expect("tick chain");
    for _ in 0..3 {
        let msg = cmd.await.expect("tick message");
        assert!(msg.downcast_ref::<TickMsg>().is_some());
        cmd = widget.update(msg).expect("next tick");
    }

    assert_eq!(
        widget.snapshot(),
        Snapshot {
            seconds_left: 59,
            millis_left: 997,
            running: true,
        }
    );
}

#[test]
fn test_full_run_finishes_and_stays_finished() {
    let mut widget = TimerWidget::with_settings(Settings::default());
    widget.on_toggle();

    for _ in 0..60_000 {
        let tick = widget.driver().tick_msg();
        widget.update(Box::new(tick));
    }

    assert_eq!(widget.phase(), Phase::Finished);
    assert_eq!((widget.snapshot().seconds_left, widget.snapshot().millis_left), (0, 0));
    assert!(widget.driver().done());
    assert_eq!(widget.frame().elapsed_count(), 60);
    assert!(plain(widget.view()).contains("0 : 0"));

    let tick = widget.driver().tick_msg();
    assert!(widget.update(Box::new(tick)).is_none());

    // toggling after the end is allowed but the countdown stays put
    widget.on_toggle();
    let tick = widget.driver().tick_msg();
    widget.update(Box::new(tick));
    assert_eq!(widget.snapshot().seconds_left, 0);
    assert_eq!(widget.snapshot().millis_left, 0);
}

#[test]
fn test_pause_holds_countdown() {
    let mut widget = TimerWidget::with_settings(Settings::default());
    widget.on_toggle();
    for _ in 0..10 {
        let tick = widget.driver().tick_msg();
        widget.update(Box::new(tick));
    }
    widget.on_toggle();
    let paused = widget.snapshot();

    for _ in 0..10 {
        let tick = widget.driver().tick_msg();
        assert!(widget.update(Box::new(tick)).is_some());
    }
    assert_eq!(widget.snapshot(), paused);
    assert_eq!(paused.millis_left, 990);
}

#[test]
fn test_resize_shrinks_dial() {
    let mut widget = TimerWidget::with_settings(Settings::default());
    widget.update(Box::new(WindowSizeMsg {
        width: 80,
        height: 24,
    }));
    assert_eq!(widget.dial().radius, 9);
    assert!(plain(widget.view()).lines().count() <= 24);
}
