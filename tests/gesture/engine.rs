use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use swipetodo::config::SwipeConfig;
use swipetodo::gesture::{Axis, GestureResponse, SimultaneousHandlers, SwipeEngine, SwipeState};

fn ms(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

/// Engine on a 40-column row, counting `on_swipe_left` calls
fn engine(config: &SwipeConfig, t0: Instant) -> (SwipeEngine, Rc<Cell<u32>>) {
    let removed = Rc::new(Cell::new(0));
    let counter = removed.clone();
    let mut engine = SwipeEngine::new(config, t0);
    engine.set_width(40.0);
    engine.set_on_swipe_left(Some(Box::new(move || counter.set(counter.get() + 1))));
    (engine, removed)
}

#[test]
fn test_drag_past_threshold_commits_once() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(39.0, 0.0, t0);
    assert_eq!(engine.pointer_move(36.0, 0.0, ms(t0, 10)), GestureResponse::None);
    assert!(engine.state().is_dragging());
    engine.pointer_move(7.0, 0.0, ms(t0, 50));
    assert_eq!(engine.offset(ms(t0, 50)), -32.0);

    assert_eq!(engine.pointer_up(7.0, 0.0, ms(t0, 60)), GestureResponse::Committed);
    assert_eq!(removed.get(), 1);
    assert_eq!(engine.state(), SwipeState::Committing);

    let later = ms(t0, 1_000);
    engine.tick(later);
    assert_eq!(engine.state(), SwipeState::Idle { offset: -40.0 });
    assert_eq!(engine.offset(later), -40.0);
    assert_eq!(removed.get(), 1);
}

#[test]
fn test_short_slow_drag_snaps_back() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(30.0, 0.0, t0);
    engine.pointer_move(27.0, 0.0, ms(t0, 100));
    engine.pointer_move(26.0, 0.0, ms(t0, 400));
    assert_eq!(engine.offset(ms(t0, 400)), -4.0);

    assert_eq!(engine.pointer_up(26.0, 0.0, ms(t0, 800)), GestureResponse::Cancelled);
    assert_eq!(engine.state(), SwipeState::Cancelling);
    assert!(engine.is_animating(ms(t0, 810)));

    engine.tick(ms(t0, 2_000));
    assert_eq!(engine.state(), SwipeState::Idle { offset: 0.0 });
    assert_eq!(engine.offset(ms(t0, 2_000)), 0.0);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_pause_before_release_cancels() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(36.0, 0.0, ms(t0, 10));
    engine.pointer_move(23.0, 0.0, ms(t0, 50));
    assert_eq!(engine.offset(ms(t0, 50)), -16.0);

    // The fast approach two seconds ago no longer counts as a flick
    assert_eq!(engine.pointer_up(23.0, 0.0, ms(t0, 2_050)), GestureResponse::Cancelled);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_fast_flick_commits_only_with_velocity_projection() {
    let flick = |config: SwipeConfig| {
        let t0 = Instant::now();
        let (mut engine, removed) = engine(&config, t0);
        engine.pointer_down(39.0, 0.0, t0);
        engine.pointer_move(36.0, 0.0, ms(t0, 10));
        engine.pointer_move(29.0, 0.0, ms(t0, 50));
        let response = engine.pointer_up(29.0, 0.0, ms(t0, 55));
        (response, removed.get())
    };

    assert_eq!(flick(SwipeConfig::default()), (GestureResponse::Committed, 1));

    let displacement_only = SwipeConfig {
        velocity_projection_ms: 0,
        ..SwipeConfig::default()
    };
    assert_eq!(flick(displacement_only), (GestureResponse::Cancelled, 0));
}

#[test]
fn test_release_below_threshold_after_peak_cancels() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(36.0, 0.0, ms(t0, 10));
    engine.pointer_move(9.0, 0.0, ms(t0, 50));
    assert_eq!(engine.offset(ms(t0, 50)), -30.0);
    engine.pointer_move(34.0, 0.0, ms(t0, 300));

    assert_eq!(engine.pointer_up(34.0, 0.0, ms(t0, 600)), GestureResponse::Cancelled);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_tap_is_reported_without_moving_the_row() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(3.0, 0.0, t0);
    engine.pointer_move(4.0, 0.0, ms(t0, 10));
    assert_eq!(engine.pointer_up(4.0, 0.0, ms(t0, 20)), GestureResponse::Tap { x: 3.0, y: 0.0 });
    assert_eq!(engine.state(), SwipeState::default());
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_zero_width_row_never_commits() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);
    engine.set_width(0.0);

    engine.pointer_down(10.0, 0.0, t0);
    engine.pointer_move(0.0, 0.0, ms(t0, 10));
    assert_eq!(engine.offset(ms(t0, 10)), 0.0);
    assert_eq!(engine.pointer_up(0.0, 0.0, ms(t0, 20)), GestureResponse::Cancelled);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_host_cancel_resolves_like_short_release() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(5.0, 0.0, ms(t0, 10));
    assert_eq!(engine.cancel(ms(t0, 20)), GestureResponse::Cancelled);
    assert_eq!(engine.state(), SwipeState::Cancelling);

    // The pointer coming up afterwards resolves nothing further.
    assert_eq!(engine.pointer_up(5.0, 0.0, ms(t0, 30)), GestureResponse::None);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_press_after_lost_release_cancels_open_drag() {
    let t0 = Instant::now();
    let handlers = SimultaneousHandlers::new();
    let (engine, removed) = engine(&SwipeConfig::default(), t0);
    let mut engine = engine.with_simultaneous_handlers(handlers.clone());
    let swipe = engine.handler_id().expect("attached");

    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(29.0, 0.0, ms(t0, 10));
    assert!(handlers.is_active(swipe));

    // The release never arrives; the next press resolves the drag
    assert_eq!(engine.pointer_down(5.0, 0.0, ms(t0, 1_000)), GestureResponse::Cancelled);
    assert_eq!(engine.state(), SwipeState::Cancelling);
    assert!(!handlers.is_active(swipe));

    assert_eq!(engine.pointer_up(5.0, 0.0, ms(t0, 1_010)), GestureResponse::Tap { x: 5.0, y: 0.0 });
    engine.tick(ms(t0, 2_000));
    assert_eq!(engine.state(), SwipeState::Idle { offset: 0.0 });
    assert_eq!(engine.offset(ms(t0, 60_000)), 0.0);
    assert!(!engine.is_animating(ms(t0, 60_000)));
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_blocked_claim_leaves_row_at_rest() {
    let t0 = Instant::now();
    let handlers = SimultaneousHandlers::new();
    let scroll = handlers.register(Axis::Vertical);
    let (engine, removed) = engine(&SwipeConfig::default(), t0);
    let mut engine = engine.with_simultaneous_handlers(handlers.clone());

    assert!(handlers.try_activate(scroll));
    engine.pointer_down(39.0, 0.0, t0);
    assert_eq!(engine.pointer_move(5.0, 0.0, ms(t0, 10)), GestureResponse::None);
    assert_eq!(engine.state(), SwipeState::default());
    assert_eq!(engine.pointer_up(5.0, 0.0, ms(t0, 20)), GestureResponse::None);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_simultaneous_scroll_does_not_block_swipe() {
    let t0 = Instant::now();
    let handlers = SimultaneousHandlers::new();
    let scroll = handlers.register(Axis::Vertical);
    let (engine, removed) = engine(&SwipeConfig::default(), t0);
    let mut engine = engine.with_simultaneous_handlers(handlers.clone());
    handlers.allow_simultaneous(scroll, engine.handler_id().expect("attached"));

    assert!(handlers.try_activate(scroll));
    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(5.0, 0.0, ms(t0, 10));
    assert_eq!(engine.pointer_up(5.0, 0.0, ms(t0, 20)), GestureResponse::Committed);
    assert_eq!(removed.get(), 1);
}

#[test]
fn test_input_during_commit_is_ignored() {
    let t0 = Instant::now();
    let (mut engine, removed) = engine(&SwipeConfig::default(), t0);

    engine.pointer_down(39.0, 0.0, t0);
    engine.pointer_move(5.0, 0.0, ms(t0, 10));
    engine.pointer_up(5.0, 0.0, ms(t0, 20));
    assert_eq!(engine.state(), SwipeState::Committing);

    engine.pointer_down(20.0, 0.0, ms(t0, 30));
    assert_eq!(engine.pointer_move(30.0, 0.0, ms(t0, 40)), GestureResponse::None);
    assert_eq!(engine.pointer_up(30.0, 0.0, ms(t0, 50)), GestureResponse::None);
    assert_eq!(engine.state(), SwipeState::Committing);
    assert_eq!(removed.get(), 1);
}

#[test]
fn test_grab_during_snap_back_starts_from_displayed_offset() {
    let t0 = Instant::now();
    let config = SwipeConfig {
        settle_duration_ms: 1_000,
        ..SwipeConfig::default()
    };
    let (mut engine, _) = engine(&config, t0);

    engine.pointer_down(30.0, 0.0, t0);
    engine.pointer_move(22.0, 0.0, ms(t0, 300));
    engine.pointer_up(22.0, 0.0, ms(t0, 600));
    assert_eq!(engine.state(), SwipeState::Cancelling);

    let began = ms(t0, 710);
    let displayed = engine.offset(began);
    assert!(displayed < 0.0 && displayed > -8.0, "got {displayed}");

    engine.pointer_down(20.0, 0.0, ms(t0, 700));
    engine.pointer_move(17.0, 0.0, began);
    match engine.state() {
        SwipeState::Dragging { origin, offset } => {
            assert_eq!(origin, displayed);
            assert_eq!(offset, displayed - 3.0);
        }
        other => panic!("expected a drag, got {other:?}"),
    }
}

#[test]
fn test_dropping_engine_unregisters_handler() {
    let handlers = SimultaneousHandlers::new();
    let engine = SwipeEngine::new(&SwipeConfig::default(), Instant::now()).with_simultaneous_handlers(handlers.clone());
    let id = engine.handler_id().expect("attached");
    drop(engine);
    assert!(!handlers.try_activate(id));
}
