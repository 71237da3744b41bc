use ratatui::{buffer::Buffer, layout::Rect};
use std::time::{Duration, Instant};
use swipetodo::theme::{ColorMode, DefaultTheme, ThemeResolver};
use swipetodo::ui::components::{CheckboxToggle, CheckedState, ReconcilePolicy};

const ANIMATION: Duration = Duration::from_millis(150);

#[test]
fn test_never_policy_ignores_is_done() {
    let t0 = Instant::now();
    let mut checkbox = CheckboxToggle::new(true, ReconcilePolicy::Never, ANIMATION, t0);
    assert_eq!(checkbox.state(), CheckedState::Unchecked);

    checkbox.sync_external(true, t0);
    checkbox.sync_external(false, t0);
    checkbox.sync_external(true, t0);
    assert_eq!(checkbox.state(), CheckedState::Unchecked);
    assert!(checkbox.confirmed());
}

#[test]
fn test_press_parity() {
    let t0 = Instant::now();
    for presses in 0..6 {
        let mut checkbox = CheckboxToggle::new(false, ReconcilePolicy::Never, ANIMATION, t0);
        for _ in 0..presses {
            checkbox.press(t0);
        }
        assert_eq!(checkbox.is_checked(), presses % 2 == 1, "after {presses} presses");
    }
}

#[test]
fn test_double_press_restores_state() {
    let t0 = Instant::now();
    let mut checkbox = CheckboxToggle::new(false, ReconcilePolicy::WhenIdle, ANIMATION, t0);
    let before = checkbox.state();
    checkbox.press(t0);
    checkbox.press(t0 + Duration::from_millis(5));
    assert_eq!(checkbox.state(), before);
}

#[test]
fn test_when_idle_keeps_pending_press() {
    let t0 = Instant::now();
    let mut checkbox = CheckboxToggle::new(true, ReconcilePolicy::WhenIdle, ANIMATION, t0);
    assert!(checkbox.is_checked());

    checkbox.press(t0);
    assert!(!checkbox.is_checked());
    assert!(checkbox.has_pending_edit());

    // A stale value does not undo the press
    checkbox.sync_external(true, t0);
    assert!(!checkbox.is_checked());
    assert!(checkbox.has_pending_edit());

    // The matching value confirms it
    checkbox.sync_external(false, t0);
    assert!(!checkbox.has_pending_edit());

    // Later external changes apply again
    checkbox.sync_external(true, t0);
    assert!(checkbox.is_checked());
}

#[test]
fn test_always_policy_follows_is_done() {
    let t0 = Instant::now();
    let mut checkbox = CheckboxToggle::new(false, ReconcilePolicy::Always, ANIMATION, t0);
    checkbox.press(t0);
    assert!(checkbox.is_checked());

    checkbox.sync_external(false, t0);
    assert!(!checkbox.is_checked());
    assert!(!checkbox.has_pending_edit());
}

#[test]
fn test_visual_transitions_with_time() {
    let t0 = Instant::now();
    let colors = DefaultTheme.row_colors(ColorMode::Light);
    let mut checkbox = CheckboxToggle::new(false, ReconcilePolicy::Never, ANIMATION, t0);

    let resting = checkbox.visual(&colors, t0);
    assert_eq!(resting.checkmark_opacity, 0.0);
    assert_eq!(resting.stroke, colors.box_stroke);

    checkbox.press(t0);
    assert!(checkbox.is_animating(t0 + Duration::from_millis(50)));

    let done = t0 + Duration::from_secs(1);
    let checked = checkbox.visual(&colors, done);
    assert!(!checkbox.is_animating(done));
    assert_eq!(checked.checkmark_opacity, 1.0);
    assert_eq!(checked.fill, colors.highlight);
    assert_eq!(checked.checkmark, colors.checkmark);
}

#[test]
fn test_render_draws_checkmark_once_settled() {
    let t0 = Instant::now();
    let colors = DefaultTheme.row_colors(ColorMode::Dark);
    let mut checkbox = CheckboxToggle::new(false, ReconcilePolicy::Never, ANIMATION, t0);
    let area = Rect::new(0, 0, 4, 1);

    let mut buf = Buffer::empty(area);
    checkbox.render(area, &mut buf, &colors, t0);
    assert_eq!(buf[(0, 0)].symbol(), "[");
    assert_eq!(buf[(1, 0)].symbol(), " ");
    assert_eq!(buf[(2, 0)].symbol(), "]");

    checkbox.press(t0);
    let mut buf = Buffer::empty(area);
    checkbox.render(area, &mut buf, &colors, t0 + Duration::from_secs(1));
    assert_eq!(buf[(1, 0)].symbol(), "x");
}
