use std::time::{Duration, Instant};

use pixscope_core::config::KeyboardConfig;
use pixscope_core::geometry::PixelCoord;
use pixscope_core::input::{center_pixel, FrameCoalescer, KeyboardNudge, Nudge, NudgeKey};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn enabled_nudge() -> KeyboardNudge {
    let mut nudge = KeyboardNudge::new(&KeyboardConfig::default());
    nudge.set_enabled(true);
    nudge
}

// ---------------------------------------------------------------------------
// FrameCoalescer
// ---------------------------------------------------------------------------

#[test]
fn test_coalescer_keeps_latest() {
    let mut c = FrameCoalescer::new();
    assert!(c.push((1, 1)));
    assert!(!c.push((2, 2)));
    assert!(!c.push((3, 3)));
    assert!(c.has_pending());

    assert_eq!(c.take(), Some((3, 3)));
    assert_eq!(c.take(), None);
}

#[test]
fn test_coalescer_cancel_drops_pending() {
    let mut c = FrameCoalescer::new();
    c.push(5);
    c.cancel();
    assert!(!c.has_pending());
    assert_eq!(c.take(), None);
    // A new push schedules again.
    assert!(c.push(6));
}

// ---------------------------------------------------------------------------
// Key mapping
// ---------------------------------------------------------------------------

#[test]
fn test_key_deltas() {
    assert_eq!(NudgeKey::ArrowUp.delta(), (0, -1));
    assert_eq!(NudgeKey::W.delta(), (0, -1));
    assert_eq!(NudgeKey::ArrowDown.delta(), (0, 1));
    assert_eq!(NudgeKey::S.delta(), (0, 1));
    assert_eq!(NudgeKey::ArrowLeft.delta(), (-1, 0));
    assert_eq!(NudgeKey::A.delta(), (-1, 0));
    assert_eq!(NudgeKey::ArrowRight.delta(), (1, 0));
    assert_eq!(NudgeKey::D.delta(), (1, 0));
}

#[test]
fn test_nudge_apply_clamps_to_image() {
    let left = Nudge { dx: -1, dy: 0 };
    assert_eq!(left.apply(PixelCoord::new(0, 0), 10, 10), PixelCoord::new(0, 0));

    let down_right = Nudge { dx: 1, dy: 1 };
    assert_eq!(down_right.apply(PixelCoord::new(9, 9), 10, 10), PixelCoord::new(9, 9));
    assert_eq!(down_right.apply(PixelCoord::new(4, 2), 10, 10), PixelCoord::new(5, 3));

    let far = Nudge { dx: -50, dy: 50 };
    assert_eq!(far.apply(PixelCoord::new(4, 2), 10, 10), PixelCoord::new(0, 9));
}

#[test]
fn test_center_pixel() {
    assert_eq!(center_pixel(100, 50), PixelCoord::new(50, 25));
    assert_eq!(center_pixel(1, 1), PixelCoord::new(0, 0));
}

// ---------------------------------------------------------------------------
// KeyboardNudge
// ---------------------------------------------------------------------------

#[test]
fn test_disabled_handler_ignores_keys() {
    let mut nudge = KeyboardNudge::new(&KeyboardConfig::default());
    let t0 = Instant::now();
    assert!(!nudge.is_enabled());
    assert_eq!(nudge.key_down(NudgeKey::ArrowRight, t0), None);
    assert!(!nudge.is_held());
    assert_eq!(nudge.next_deadline(), None);
}

#[test]
fn test_first_press_moves_immediately() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    assert_eq!(
        nudge.key_down(NudgeKey::ArrowRight, t0),
        Some(Nudge { dx: 1, dy: 0 })
    );
    assert_eq!(nudge.next_deadline(), Some(t0 + ms(250)));
}

#[test]
fn test_second_press_of_held_key_ignored() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::D, t0);
    assert_eq!(nudge.key_down(NudgeKey::D, t0 + ms(10)), None);
}

#[test]
fn test_opposing_keys_cancel() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::ArrowRight, t0);
    assert_eq!(nudge.key_down(NudgeKey::ArrowLeft, t0 + ms(5)), None);
    assert_eq!(nudge.net_direction(), (0, 0));
    // The repeat stays armed but moves nothing.
    assert_eq!(nudge.poll(t0 + ms(300)), None);
}

#[test]
fn test_diagonal_from_two_keys() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::W, t0);
    assert_eq!(
        nudge.key_down(NudgeKey::D, t0),
        Some(Nudge { dx: 1, dy: -1 })
    );
}

#[test]
fn test_same_axis_keys_reduce_to_sign() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::ArrowUp, t0);
    nudge.key_down(NudgeKey::W, t0);
    assert_eq!(nudge.net_direction(), (0, -1));
}

#[test]
fn test_repeat_delay_then_interval() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::ArrowDown, t0);

    assert_eq!(nudge.poll(t0 + ms(100)), None);
    assert_eq!(nudge.poll(t0 + ms(249)), None);
    assert_eq!(nudge.poll(t0 + ms(250)), Some(Nudge { dx: 0, dy: 1 }));

    assert_eq!(nudge.next_deadline(), Some(t0 + ms(300)));
    assert_eq!(nudge.poll(t0 + ms(299)), None);
    assert_eq!(nudge.poll(t0 + ms(300)), Some(Nudge { dx: 0, dy: 1 }));
    assert_eq!(nudge.poll(t0 + ms(350)), Some(Nudge { dx: 0, dy: 1 }));
}

#[test]
fn test_repeat_uses_currently_held_keys() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::ArrowRight, t0);
    nudge.key_down(NudgeKey::ArrowUp, t0 + ms(100));
    // Second key does not restart the delay.
    assert_eq!(nudge.next_deadline(), Some(t0 + ms(250)));
    assert_eq!(nudge.poll(t0 + ms(250)), Some(Nudge { dx: 1, dy: -1 }));

    nudge.key_up(NudgeKey::ArrowRight);
    assert_eq!(nudge.poll(t0 + ms(300)), Some(Nudge { dx: 0, dy: -1 }));
}

#[test]
fn test_releasing_all_keys_cancels_repeat() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::A, t0);
    nudge.key_down(NudgeKey::S, t0);
    nudge.key_up(NudgeKey::A);
    assert!(nudge.next_deadline().is_some());

    nudge.key_up(NudgeKey::S);
    assert!(!nudge.is_held());
    assert_eq!(nudge.next_deadline(), None);
    assert_eq!(nudge.poll(t0 + ms(1000)), None);
}

#[test]
fn test_disable_clears_held_keys() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    nudge.key_down(NudgeKey::ArrowLeft, t0);

    nudge.set_enabled(false);
    assert!(!nudge.is_held());
    assert_eq!(nudge.next_deadline(), None);
    assert_eq!(nudge.poll(t0 + ms(1000)), None);

    // Re-enabling starts fresh: the key must be pressed again.
    nudge.set_enabled(true);
    assert_eq!(nudge.poll(t0 + ms(2000)), None);
    assert_eq!(
        nudge.key_down(NudgeKey::ArrowLeft, t0 + ms(2000)),
        Some(Nudge { dx: -1, dy: 0 })
    );
}

#[test]
fn test_configured_step() {
    let config = KeyboardConfig {
        step: 5,
        ..KeyboardConfig::default()
    };
    let mut nudge = KeyboardNudge::new(&config);
    nudge.set_enabled(true);
    assert_eq!(
        nudge.key_down(NudgeKey::S, Instant::now()),
        Some(Nudge { dx: 0, dy: 5 })
    );
}

#[test]
fn test_hold_moves_focus_across_image() {
    let mut nudge = enabled_nudge();
    let t0 = Instant::now();
    let mut focus = center_pixel(20, 20);

    if let Some(n) = nudge.key_down(NudgeKey::ArrowRight, t0) {
        focus = n.apply(focus, 20, 20);
    }
    let mut t = t0 + ms(250);
    while t < t0 + ms(2000) {
        if let Some(n) = nudge.poll(t) {
            focus = n.apply(focus, 20, 20);
        }
        t += ms(10);
    }
    // Ran into the right edge and stayed there.
    assert_eq!(focus, PixelCoord::new(19, 10));
}
