use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::config::KeyboardConfig;
use crate::format::clamp;
use crate::geometry::{PixelCoord, Point, Rect};

/// Map a screen point over the on-screen image to the image pixel under it.
///
/// Returns `None` when the point lies outside `image_rect`. The result is
/// always within `[0, width-1] × [0, height-1]`.
pub fn pointer_to_pixel(
    pointer: Point,
    image_rect: Rect,
    width: u32,
    height: u32,
) -> Option<PixelCoord> {
    if width == 0 || height == 0 || image_rect.width <= 0.0 || image_rect.height <= 0.0 {
        return None;
    }
    if !image_rect.contains(pointer) {
        return None;
    }

    let local = image_rect.to_local(pointer);
    let scale_x = width as f32 / image_rect.width;
    let scale_y = height as f32 / image_rect.height;
    let x = (local.x * scale_x).floor().max(0.0) as u32;
    let y = (local.y * scale_y).floor().max(0.0) as u32;

    Some(PixelCoord::new(
        clamp(x, 0, width - 1),
        clamp(y, 0, height - 1),
    ))
}

/// Screen position of the centre of `coord` on the displayed image.
pub fn pixel_to_point(coord: PixelCoord, image_rect: Rect, width: u32, height: u32) -> Point {
    let scale_x = image_rect.width / width.max(1) as f32;
    let scale_y = image_rect.height / height.max(1) as f32;
    Point::new(
        image_rect.x + (coord.x as f32 + 0.5) * scale_x,
        image_rect.y + (coord.y as f32 + 0.5) * scale_y,
    )
}

/// Trailing-edge coalescing of high-frequency events.
///
/// Any number of values may be pushed between two frames; only the most
/// recent one is handed out by [`take`](Self::take).
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value`. Returns `true` if a frame pass needs scheduling, i.e.
    /// nothing was pending yet.
    pub fn push(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    /// Latest value since the previous call, if any.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Keys that move the lens focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NudgeKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl NudgeKey {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::ArrowUp | Self::W => (0, -1),
            Self::ArrowDown | Self::S => (0, 1),
            Self::ArrowLeft | Self::A => (-1, 0),
            Self::ArrowRight | Self::D => (1, 0),
        }
    }
}

/// A focus move in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nudge {
    pub dx: i32,
    pub dy: i32,
}

impl Nudge {
    /// Move `from` by this nudge, staying inside a `width`×`height` image.
    pub fn apply(self, from: PixelCoord, width: u32, height: u32) -> PixelCoord {
        let max_x = width.saturating_sub(1) as i64;
        let max_y = height.saturating_sub(1) as i64;
        PixelCoord::new(
            clamp(from.x as i64 + self.dx as i64, 0, max_x) as u32,
            clamp(from.y as i64 + self.dy as i64, 0, max_y) as u32,
        )
    }
}

/// Centre pixel of a `width`×`height` image, where keyboard focus starts.
pub fn center_pixel(width: u32, height: u32) -> PixelCoord {
    PixelCoord::new(width / 2, height / 2)
}

/// Keyboard-driven focus movement with press-and-hold repeat.
///
/// A newly pressed key moves once immediately; while any mapped key stays
/// held a repeat fires after `repeat_delay` and then every `repeat_interval`.
/// Each move uses the net direction of all held keys, so opposing keys
/// cancel. The handler only reacts while enabled; disabling it forgets held
/// keys and stops the repeat.
#[derive(Debug)]
pub struct KeyboardNudge {
    enabled: bool,
    held: BTreeSet<NudgeKey>,
    next_repeat: Option<Instant>,
    step: i32,
    delay: Duration,
    interval: Duration,
}

impl KeyboardNudge {
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            enabled: false,
            held: BTreeSet::new(),
            next_repeat: None,
            step: config.step.min(i32::MAX as u32) as i32,
            delay: config.repeat_delay(),
            interval: config.repeat_interval(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.held.clear();
            self.next_repeat = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Handle a key press (OS auto-repeat presses must be filtered out by the caller).
    pub fn key_down(&mut self, key: NudgeKey, now: Instant) -> Option<Nudge> {
        if !self.enabled || !self.held.insert(key) {
            return None;
        }
        if self.next_repeat.is_none() {
            self.next_repeat = Some(now + self.delay);
        }
        self.net_nudge()
    }

    pub fn key_up(&mut self, key: NudgeKey) {
        self.held.remove(&key);
        if self.held.is_empty() {
            self.next_repeat = None;
        }
    }

    /// Fire the repeat if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Nudge> {
        let due = self.next_repeat?;
        if now < due {
            return None;
        }
        self.next_repeat = Some(now + self.interval);
        self.net_nudge()
    }

    /// When the next repeat is due, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_repeat
    }

    /// Net direction of held keys, each axis reduced to its sign.
    pub fn net_direction(&self) -> (i32, i32) {
        let (dx, dy) = self
            .held
            .iter()
            .map(|k| k.delta())
            .fold((0, 0), |(ax, ay), (x, y)| (ax + x, ay + y));
        (dx.signum(), dy.signum())
    }

    fn net_nudge(&self) -> Option<Nudge> {
        let (sx, sy) = self.net_direction();
        if sx == 0 && sy == 0 {
            return None;
        }
        Some(Nudge {
            dx: sx * self.step,
            dy: sy * self.step,
        })
    }
}
