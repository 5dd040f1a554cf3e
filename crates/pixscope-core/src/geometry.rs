/// A point in screen space (logical pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen space, origin at the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inclusive on all edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// `p` relative to this rectangle's top-left corner.
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }
}

/// Integer pixel coordinate in image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Result of [`fit_within`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitDimensions {
    pub width: u32,
    pub height: u32,
    /// Uniform factor applied to both sides (1.0 when not scaled).
    pub scale: f64,
    pub scaled: bool,
}

/// Uniformly shrink `width`×`height` so the longer side equals `max_dimension`.
///
/// Images already within bounds pass through unchanged. Each side is rounded
/// independently, so a very thin image may round one side down to zero.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> FitDimensions {
    let max_side = width.max(height);
    if max_side <= max_dimension {
        return FitDimensions {
            width,
            height,
            scale: 1.0,
            scaled: false,
        };
    }

    let scale = max_dimension as f64 / max_side as f64;
    FitDimensions {
        width: (width as f64 * scale).round() as u32,
        height: (height as f64 * scale).round() as u32,
        scale,
        scaled: true,
    }
}
