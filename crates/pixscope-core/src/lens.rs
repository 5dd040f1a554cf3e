use image::{Rgba, RgbaImage};

use crate::config::LensConfig;
use crate::consts::{LENS_GUIDE_COLOR, MIN_CROP_SIZE};
use crate::format::clamp;
use crate::geometry::{PixelCoord, Point, Rect, Size};
use crate::input::pointer_to_pixel;
use crate::sampler::{PixelSample, PixelSampler, Raster};

/// Square region of the raster magnified by the lens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// What the lens overlay should show.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LensViewState {
    pub visible: bool,
    /// Top-left corner, relative to the viewer container.
    pub position: Point,
    pub pixel: Option<PixelSample>,
}

impl LensViewState {
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// A rendered lens ready to be shown.
#[derive(Clone, Debug)]
pub struct LensFrame {
    pub state: LensViewState,
    pub image: RgbaImage,
}

/// Outcome of one pointer pass.
#[derive(Clone, Debug)]
pub enum LensUpdate {
    /// Raster not decoded yet (or failed); leave the lens as it is.
    NotReady,
    /// Pointer is off the image.
    Hide,
    Show(LensFrame),
}

/// Edge length of the source crop: `round(L / Z)` bounded to
/// `[2, min(raster_width, raster_height)]`.
///
/// Rasters thinner than two pixels yield their smaller side.
pub fn crop_size(lens_size: u32, zoom: f32, raster_width: u32, raster_height: u32) -> u32 {
    let wanted = (lens_size as f32 / zoom).round() as u32;
    clamp(wanted, MIN_CROP_SIZE, raster_width.min(raster_height))
}

/// Crop of `size` centred on `focus`, shifted to stay inside the raster.
pub fn crop_rect(focus: PixelCoord, size: u32, raster_width: u32, raster_height: u32) -> CropRect {
    let half = size / 2;
    let x = clamp(
        focus.x.saturating_sub(half),
        0,
        raster_width.saturating_sub(size),
    );
    let y = clamp(
        focus.y.saturating_sub(half),
        0,
        raster_height.saturating_sub(size),
    );
    CropRect { x, y, size }
}

/// Paint the magnified crop around `focus` into a `lens.size` square canvas.
///
/// Scaling is nearest-neighbour so every source pixel is a solid block. A 1px
/// border and a centred crosshair are composited on top.
pub fn render_lens(raster: &Raster, focus: PixelCoord, lens: &LensConfig) -> RgbaImage {
    let canvas = lens.size;
    let size = crop_size(canvas, lens.zoom, raster.width(), raster.height());
    let crop = crop_rect(focus, size, raster.width(), raster.height());
    let view = raster.crop_view(&crop);

    let mut out = RgbaImage::new(canvas, canvas);
    if size == 0 {
        return out;
    }

    for (cx, cy, px) in out.enumerate_pixels_mut() {
        let sx = (cx as u64 * size as u64 / canvas as u64) as usize;
        let sy = (cy as u64 * size as u64 / canvas as u64) as usize;
        let mut color = Rgba([
            view[[sy, sx, 0]],
            view[[sy, sx, 1]],
            view[[sy, sx, 2]],
            view[[sy, sx, 3]],
        ]);
        if is_guide_pixel(cx, cy, canvas) {
            blend_over(&mut color, LENS_GUIDE_COLOR);
        }
        *px = color;
    }
    out
}

fn is_guide_pixel(x: u32, y: u32, canvas: u32) -> bool {
    let last = canvas - 1;
    let mid = canvas / 2;
    x == 0 || y == 0 || x == last || y == last || x == mid || y == mid
}

/// Source-over composite of a straight-alpha `src` onto `dst`.
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let blended = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Where to put the lens for a cursor at `cursor` (container-relative).
///
/// The lens sits at `cursor + offset`, flips to the other side of the cursor
/// when it would overflow the right or bottom edge, and is finally clamped
/// inside the container. The vertical extent includes the readout panel.
pub fn place_lens(cursor: Point, container: Size, lens: &LensConfig) -> Point {
    let size = lens.size as f32;
    let total_height = size + lens.info_height;

    let mut x = cursor.x + lens.offset;
    let mut y = cursor.y + lens.offset;

    if x + size > container.width {
        x = cursor.x - size - lens.offset;
    }
    if y + total_height > container.height {
        y = cursor.y - total_height - lens.offset;
    }

    Point::new(
        clamp(x, 0.0, (container.width - size).max(0.0)),
        clamp(y, 0.0, (container.height - total_height).max(0.0)),
    )
}

/// Sample, render and place the lens for `focus`, anchored at `anchor`.
pub fn compose(
    raster: &Raster,
    focus: PixelCoord,
    anchor: Point,
    container: Size,
    lens: &LensConfig,
) -> Option<LensFrame> {
    let pixel = raster.sample_at(focus)?;
    let image = render_lens(raster, focus, lens);
    let position = place_lens(anchor, container, lens);

    Some(LensFrame {
        state: LensViewState {
            visible: true,
            position,
            pixel: Some(pixel),
        },
        image,
    })
}

/// One pointer pass: map `pointer` through the on-screen `image_rect` and
/// build the lens for the pixel underneath.
///
/// All rectangles are in the same screen space; the lens position in the
/// result is relative to `container`.
pub fn inspect_pointer(
    pointer: Point,
    image_rect: Rect,
    container: Rect,
    sampler: &PixelSampler,
    lens: &LensConfig,
) -> LensUpdate {
    let Some(raster) = sampler.raster() else {
        return LensUpdate::NotReady;
    };

    let Some(focus) = pointer_to_pixel(pointer, image_rect, raster.width(), raster.height())
    else {
        return LensUpdate::Hide;
    };

    match compose(raster, focus, container.to_local(pointer), container.size(), lens) {
        Some(frame) => LensUpdate::Show(frame),
        None => LensUpdate::Hide,
    }
}
