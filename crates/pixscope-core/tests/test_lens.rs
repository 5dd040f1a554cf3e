mod common;

use image::{Rgba, RgbaImage};

use pixscope_core::config::LensConfig;
use pixscope_core::consts::LENS_GUIDE_COLOR;
use pixscope_core::geometry::{PixelCoord, Point, Rect, Size};
use pixscope_core::lens::{
    compose, crop_rect, crop_size, inspect_pointer, place_lens, render_lens, CropRect, LensUpdate,
};
use pixscope_core::sampler::{PixelSampler, Raster};
use pixscope_core::session::Generation;

fn ready_sampler(width: u32, height: u32) -> PixelSampler {
    let mut sampler = PixelSampler::new();
    let generation = Generation::default();
    sampler.begin(generation);
    sampler.complete(generation, Ok(common::coordinate_raster(width, height)));
    sampler
}

// ---------------------------------------------------------------------------
// Crop
// ---------------------------------------------------------------------------

#[test]
fn test_crop_size_from_lens_and_zoom() {
    assert_eq!(crop_size(200, 8.0, 100, 100), 25);
    assert_eq!(crop_size(200, 3.0, 500, 500), 67);
}

#[test]
fn test_crop_size_bounds() {
    // Never below two pixels.
    assert_eq!(crop_size(200, 1000.0, 100, 100), 2);
    // Never larger than the raster.
    assert_eq!(crop_size(200, 8.0, 10, 40), 10);
    // Thinner than two pixels: the smaller side.
    assert_eq!(crop_size(200, 8.0, 1, 50), 1);
}

#[test]
fn test_crop_origin_at_top_left_hover() {
    // Hover at pixel (0,0) of a 100x100 image.
    let sampler = ready_sampler(100, 100);
    let image_rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let lens = LensConfig::default();

    let LensUpdate::Show(frame) = inspect_pointer(
        Point::new(0.0, 0.0),
        image_rect,
        image_rect,
        &sampler,
        &lens,
    ) else {
        panic!("lens should show");
    };
    let focus = frame.state.pixel.unwrap().coord();
    assert_eq!(focus, PixelCoord::new(0, 0));

    let size = crop_size(lens.size, lens.zoom, 100, 100);
    assert_eq!(
        crop_rect(focus, size, 100, 100),
        CropRect { x: 0, y: 0, size: 25 }
    );
}

#[test]
fn test_crop_centred_and_shifted_at_edges() {
    assert_eq!(
        crop_rect(PixelCoord::new(50, 50), 25, 100, 100),
        CropRect { x: 38, y: 38, size: 25 }
    );
    assert_eq!(
        crop_rect(PixelCoord::new(99, 99), 25, 100, 100),
        CropRect { x: 75, y: 75, size: 25 }
    );
    assert_eq!(
        crop_rect(PixelCoord::new(3, 97), 25, 100, 100),
        CropRect { x: 0, y: 75, size: 25 }
    );
}

#[test]
fn test_crop_never_leaves_raster() {
    for (w, h) in [(2, 2), (3, 17), (25, 25), (64, 31), (300, 200)] {
        let size = crop_size(200, 8.0, w, h);
        assert!(size >= 2 && size <= w.min(h));
        for y in (0..h).step_by(3) {
            for x in (0..w).step_by(3) {
                let c = crop_rect(PixelCoord::new(x, y), size, w, h);
                assert!(c.x + c.size <= w, "{w}x{h} at ({x},{y})");
                assert!(c.y + c.size <= h, "{w}x{h} at ({x},{y})");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_render_lens_canvas_size() {
    let raster = common::coordinate_raster(100, 100);
    let lens = LensConfig::default();
    let out = render_lens(&raster, PixelCoord::new(50, 50), &lens);
    assert_eq!(out.dimensions(), (lens.size, lens.size));
}

#[test]
fn test_render_lens_nearest_neighbour_blocks() {
    let raster = common::coordinate_raster(100, 100);
    let out = render_lens(&raster, PixelCoord::new(50, 50), &LensConfig::default());

    // Crop starts at (38,38); each source pixel covers 8x8 canvas pixels.
    assert_eq!(out.get_pixel(10, 10), &Rgba([39, 39, 128, 255]));
    assert_eq!(out.get_pixel(15, 15), &Rgba([39, 39, 128, 255]));
    assert_eq!(out.get_pixel(16, 10), &Rgba([40, 39, 128, 255]));
    assert_eq!(out.get_pixel(150, 60), &Rgba([56, 45, 128, 255]));
}

#[test]
fn test_render_lens_draws_guides() {
    let raster = Raster::from_rgba(RgbaImage::from_pixel(50, 50, Rgba([255, 255, 255, 255])))
        .unwrap();
    let lens = LensConfig::default();
    let out = render_lens(&raster, PixelCoord::new(25, 25), &lens);
    let mid = lens.size / 2;
    let white = Rgba([255, 255, 255, 255]);

    // Border, crosshair and plain content.
    assert_ne!(out.get_pixel(0, 40), &white);
    assert_ne!(out.get_pixel(lens.size - 1, 40), &white);
    assert_ne!(out.get_pixel(mid, 40), &white);
    assert_ne!(out.get_pixel(40, mid), &white);
    assert_eq!(out.get_pixel(40, 40), &white);

    // Guide color is dark and partly transparent, so it darkens white but keeps it opaque.
    let guide = out.get_pixel(0, 40);
    assert_eq!(guide[3], 255);
    assert!(guide[0] < 255 && guide[0] > LENS_GUIDE_COLOR[0]);
}

#[test]
fn test_render_lens_tiny_raster() {
    let raster = common::coordinate_raster(1, 1);
    let out = render_lens(&raster, PixelCoord::new(0, 0), &LensConfig::default());
    assert_eq!(out.get_pixel(40, 40), &Rgba([0, 0, 128, 255]));
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[test]
fn test_place_lens_below_right_of_cursor() {
    let lens = LensConfig::default();
    let pos = place_lens(Point::new(100.0, 100.0), Size::new(800.0, 600.0), &lens);
    assert_eq!(pos, Point::new(116.0, 116.0));
}

#[test]
fn test_place_lens_flips_near_right_edge() {
    let lens = LensConfig::default();
    let pos = place_lens(Point::new(750.0, 100.0), Size::new(800.0, 600.0), &lens);
    assert_eq!(pos.x, 750.0 - 200.0 - 16.0);
    assert_eq!(pos.y, 116.0);
}

#[test]
fn test_place_lens_flips_near_bottom_including_info_panel() {
    let lens = LensConfig::default();
    // 550 + 16 + 200 + 72 overflows 600.
    let pos = place_lens(Point::new(100.0, 550.0), Size::new(800.0, 600.0), &lens);
    assert_eq!(pos.x, 116.0);
    assert_eq!(pos.y, 550.0 - 272.0 - 16.0);
}

#[test]
fn test_place_lens_clamped_after_flip() {
    let lens = LensConfig::default();
    let pos = place_lens(Point::new(150.0, 10.0), Size::new(300.0, 400.0), &lens);
    assert_eq!(pos.x, 0.0);
}

#[test]
fn test_place_lens_always_inside_container() {
    let lens = LensConfig::default();
    let container = Size::new(500.0, 400.0);
    let total_height = lens.size as f32 + lens.info_height;

    let mut y = 0.0;
    while y <= container.height {
        let mut x = 0.0;
        while x <= container.width {
            let pos = place_lens(Point::new(x, y), container, &lens);
            assert!(pos.x >= 0.0 && pos.y >= 0.0);
            assert!(pos.x + lens.size as f32 <= container.width, "cursor ({x},{y})");
            assert!(pos.y + total_height <= container.height, "cursor ({x},{y})");
            x += 7.0;
        }
        y += 7.0;
    }
}

// ---------------------------------------------------------------------------
// Pointer pass
// ---------------------------------------------------------------------------

#[test]
fn test_inspect_pointer_not_ready() {
    let sampler = PixelSampler::new();
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let update = inspect_pointer(
        Point::new(5.0, 5.0),
        rect,
        rect,
        &sampler,
        &LensConfig::default(),
    );
    assert!(matches!(update, LensUpdate::NotReady));
}

#[test]
fn test_inspect_pointer_off_image_hides() {
    let sampler = ready_sampler(50, 50);
    let container = Rect::new(0.0, 0.0, 800.0, 600.0);
    let image_rect = Rect::new(100.0, 100.0, 100.0, 100.0);
    let update = inspect_pointer(
        Point::new(50.0, 50.0),
        image_rect,
        container,
        &sampler,
        &LensConfig::default(),
    );
    assert!(matches!(update, LensUpdate::Hide));
}

#[test]
fn test_inspect_pointer_shows_pixel_under_cursor() {
    let sampler = ready_sampler(50, 50);
    let container = Rect::new(20.0, 30.0, 800.0, 600.0);
    // 50x50 image drawn at 2x.
    let image_rect = Rect::new(120.0, 130.0, 100.0, 100.0);
    let update = inspect_pointer(
        Point::new(141.0, 161.0),
        image_rect,
        container,
        &sampler,
        &LensConfig::default(),
    );

    let LensUpdate::Show(frame) = update else {
        panic!("lens should show");
    };
    let pixel = frame.state.pixel.unwrap();
    assert_eq!((pixel.x, pixel.y), (10, 15));
    assert_eq!(pixel.rgba, [10, 15, 128, 255]);
    assert!(frame.state.visible);
    // Cursor is at (121,131) inside the container.
    assert_eq!(frame.state.position, Point::new(137.0, 147.0));
    assert_eq!(frame.image.dimensions(), (200, 200));
}

#[test]
fn test_compose_out_of_bounds_focus() {
    let raster = common::coordinate_raster(10, 10);
    let frame = compose(
        &raster,
        PixelCoord::new(10, 3),
        Point::new(0.0, 0.0),
        Size::new(500.0, 500.0),
        &LensConfig::default(),
    );
    assert!(frame.is_none());
}
