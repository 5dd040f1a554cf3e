/// Largest accepted upload, in bytes. Default: 8 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 8 * 1024 * 1024;

/// Longest side (in pixels) an image may have before it is downscaled for display.
pub const MAX_IMAGE_DIMENSION: u32 = 2048;

/// Quality used when a downscaled image is re-encoded in a lossy format (0.92).
pub const REENCODE_QUALITY: u8 = 92;

/// Edge length of the square lens canvas, in screen pixels.
pub const LENS_SIZE: u32 = 200;

/// Magnification of the lens: each source pixel covers `LENS_ZOOM` canvas pixels.
pub const LENS_ZOOM: f32 = 8.0;

/// Distance between the cursor and the lens corner, in screen pixels.
pub const LENS_OFFSET: f32 = 16.0;

/// Height reserved below the lens for the pixel readout panel.
pub const LENS_INFO_HEIGHT: f32 = 72.0;

/// Smallest crop (in source pixels) the lens will ever magnify.
pub const MIN_CROP_SIZE: u32 = 2;

/// Lens border and crosshair color (slate-900 at 40% opacity).
pub const LENS_GUIDE_COLOR: [u8; 4] = [15, 23, 42, 102];

/// Pixels moved per keyboard nudge.
pub const KEY_MOVE_STEP: u32 = 1;

/// Delay before a held key starts repeating.
pub const KEY_REPEAT_DELAY_MS: u64 = 250;

/// Interval between repeated nudges while a key stays held.
pub const KEY_REPEAT_INTERVAL_MS: u64 = 50;
