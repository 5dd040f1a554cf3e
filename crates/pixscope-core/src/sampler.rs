use image::RgbaImage;
use ndarray::{s, Array3, ArrayView3};
use tracing::{debug, warn};

use crate::error::{PixscopeError, Result};
use crate::format::{format_rgba, to_hex};
use crate::geometry::PixelCoord;
use crate::lens::CropRect;
use crate::resource::ResourceView;
use crate::session::Generation;

/// Color of one image pixel, with its display strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub rgba: [u8; 4],
    /// `#RRGGBB`
    pub hex: String,
    /// `rgba(r, g, b, a)`
    pub rgba_text: String,
}

impl PixelSample {
    pub fn new(coord: PixelCoord, rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self {
            x: coord.x,
            y: coord.y,
            rgba,
            hex: to_hex(r, g, b),
            rgba_text: format_rgba(r, g, b, a),
        }
    }

    pub fn coord(&self) -> PixelCoord {
        PixelCoord::new(self.x, self.y)
    }
}

/// Off-screen RGBA pixels of the displayed image.
///
/// Shape is `(height, width, 4)`, row-major, 8 bits per channel.
#[derive(Clone, Debug)]
pub struct Raster {
    pixels: Array3<u8>,
}

impl Raster {
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        let pixels = Array3::from_shape_vec((h as usize, w as usize, 4), image.into_raw())
            .map_err(|e| PixscopeError::RenderSurface(format!("raster shape mismatch: {e}")))?;
        Ok(Self { pixels })
    }

    /// Decode a display resource, requiring it to be exactly `width`×`height`.
    pub fn decode(view: &ResourceView, width: u32, height: u32) -> Result<Self> {
        let decoded =
            image::load_from_memory_with_format(view.bytes(), view.media_type().image_format())
                .map_err(PixscopeError::Decode)?;

        if decoded.width() != width || decoded.height() != height {
            return Err(PixscopeError::RenderSurface(format!(
                "decoded {}x{} but the display is {width}x{height}",
                decoded.width(),
                decoded.height()
            )));
        }

        Self::from_rgba(decoded.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    pub fn contains(&self, coord: PixelCoord) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }

    /// RGBA of a single pixel, or `None` outside the raster.
    pub fn rgba_at(&self, coord: PixelCoord) -> Option<[u8; 4]> {
        if !self.contains(coord) {
            return None;
        }
        let px = self.pixels.slice(s![coord.y as usize, coord.x as usize, ..]);
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn sample_at(&self, coord: PixelCoord) -> Option<PixelSample> {
        self.rgba_at(coord).map(|rgba| PixelSample::new(coord, rgba))
    }

    /// Borrow the square region described by `crop`.
    ///
    /// `crop` must lie inside the raster (see `lens::crop_rect`).
    pub fn crop_view(&self, crop: &CropRect) -> ArrayView3<'_, u8> {
        let x = crop.x as usize;
        let y = crop.y as usize;
        let size = crop.size as usize;
        self.pixels.slice(s![y..y + size, x..x + size, ..])
    }
}

/// Lifecycle of the sampling buffer for one image.
#[derive(Debug, Default)]
pub enum SamplerState {
    #[default]
    Idle,
    Decoding {
        generation: Generation,
    },
    Ready {
        generation: Generation,
        raster: Raster,
    },
    Failed {
        generation: Generation,
    },
}

/// Owns the raster of the current image and answers pixel queries.
///
/// Sampling is only possible in the `Ready` state; results for any other
/// generation than the one being decoded are dropped.
#[derive(Debug, Default)]
pub struct PixelSampler {
    state: SamplerState,
}

impl PixelSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current raster and wait for `generation` to decode.
    pub fn begin(&mut self, generation: Generation) {
        self.state = SamplerState::Decoding { generation };
    }

    /// Apply a finished decode. Returns `false` when the result was stale.
    pub fn complete(&mut self, generation: Generation, result: Result<Raster>) -> bool {
        match self.state {
            SamplerState::Decoding { generation: pending } if pending == generation => {}
            _ => {
                debug!(?generation, "dropping stale raster");
                return false;
            }
        }

        self.state = match result {
            Ok(raster) => {
                debug!(
                    ?generation,
                    width = raster.width(),
                    height = raster.height(),
                    "raster ready"
                );
                SamplerState::Ready { generation, raster }
            }
            Err(e) => {
                warn!(?generation, "raster decode failed, lens unavailable: {e}");
                SamplerState::Failed { generation }
            }
        };
        true
    }

    pub fn reset(&mut self) {
        self.state = SamplerState::Idle;
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SamplerState::Ready { .. })
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self.state, SamplerState::Decoding { .. })
    }

    pub fn raster(&self) -> Option<&Raster> {
        match &self.state {
            SamplerState::Ready { raster, .. } => Some(raster),
            _ => None,
        }
    }

    /// Sample one pixel; `None` while not ready or outside the raster.
    pub fn sample_at(&self, coord: PixelCoord) -> Option<PixelSample> {
        self.raster()?.sample_at(coord)
    }
}
