use image::RgbaImage;
use tracing::{debug, info};

use crate::error::Result;
use crate::loader::{LoadOutput, LoadedImage};
use crate::resource::{ResourceSlot, ResourceView};
use crate::sampler::{PixelSampler, Raster};

/// Identity of one load attempt. Results carrying an older generation are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Work order for decoding the sampling raster of a freshly loaded image.
#[derive(Clone, Debug)]
pub struct RasterJob {
    pub generation: Generation,
    pub view: ResourceView,
    pub width: u32,
    pub height: u32,
}

impl RasterJob {
    /// Decode the raster. Runs off the UI thread.
    pub fn run(&self) -> Result<Raster> {
        Raster::decode(&self.view, self.width, self.height)
    }
}

/// What applying a load result did.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Superseded by a newer load or a clear; nothing changed.
    Stale,
    Loaded {
        /// Preview pixels to put on screen.
        preview: RgbaImage,
        /// Raster decode to schedule next.
        raster_job: RasterJob,
    },
    Failed {
        message: String,
    },
}

/// State of the single image being inspected.
///
/// Owns the active display resource, the loaded image metadata, the last
/// error and the sampling engine. Asynchronous work is started with
/// [`begin_load`](Self::begin_load) and its result fed back with the
/// generation it was started for; anything superseded in between is dropped.
#[derive(Debug, Default)]
pub struct InspectorSession {
    generation: Generation,
    loading: bool,
    image: Option<LoadedImage>,
    error: Option<String>,
    resources: ResourceSlot,
    sampler: PixelSampler,
}

impl InspectorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load attempt. The current image stays visible until it completes.
    pub fn begin_load(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Apply the result of the load started as `generation`.
    pub fn finish_load(
        &mut self,
        generation: Generation,
        result: Result<LoadOutput>,
    ) -> LoadOutcome {
        if generation != self.generation {
            // Dropping `result` releases its resource; it was never active.
            debug!(?generation, current = ?self.generation, "dropping stale load");
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(output) => {
                let LoadOutput {
                    image,
                    resource,
                    preview,
                } = output;

                let view = resource.view();
                if let Some(released) = self.resources.replace(resource) {
                    debug!(%released, "previous display resource released");
                }
                self.sampler.begin(generation);

                let raster_job = RasterJob {
                    generation,
                    view,
                    width: image.width,
                    height: image.height,
                };
                self.image = Some(image);
                self.error = None;

                LoadOutcome::Loaded {
                    preview,
                    raster_job,
                }
            }
            Err(e) => {
                let message = e.to_string();
                info!("load failed: {message}");
                self.drop_image();
                self.error = Some(message.clone());
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Apply a finished raster decode. Returns `false` if it was stale.
    pub fn finish_raster(&mut self, generation: Generation, result: Result<Raster>) -> bool {
        if generation != self.generation {
            debug!(?generation, "dropping raster for superseded image");
            return false;
        }
        self.sampler.complete(generation, result)
    }

    /// Remove the image and error, and invalidate anything in flight.
    pub fn clear(&mut self) {
        self.generation = self.generation.next();
        self.loading = false;
        self.error = None;
        self.drop_image();
    }

    fn drop_image(&mut self) {
        self.image = None;
        if let Some(released) = self.resources.release() {
            debug!(%released, "display resource released on clear");
        }
        self.sampler.reset();
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn resources(&self) -> &ResourceSlot {
        &self.resources
    }

    pub fn sampler(&self) -> &PixelSampler {
        &self.sampler
    }
}
