use std::path::PathBuf;

use pixscope_core::config::UploadConfig;
use pixscope_core::error::Result;
use pixscope_core::loader::{LoadOutput, PendingFile};
use pixscope_core::sampler::Raster;
use pixscope_core::session::{Generation, RasterJob};

/// A file the user asked to open.
#[derive(Clone, Debug)]
pub enum LoadRequest {
    /// Picked or dropped from disk; metadata is read on the worker.
    Path(PathBuf),
    /// Already in memory.
    File(PendingFile),
}

impl LoadRequest {
    pub fn name(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::File(file) => file.name.clone(),
        }
    }

    pub fn into_pending(self) -> Result<PendingFile> {
        match self {
            Self::Path(path) => PendingFile::from_path(&path),
            Self::File(file) => Ok(file),
        }
    }
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Validate, decode and downscale a file for display.
    Load {
        generation: Generation,
        request: LoadRequest,
        upload: UploadConfig,
    },

    /// Decode the sampling raster of the image just shown.
    BuildRaster { job: RasterJob },
}

impl WorkerCommand {
    pub fn generation(&self) -> Generation {
        match self {
            Self::Load { generation, .. } => *generation,
            Self::BuildRaster { job } => job.generation,
        }
    }
}

/// Results sent back to the UI thread.
pub enum WorkerResult {
    Loaded {
        generation: Generation,
        result: Result<LoadOutput>,
    },
    RasterReady {
        generation: Generation,
        result: Result<Raster>,
    },
    /// The file picker returned a path.
    FilePicked { path: PathBuf },
}
