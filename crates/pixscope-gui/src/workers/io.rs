use std::sync::mpsc;
use std::time::Instant;

use pixscope_core::config::UploadConfig;
use pixscope_core::loader::load_image;
use pixscope_core::session::{Generation, RasterJob};
use tracing::debug;

use crate::messages::{LoadRequest, WorkerResult};

use super::send;

pub(super) fn handle_load(
    generation: Generation,
    request: LoadRequest,
    upload: &UploadConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = request
        .into_pending()
        .and_then(|file| load_image(&file, upload));

    debug!(
        ?generation,
        ok = result.is_ok(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "load finished"
    );
    send(tx, ctx, WorkerResult::Loaded { generation, result });
}

pub(super) fn handle_build_raster(
    job: &RasterJob,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = job.run();

    debug!(
        generation = ?job.generation,
        resource = %job.view.id(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "raster decode finished"
    );
    send(
        tx,
        ctx,
        WorkerResult::RasterReady {
            generation: job.generation,
            result,
        },
    );
}
