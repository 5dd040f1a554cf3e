use std::collections::VecDeque;
use std::sync::mpsc;

use tracing::debug;

use crate::messages::{WorkerCommand, WorkerResult};

use super::io;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("pixscope-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

/// Runs one command at a time. Commands queued behind a newer load are
/// skipped, since the session would drop their results anyway.
fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut queue = VecDeque::new();

    loop {
        if queue.is_empty() {
            match cmd_rx.recv() {
                Ok(cmd) => queue.push_back(cmd),
                Err(_) => break,
            }
        }
        queue.extend(cmd_rx.try_iter());

        let newest_load = queue
            .iter()
            .filter(|cmd| matches!(cmd, WorkerCommand::Load { .. }))
            .map(WorkerCommand::generation)
            .max();

        let Some(cmd) = queue.pop_front() else {
            continue;
        };
        if newest_load.is_some_and(|newest| cmd.generation() < newest) {
            debug!(generation = ?cmd.generation(), "skipping superseded command");
            continue;
        }

        match cmd {
            WorkerCommand::Load {
                generation,
                request,
                upload,
            } => {
                io::handle_load(generation, request, &upload, &tx, &ctx);
            }
            WorkerCommand::BuildRaster { job } => {
                io::handle_build_raster(&job, &tx, &ctx);
            }
        }
    }

    debug!("worker channel closed");
}
