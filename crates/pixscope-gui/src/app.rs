use std::sync::mpsc;

use pixscope_core::config::InspectorConfig;
use pixscope_core::error::Result;
use pixscope_core::format::format_bytes;
use pixscope_core::loader::LoadOutput;
use pixscope_core::session::{Generation, InspectorSession, LoadOutcome};

use crate::convert::rgba_to_color_image;
use crate::messages::{LoadRequest, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{LensState, UIState, ViewportState};
use crate::workers;

pub struct PixscopeApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: InspectorConfig,
    pub session: InspectorSession,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub lens: LensState,
}

impl PixscopeApp {
    pub fn new(ctx: &egui::Context, config: InspectorConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());
        let lens = LensState::new(&config.keyboard);

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            config,
            session: InspectorSession::new(),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            lens,
        }
    }

    /// Start loading a file. Whatever is on screen stays until it finishes.
    pub fn load(&mut self, request: LoadRequest) {
        let generation = self.session.begin_load();
        self.ui_state.add_log(format!("Opening {}", request.name()));
        self.send_command(WorkerCommand::Load {
            generation,
            request,
            upload: self.config.upload.clone(),
        });
    }

    pub fn clear(&mut self) {
        let had_image = self.session.image().is_some();
        self.session.clear();
        self.viewport.clear();
        self.lens.reset();
        if had_image {
            self.ui_state.add_log("Image cleared".into());
        }
    }

    /// Ask the native picker for a file off the UI thread.
    pub fn pick_file(&self, ctx: &egui::Context) {
        let result_tx = self.result_tx.clone();
        let ctx = ctx.clone();
        let extensions = self.config.upload.extensions();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", extensions.as_slice())
                .pick_file()
            {
                workers::send(&result_tx, &ctx, WorkerResult::FilePicked { path });
            }
        });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Loaded { generation, result } => {
                    self.apply_load(ctx, generation, result);
                }
                WorkerResult::RasterReady { generation, result } => {
                    if self.session.finish_raster(generation, result) {
                        if self.session.sampler().is_ready() {
                            self.lens.refresh = true;
                            self.ui_state.add_log("Lens ready".into());
                        } else {
                            self.ui_state
                                .add_log("Lens unavailable: pixels could not be sampled".into());
                        }
                    }
                }
                WorkerResult::FilePicked { path } => {
                    self.load(LoadRequest::Path(path));
                }
            }
        }
    }

    fn apply_load(
        &mut self,
        ctx: &egui::Context,
        generation: Generation,
        result: Result<LoadOutput>,
    ) {
        match self.session.finish_load(generation, result) {
            LoadOutcome::Stale => {}
            LoadOutcome::Loaded {
                preview,
                raster_job,
            } => {
                let size = [preview.width() as usize, preview.height() as usize];
                let texture = ctx.load_texture(
                    "viewport",
                    rgba_to_color_image(&preview),
                    egui::TextureOptions::NEAREST,
                );
                self.viewport.show(texture, size);
                self.lens.reset();

                if let Some(image) = self.session.image() {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {})",
                        image.file_name,
                        image.original_width,
                        image.original_height,
                        format_bytes(image.original_size)
                    ));
                    if image.scaled {
                        self.ui_state.add_log(format!(
                            "Scaled to {}x{} ({})",
                            image.width,
                            image.height,
                            format_bytes(image.display_size)
                        ));
                    }
                }

                self.send_command(WorkerCommand::BuildRaster { job: raster_job });
            }
            LoadOutcome::Failed { message } => {
                self.viewport.clear();
                self.lens.reset();
                self.ui_state.add_log(format!("ERROR: {message}"));
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for PixscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::drop_zone::show(ctx, self);
        panels::status::show(ctx, self);
        panels::info::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About Pixscope")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Pixscope");
                        ui.label("Pixel color inspector");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
