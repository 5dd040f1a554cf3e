use std::sync::Arc;

use anyhow::bail;
use pixscope_core::format::{format_bytes, format_types};
use pixscope_core::loader::PendingFile;

use crate::app::PixscopeApp;
use crate::messages::LoadRequest;

/// Upload bar: picker button, drop target and the accepted-files hint.
pub fn show(ctx: &egui::Context, app: &mut PixscopeApp) {
    handle_drops(ctx, app);

    let busy = app.session.is_loading();
    let hovering = app.ui_state.drop_hover;

    egui::TopBottomPanel::top("upload").show(ctx, |ui| {
        ui.add_space(4.0);

        let stroke = if hovering && !busy {
            egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        egui::Frame::group(ui.style())
            .stroke(stroke)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!busy, egui::Button::new("Choose image..."))
                        .clicked()
                    {
                        app.pick_file(ctx);
                    }

                    let prompt = if busy {
                        "Loading..."
                    } else if hovering {
                        "Release to open"
                    } else {
                        "or drop an image here"
                    };
                    ui.label(prompt);
                });

                let upload = &app.config.upload;
                ui.small(format!(
                    "{}, up to {}. Images larger than {} px are scaled down for display.",
                    format_types(&upload.supported_types),
                    format_bytes(upload.max_file_size_bytes),
                    upload.max_image_dimension
                ));
            });

        ui.add_space(4.0);
    });
}

fn handle_drops(ctx: &egui::Context, app: &mut PixscopeApp) {
    let (hovering, dropped) = ctx.input(|i| {
        (
            !i.raw.hovered_files.is_empty(),
            i.raw.dropped_files.clone(),
        )
    });
    app.ui_state.drop_hover = hovering;

    let Some(first) = dropped.first() else {
        return;
    };
    if app.session.is_loading() {
        app.ui_state
            .add_log("Still loading; drop ignored".into());
        return;
    }
    if dropped.len() > 1 {
        app.ui_state.add_log(format!(
            "{} files dropped; opening only the first",
            dropped.len()
        ));
    }

    match request_from_drop(first) {
        Ok(request) => app.load(request),
        Err(e) => app.ui_state.add_log(format!("ERROR: {e:#}")),
    }
}

fn request_from_drop(file: &egui::DroppedFile) -> anyhow::Result<LoadRequest> {
    if let Some(path) = &file.path {
        return Ok(LoadRequest::Path(path.clone()));
    }
    let Some(bytes) = &file.bytes else {
        bail!("dropped item '{}' carries no file data", file.name);
    };
    Ok(LoadRequest::File(PendingFile::from_bytes(
        file.name.clone(),
        &file.mime,
        Arc::clone(bytes),
    )))
}
