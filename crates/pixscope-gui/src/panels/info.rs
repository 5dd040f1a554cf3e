use pixscope_core::format::{format_bytes, format_count};
use pixscope_core::sampler::SamplerState;

use crate::app::PixscopeApp;

pub fn show(ctx: &egui::Context, app: &mut PixscopeApp) {
    egui::SidePanel::right("info")
        .resizable(true)
        .default_width(260.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(6.0);
                ui.strong("Image");
                ui.add_space(4.0);
                image_details(ui, app);

                ui.add_space(12.0);
                ui.separator();
                ui.strong("How to use");
                ui.add_space(4.0);
                ui.label("Move the pointer over the image to magnify it.");
                ui.label("Arrow keys or W/A/S/D move the lens one pixel at a time.");
                ui.label("Scroll to zoom, middle-drag to pan, double-click to fit.");
            });
        });
}

fn image_details(ui: &mut egui::Ui, app: &PixscopeApp) {
    let Some(image) = app.session.image() else {
        ui.weak("No image loaded");
        return;
    };

    let lens = match app.session.sampler().state() {
        SamplerState::Ready { .. } => "ready",
        SamplerState::Decoding { .. } => "preparing...",
        SamplerState::Failed { .. } => "unavailable",
        SamplerState::Idle => "-",
    };

    egui::Grid::new("image_info")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            row(ui, "File", &image.file_name);
            row(ui, "Type", &image.file_type);
            row(
                ui,
                "Original",
                &format!("{} x {}", image.original_width, image.original_height),
            );
            row(ui, "Display", &format!("{} x {}", image.width, image.height));
            row(ui, "Pixels", &format_count(image.pixel_count()));
            row(ui, "File size", &format_bytes(image.original_size));
            row(ui, "Display size", &format_bytes(image.display_size));
            row(ui, "Scaled", if image.scaled { "yes" } else { "no" });
            row(ui, "Lens", lens);
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(label);
    ui.add(egui::Label::new(value).truncate());
    ui.end_row();
}
