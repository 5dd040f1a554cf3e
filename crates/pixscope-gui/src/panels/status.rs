use crate::app::PixscopeApp;

pub fn show(ctx: &egui::Context, app: &mut PixscopeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        ui.horizontal(|ui| {
            if app.session.is_loading() {
                ui.spinner();
                ui.label("Loading...");
            } else if let Some(error) = app.session.error() {
                ui.colored_label(ui.visuals().error_fg_color, error);
            } else {
                // Same height as the spinner row, so the layout does not jump.
                ui.label("");
            }
        });

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(size) = app.viewport.image_size {
                ui.label(format!("{}x{}", size[0], size[1]));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", app.viewport.zoom * 100.0));
                ui.separator();
            }
            match app.lens.view.pixel.as_ref().filter(|_| app.lens.view.visible) {
                Some(pixel) => ui.label(format!("({}, {}) {}", pixel.x, pixel.y, pixel.hex)),
                None => ui.label("Lens: off"),
            };
        });

        ui.add_space(2.0);
    });
}
