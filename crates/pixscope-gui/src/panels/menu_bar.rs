use crate::app::PixscopeApp;

pub fn show(ctx: &egui::Context, app: &mut PixscopeApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let can_open = !app.session.is_loading();
                if ui
                    .add_enabled(
                        can_open,
                        egui::Button::new("Open...")
                            .shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.pick_file(ctx);
                }

                let has_image = app.session.image().is_some();
                if ui
                    .add_enabled(has_image, egui::Button::new("Clear"))
                    .clicked()
                {
                    ui.close();
                    app.clear();
                }

                ui.separator();

                if ui
                    .add(
                        egui::Button::new("Quit")
                            .shortcut_text(ctx.format_shortcut(&quit_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });
    });

    // Keyboard shortcuts (consumed outside menus)
    if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) && !app.session.is_loading() {
        app.pick_file(ctx);
    }
    if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
