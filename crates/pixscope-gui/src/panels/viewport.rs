use std::time::Instant;

use pixscope_core::input::{center_pixel, pixel_to_point, Nudge};
use pixscope_core::lens::{compose, inspect_pointer, LensUpdate};

use crate::app::PixscopeApp;
use crate::convert::{is_chord, nudge_key, to_point, to_pos2, to_rect};
use crate::panels::paint_checkerboard;

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 64.0;

const FULL_UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

pub fn show(ctx: &egui::Context, app: &mut PixscopeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        let (Some(texture_id), Some(size)) = (texture_id, app.viewport.image_size) else {
            show_placeholder(ui, app);
            return;
        };
        let image_size = egui::vec2(size[0] as f32, size[1] as f32);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        app.viewport.moved = false;
        if app.viewport.fit_pending || response.double_clicked() {
            fit_to_rect(app, image_size, rect);
        }
        handle_zoom(ui, &response, app, rect);
        handle_pan(ui, &response, app);

        let img_rect = compute_img_rect(rect, image_size, app);
        let painter = ui.painter_at(rect);
        paint_checkerboard(&painter, img_rect, rect);
        painter.image(texture_id, img_rect, FULL_UV, egui::Color32::WHITE);

        track_pointer(ui, app, rect, img_rect);
        handle_keyboard(ui, app, rect, img_rect);
        draw_lens(&painter, app, rect);
        clear_button(ui, app, rect);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn handle_zoom(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut PixscopeApp,
    rect: egui::Rect,
) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let zoom_factor = (scroll_delta * 0.005).exp();
    let new_zoom = (app.viewport.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);

    // Zoom toward mouse cursor
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        let center = rect.center().to_vec2() + app.viewport.pan_offset;
        let mouse_rel = mouse_pos.to_vec2() - center;
        let scale_change = new_zoom / app.viewport.zoom;
        app.viewport.pan_offset += mouse_rel * (1.0 - scale_change);
    }

    app.viewport.zoom = new_zoom;
    app.viewport.moved = true;
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut PixscopeApp) {
    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        app.viewport.pan_offset += response.drag_delta();
        app.viewport.moved = true;
    }
}

fn compute_img_rect(rect: egui::Rect, image_size: egui::Vec2, app: &PixscopeApp) -> egui::Rect {
    let scaled = image_size * app.viewport.zoom;
    let center = rect.center() + app.viewport.pan_offset;
    egui::Rect::from_center_size(center, scaled)
}

/// Centre the image and shrink it to the panel. Small images stay at 100%.
fn fit_to_rect(app: &mut PixscopeApp, image_size: egui::Vec2, rect: egui::Rect) {
    let available = rect.size();
    let fit_x = available.x / image_size.x;
    let fit_y = available.y / image_size.y;
    app.viewport.zoom = fit_x.min(fit_y).min(1.0).clamp(MIN_ZOOM, MAX_ZOOM);
    app.viewport.pan_offset = egui::Vec2::ZERO;
    app.viewport.fit_pending = false;
    app.viewport.moved = true;
}

/// Coalesce this frame's pointer moves into at most one lens pass.
fn track_pointer(
    ui: &egui::Ui,
    app: &mut PixscopeApp,
    container: egui::Rect,
    img_rect: egui::Rect,
) {
    let (moves, hover, gone) = ui.input(|i| {
        let moves: Vec<egui::Pos2> = i
            .events
            .iter()
            .filter_map(|e| match e {
                egui::Event::PointerMoved(pos) => Some(*pos),
                _ => None,
            })
            .collect();
        let gone = i
            .events
            .iter()
            .any(|e| matches!(e, egui::Event::PointerGone));
        (moves, i.pointer.hover_pos(), gone)
    });

    let inside = !gone && ui.rect_contains_pointer(container);
    if !inside {
        // Leaving hides right away; a move still waiting is dropped.
        if app.lens.pointer_inside {
            app.lens.pointer_inside = false;
            app.lens.hide();
        }
        return;
    }
    app.lens.pointer_inside = true;

    for pos in moves.into_iter().filter(|p| container.contains(*p)) {
        app.lens.pointer.push(pos);
    }
    let refresh = std::mem::take(&mut app.lens.refresh);
    if app.viewport.moved || refresh {
        if let Some(pos) = hover {
            app.lens.pointer.push(pos);
        }
    }

    let Some(pointer) = app.lens.pointer.take() else {
        return;
    };
    let update = inspect_pointer(
        to_point(pointer),
        to_rect(img_rect),
        to_rect(container),
        app.session.sampler(),
        &app.config.lens,
    );
    match update {
        LensUpdate::NotReady => {}
        LensUpdate::Hide => app.lens.view.hide(),
        LensUpdate::Show(frame) => app.lens.show(ui.ctx(), frame),
    }
}

/// Arrow keys and W/A/S/D move the lens focus while a sampleable image is shown.
fn handle_keyboard(
    ui: &egui::Ui,
    app: &mut PixscopeApp,
    container: egui::Rect,
    img_rect: egui::Rect,
) {
    app.lens.nudge.set_enabled(app.session.sampler().is_ready());
    if !app.lens.nudge.is_enabled() {
        return;
    }

    let now = Instant::now();
    let events = ui.input(|i| i.events.clone());
    let mut nudges: Vec<Nudge> = Vec::new();

    for event in &events {
        match event {
            egui::Event::Key {
                key,
                pressed,
                repeat,
                modifiers,
                ..
            } => {
                let Some(key) = nudge_key(*key) else {
                    continue;
                };
                if !*pressed {
                    app.lens.nudge.key_up(key);
                } else if !*repeat && !is_chord(modifiers) {
                    nudges.extend(app.lens.nudge.key_down(key, now));
                }
            }
            egui::Event::WindowFocused(false) => app.lens.nudge.set_enabled(false),
            _ => {}
        }
    }

    nudges.extend(app.lens.nudge.poll(now));
    if let Some(deadline) = app.lens.nudge.next_deadline() {
        ui.ctx()
            .request_repaint_after(deadline.saturating_duration_since(now));
    }

    // A keyboard-placed lens follows the image when it is zoomed or panned.
    let follow = app.viewport.moved && app.lens.view.visible && !app.lens.pointer_inside;
    if nudges.is_empty() && !follow {
        return;
    }

    let Some(raster) = app.session.sampler().raster() else {
        return;
    };
    let (width, height) = (raster.width(), raster.height());
    let start = app.lens.focus.unwrap_or_else(|| center_pixel(width, height));
    let focus = nudges
        .iter()
        .fold(start, |at, nudge| nudge.apply(at, width, height));

    let container = to_rect(container);
    let anchor = container.to_local(pixel_to_point(focus, to_rect(img_rect), width, height));
    if let Some(frame) = compose(raster, focus, anchor, container.size(), &app.config.lens) {
        app.lens.show(ui.ctx(), frame);
    }
}

fn draw_lens(painter: &egui::Painter, app: &PixscopeApp, container: egui::Rect) {
    let view = &app.lens.view;
    if !view.visible {
        return;
    }
    let (Some(texture), Some(pixel)) = (app.lens.texture.as_ref(), view.pixel.as_ref()) else {
        return;
    };

    let lens = &app.config.lens;
    let size = lens.size as f32;
    let origin = container.min + to_pos2(view.position).to_vec2();
    let lens_rect = egui::Rect::from_min_size(origin, egui::vec2(size, size));
    let info_rect =
        egui::Rect::from_min_size(lens_rect.left_bottom(), egui::vec2(size, lens.info_height));

    paint_checkerboard(painter, lens_rect, container);
    painter.image(texture.id(), lens_rect, FULL_UV, egui::Color32::WHITE);
    painter.rect_stroke(
        lens_rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(20)),
        egui::StrokeKind::Outside,
    );

    // Readout panel
    painter.rect_filled(info_rect, 0.0, egui::Color32::from_black_alpha(215));

    let pad = 8.0;
    let [r, g, b, a] = pixel.rgba;
    let swatch = egui::Rect::from_min_size(info_rect.min + egui::vec2(pad, pad), egui::vec2(22.0, 22.0));
    paint_checkerboard(painter, swatch, container);
    painter.rect_filled(swatch, 3.0, egui::Color32::from_rgba_unmultiplied(r, g, b, a));
    painter.rect_stroke(
        swatch,
        3.0,
        egui::Stroke::new(1.0, egui::Color32::from_white_alpha(120)),
        egui::StrokeKind::Inside,
    );

    let font = egui::FontId::monospace(12.0);
    let color = egui::Color32::from_gray(230);
    let lines = [
        format!("x {}  y {}", pixel.x, pixel.y),
        pixel.hex.clone(),
        pixel.rgba_text.clone(),
    ];
    for (i, line) in lines.iter().enumerate() {
        painter.text(
            egui::pos2(swatch.right() + pad, info_rect.top() + pad + i as f32 * 18.0),
            egui::Align2::LEFT_TOP,
            line,
            font.clone(),
            color,
        );
    }
}

fn clear_button(ui: &mut egui::Ui, app: &mut PixscopeApp, container: egui::Rect) {
    let rect = egui::Rect::from_min_size(
        container.right_top() + egui::vec2(-108.0, 8.0),
        egui::vec2(100.0, 24.0),
    );
    if ui.put(rect, egui::Button::new("Clear image")).clicked() {
        app.clear();
    }
}

fn show_placeholder(ui: &mut egui::Ui, app: &PixscopeApp) {
    let text = if app.session.is_loading() {
        "Loading..."
    } else {
        "Choose or drop an image to inspect its pixels"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
