pub mod drop_zone;
pub mod info;
pub mod menu_bar;
pub mod status;
pub mod viewport;

const CHECKER_CELL: f32 = 10.0;

/// Light/dark checkerboard inside `rect`, limited to what `clip` shows.
pub(crate) fn paint_checkerboard(painter: &egui::Painter, rect: egui::Rect, clip: egui::Rect) {
    let visible = rect.intersect(clip);
    if !visible.is_positive() {
        return;
    }

    painter.rect_filled(visible, 0.0, egui::Color32::from_gray(235));

    let dark = egui::Color32::from_gray(200);
    let first_col = ((visible.min.x - rect.min.x) / CHECKER_CELL).floor() as i64;
    let first_row = ((visible.min.y - rect.min.y) / CHECKER_CELL).floor() as i64;
    let last_col = ((visible.max.x - rect.min.x) / CHECKER_CELL).ceil() as i64;
    let last_row = ((visible.max.y - rect.min.y) / CHECKER_CELL).ceil() as i64;

    for row in first_row..last_row {
        for col in first_col..last_col {
            if (row + col) % 2 == 0 {
                continue;
            }
            let min = rect.min + egui::vec2(col as f32 * CHECKER_CELL, row as f32 * CHECKER_CELL);
            let cell = egui::Rect::from_min_size(min, egui::vec2(CHECKER_CELL, CHECKER_CELL));
            painter.rect_filled(cell.intersect(visible), 0.0, dark);
        }
    }
}
