use image::RgbaImage;
use pixscope_core::geometry::{Point, Rect};
use pixscope_core::input::NudgeKey;

/// Convert straight-alpha RGBA pixels to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

pub fn to_pos2(point: Point) -> egui::Pos2 {
    egui::pos2(point.x, point.y)
}

/// Keys that move the lens focus.
pub fn nudge_key(key: egui::Key) -> Option<NudgeKey> {
    match key {
        egui::Key::ArrowUp => Some(NudgeKey::ArrowUp),
        egui::Key::ArrowDown => Some(NudgeKey::ArrowDown),
        egui::Key::ArrowLeft => Some(NudgeKey::ArrowLeft),
        egui::Key::ArrowRight => Some(NudgeKey::ArrowRight),
        egui::Key::W => Some(NudgeKey::W),
        egui::Key::A => Some(NudgeKey::A),
        egui::Key::S => Some(NudgeKey::S),
        egui::Key::D => Some(NudgeKey::D),
        _ => None,
    }
}

/// Ctrl, Alt and Command chords are left to the menus.
pub fn is_chord(modifiers: &egui::Modifiers) -> bool {
    modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd
}
