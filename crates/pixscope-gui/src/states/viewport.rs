/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Size of the displayed image in pixels.
    pub image_size: Option<[usize; 2]>,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    /// Fit the image to the panel on the next frame.
    pub fit_pending: bool,
    /// Zoom or pan changed this frame; the lens must follow.
    pub moved: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            image_size: None,
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            fit_pending: false,
            moved: false,
        }
    }
}

impl ViewportState {
    pub fn show(&mut self, texture: egui::TextureHandle, size: [usize; 2]) {
        self.texture = Some(texture);
        self.image_size = Some(size);
        self.fit_pending = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
