use pixscope_core::config::KeyboardConfig;
use pixscope_core::geometry::PixelCoord;
use pixscope_core::input::{FrameCoalescer, KeyboardNudge};
use pixscope_core::lens::{LensFrame, LensViewState};

use crate::convert::rgba_to_color_image;

/// Lens overlay and the input feeding it.
pub struct LensState {
    pub view: LensViewState,
    pub texture: Option<egui::TextureHandle>,
    /// Latest pointer position over the viewer, in screen space.
    pub pointer: FrameCoalescer<egui::Pos2>,
    pub nudge: KeyboardNudge,
    /// Pixel the lens is centred on; keyboard nudges start from here.
    pub focus: Option<PixelCoord>,
    /// Pointer was over the viewer last frame.
    pub pointer_inside: bool,
    /// Re-run the lens at the current pointer even without movement.
    pub refresh: bool,
}

impl LensState {
    pub fn new(keyboard: &KeyboardConfig) -> Self {
        Self {
            view: LensViewState::default(),
            texture: None,
            pointer: FrameCoalescer::new(),
            nudge: KeyboardNudge::new(keyboard),
            focus: None,
            pointer_inside: false,
            refresh: false,
        }
    }

    /// Hide now and forget any move waiting for the next pass.
    pub fn hide(&mut self) {
        self.view.hide();
        self.pointer.cancel();
    }

    /// Forget everything tied to the current image.
    pub fn reset(&mut self) {
        self.hide();
        self.focus = None;
        self.refresh = false;
        self.nudge.set_enabled(false);
    }

    pub fn show(&mut self, ctx: &egui::Context, frame: LensFrame) {
        let image = rgba_to_color_image(&frame.image);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("lens", image, egui::TextureOptions::NEAREST));
            }
        }
        self.focus = frame.state.pixel.as_ref().map(|p| p.coord());
        self.view = frame.state;
    }
}
