mod lens;
mod ui;
mod viewport;

pub use lens::LensState;
pub use ui::UIState;
pub use viewport::ViewportState;
