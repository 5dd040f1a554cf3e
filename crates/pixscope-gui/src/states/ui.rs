/// Keep the activity log from growing without bound.
const MAX_LOG_LINES: usize = 200;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Activity log, oldest first.
    pub log_messages: Vec<String>,

    /// Files are being dragged over the window.
    pub drop_hover: bool,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}
