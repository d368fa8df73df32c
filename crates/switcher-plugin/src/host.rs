use crate::config::PanelSize;
use std::time::Duration;
use switcher_common::PaintStyle;
use switcher_core::Node;

/// The open document, as far as the switcher needs it
pub trait Document: Send {
    fn local_paint_styles(&self) -> Vec<PaintStyle>;

    /// Top-level selected nodes of the current page
    fn selection_mut(&mut self) -> &mut [Node];
}

/// Notification and panel surface of the host
pub trait HostUi: Send + Sync {
    fn notify(&self, message: &str, timeout: Option<Duration>);
    fn show_ui(&self, panel: PanelSize);
    fn close_plugin(&self);
}
