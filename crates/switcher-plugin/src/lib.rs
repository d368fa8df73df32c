mod command;
mod config;
mod host;
mod plugin;

pub use command::{Command, UiMessage};
pub use config::{PanelSize, PluginConfig};
pub use host::{Document, HostUi};
pub use plugin::{CommandOutcome, PassReport, ThemeSwitcherPlugin};
