use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use switcher_common::SwitchError;

/// Menu commands the host launches the plugin with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenSwitcher,
    SaveFromTeamLibrary,
    LoadFromTeamLibrary,
}

impl Command {
    pub fn host_name(&self) -> &'static str {
        match self {
            Command::OpenSwitcher => "openSwitcher",
            Command::SaveFromTeamLibrary => "saveFromTeamLibrary",
            Command::LoadFromTeamLibrary => "loadFromTeamLibrary",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

impl FromStr for Command {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openSwitcher" => Ok(Command::OpenSwitcher),
            "saveFromTeamLibrary" => Ok(Command::SaveFromTeamLibrary),
            "loadFromTeamLibrary" => Ok(Command::LoadFromTeamLibrary),
            other => Err(SwitchError::UnknownCommand(other.to_string())),
        }
    }
}

/// Messages posted by the switcher panel, e.g. `{"type": "dark"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UiMessage {
    Dark,
    Light,
    Save,
    Load,
}

impl FromStr for UiMessage {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(UiMessage::Dark),
            "light" => Ok(UiMessage::Light),
            "save" => Ok(UiMessage::Save),
            "load" => Ok(UiMessage::Load),
            other => Err(SwitchError::UnknownCommand(other.to_string())),
        }
    }
}
