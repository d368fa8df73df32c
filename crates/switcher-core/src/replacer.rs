use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use switcher_common::SwitchError;

/// The naming-convention variant a style set can be switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dark,
    Light,
    Elevated,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Dark, Mode::Light, Mode::Elevated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dark => "dark",
            Mode::Light => "light",
            Mode::Elevated => "elevated",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Mode::Dark),
            "light" => Ok(Mode::Light),
            "elevated" => Ok(Mode::Elevated),
            _ => Err(SwitchError::UnknownMode(s.to_string())),
        }
    }
}

/// A mode keyword together with the capitalized form it takes in style names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeToken {
    pub token: &'static str,
    pub capitalized: &'static str,
}

/// Keywords in match priority order.
pub const MODE_TOKENS: &[ModeToken] = &[
    ModeToken {
        token: "dark",
        capitalized: "Dark",
    },
    ModeToken {
        token: "light",
        capitalized: "Light",
    },
    ModeToken {
        token: "elevated",
        capitalized: "Elevated",
    },
];

/// Rewrites the mode keyword embedded in a style name.
///
/// Keywords are tried in table order; for each keyword the lowercase form is
/// looked for before the capitalized one. The first hit is replaced (only its
/// first occurrence in the text) and the scan stops, so a name carrying two
/// keywords only ever has the higher-priority one rewritten.
#[derive(Debug, Clone)]
pub struct Replacer {
    tokens: Vec<ModeToken>,
}

impl Replacer {
    pub fn new(tokens: &[ModeToken]) -> Self {
        Self {
            tokens: tokens.to_vec(),
        }
    }

    /// Substitute the first known keyword in `name` with `target`, keeping the
    /// keyword's case form. Names without any keyword come back unchanged.
    pub fn replace(&self, name: &str, target: &str) -> String {
        for token in &self.tokens {
            if name.contains(token.token) {
                return name.replacen(token.token, &target.to_lowercase(), 1);
            }
            if name.contains(token.capitalized) {
                return name.replacen(token.capitalized, &capitalize(target), 1);
            }
        }
        name.to_string()
    }

    pub fn replace_mode(&self, name: &str, mode: Mode) -> String {
        self.replace(name, mode.as_str())
    }
}

impl Default for Replacer {
    fn default() -> Self {
        Self::new(MODE_TOKENS)
    }
}

/// Uppercase the first character and lowercase the rest ("dARK" -> "Dark").
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
