//! A file-backed stand-in for the design tool host.

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use switcher_common::{PaintStyle, SwitchError};
use switcher_core::Node;
use switcher_library::{ClientStorage, StyleImporter};
use switcher_plugin::{Document, HostUi, PanelSize};
use tokio::sync::Mutex;
use tracing::debug;

/// Document snapshot: the local paint styles plus the selected node trees
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    #[serde(default)]
    pub local_styles: Vec<PaintStyle>,
    #[serde(default)]
    pub selection: Vec<Node>,
}

impl DocumentFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid document {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("Failed to write document {:?}", path))
    }
}

impl Document for DocumentFile {
    fn local_paint_styles(&self) -> Vec<PaintStyle> {
        self.local_styles.clone()
    }

    fn selection_mut(&mut self) -> &mut [Node] {
        &mut self.selection
    }
}

/// Client storage persisted as one JSON object, rewritten on every `set`
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .with_context(|| format!("Invalid storage file {:?}", path))?,
            Ok(_) => BTreeMap::new(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No storage file at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read storage {:?}", path))
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }
}

#[async_trait]
impl ClientStorage for FileStorage {
    async fn get(&self, key: &str) -> switcher_common::Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> switcher_common::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&*entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

/// Team library published as a JSON array of paint styles, addressed by key
#[derive(Debug, Default)]
pub struct LibraryFile {
    styles: HashMap<String, PaintStyle>,
}

impl LibraryFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library {:?}", path))?;
        let styles: Vec<PaintStyle> =
            serde_json::from_str(&raw).with_context(|| format!("Invalid library {:?}", path))?;
        Ok(Self::from_styles(styles))
    }

    pub fn from_styles(styles: Vec<PaintStyle>) -> Self {
        Self {
            styles: styles.into_iter().map(|style| (style.key.clone(), style)).collect(),
        }
    }
}

#[async_trait]
impl StyleImporter for LibraryFile {
    async fn import_style_by_key(&self, key: &str) -> switcher_common::Result<PaintStyle> {
        self.styles.get(key).cloned().ok_or_else(|| SwitchError::Import {
            key: key.to_string(),
            reason: "not published in the library".to_string(),
        })
    }
}

/// Prints notifications to the terminal
pub struct ConsoleUi;

impl HostUi for ConsoleUi {
    fn notify(&self, message: &str, timeout: Option<Duration>) {
        match timeout {
            Some(timeout) => println!(
                "{} {} {}",
                "●".cyan(),
                message,
                format!("({}ms)", timeout.as_millis()).dimmed()
            ),
            None => println!("{} {}", "●".yellow(), message),
        }
    }

    fn show_ui(&self, panel: PanelSize) {
        println!(
            "{} switcher panel {}x{}: send `message dark` or `message light`",
            "▣".blue(),
            panel.width,
            panel.height
        );
    }

    fn close_plugin(&self) {
        println!("{}", "Plugin closed".dimmed());
    }
}
