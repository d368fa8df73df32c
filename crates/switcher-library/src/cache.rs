use crate::host::{ClientStorage, StyleImporter};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use switcher_common::{PaintStyle, Result, StyleRecord};
use tracing::{debug, info, warn};

pub const DEFAULT_NAMESPACE: &str = "themeSwitcher";

/// Storage keys for the two cached records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// JSON array of team library style keys
    pub style_keys: String,
    /// JSON array of `{"id", "name"}` objects for the last successful load
    pub style_snapshot: String,
}

impl StorageKeys {
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            style_keys: format!("{}.teamColorKeys", namespace),
            style_snapshot: format!("{}.teamColorStyles", namespace),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}

/// Persists team library styles so they can be applied from documents that
/// cannot enumerate the library directly.
///
/// The key list is the source of truth; the snapshot is refreshed by
/// [`LibraryCache::load_styles`] and may lag behind it until the next load.
pub struct LibraryCache {
    storage: Arc<dyn ClientStorage>,
    importer: Arc<dyn StyleImporter>,
    keys: StorageKeys,
}

impl LibraryCache {
    pub fn new(storage: Arc<dyn ClientStorage>, importer: Arc<dyn StyleImporter>) -> Self {
        Self {
            storage,
            importer,
            keys: StorageKeys::default(),
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Store the import keys of `local_styles`. Returns false, without
    /// touching storage, when there is nothing to store.
    pub async fn save_identifiers(&self, local_styles: &[PaintStyle]) -> Result<bool> {
        if local_styles.is_empty() {
            debug!("No local paint styles, nothing saved");
            return Ok(false);
        }

        let style_keys: Vec<&str> = local_styles.iter().map(|style| style.key.as_str()).collect();
        self.storage
            .set(&self.keys.style_keys, serde_json::to_string(&style_keys)?)
            .await?;
        info!("Saved {} team style keys", style_keys.len());
        Ok(true)
    }

    /// Import every saved key and refresh the snapshot with whatever resolved.
    ///
    /// Keys that no longer import are dropped; the result keeps the order of
    /// the saved key list.
    pub async fn load_styles(&self) -> Result<Vec<PaintStyle>> {
        let Some(style_keys) = self.read_json::<Vec<String>>(&self.keys.style_keys).await? else {
            info!("The team colors were not found. Run 'save' on the library file before switching styles.");
            return Ok(Vec::new());
        };

        info!("Start loading {} keys", style_keys.len());
        let results = join_all(
            style_keys
                .iter()
                .map(|key| self.importer.import_style_by_key(key)),
        )
        .await;

        let mut styles = Vec::with_capacity(results.len());
        for (key, result) in style_keys.iter().zip(results) {
            match result {
                Ok(style) => styles.push(style),
                Err(err) => warn!("Skipping team style {}: {}", key, err),
            }
        }

        let snapshot: Vec<StyleRecord> = styles.iter().map(StyleRecord::from).collect();
        self.storage
            .set(&self.keys.style_snapshot, serde_json::to_string(&snapshot)?)
            .await?;
        info!("Loaded {} of {} team styles", styles.len(), style_keys.len());

        Ok(styles)
    }

    /// The snapshot written by the last [`LibraryCache::load_styles`]
    pub async fn load_styles_from_storage(&self) -> Result<Vec<StyleRecord>> {
        match self.read_json::<Vec<StyleRecord>>(&self.keys.style_snapshot).await? {
            Some(records) => {
                debug!("Loaded {} team styles from storage", records.len());
                Ok(records)
            }
            None => {
                info!("The team colors were not found. Run 'save' on the library file before switching styles.");
                Ok(Vec::new())
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.storage.get(key).await? {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }
}
