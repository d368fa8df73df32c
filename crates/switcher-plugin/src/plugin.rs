use crate::command::{Command, UiMessage};
use crate::config::PluginConfig;
use crate::host::{Document, HostUi};
use std::sync::Arc;
use switcher_common::Result;
use switcher_core::{Mode, Replacer, RewriteStats, StyleIndex, StyleRewriter};
use switcher_library::{ClientStorage, LibraryCache, StyleImporter};
use tracing::{debug, info, warn};

/// What the host should do with the plugin after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    KeepOpen,
    Closed,
}

/// Summary of one rewrite pass over the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub top_level_nodes: usize,
    pub failed_nodes: usize,
    pub stats: RewriteStats,
}

/// Entry point for everything the host dispatches to the switcher
pub struct ThemeSwitcherPlugin<D: Document> {
    document: D,
    cache: LibraryCache,
    ui: Arc<dyn HostUi>,
    config: PluginConfig,
    replacer: Replacer,
}

impl<D: Document> ThemeSwitcherPlugin<D> {
    pub fn new(
        document: D,
        storage: Arc<dyn ClientStorage>,
        importer: Arc<dyn StyleImporter>,
        ui: Arc<dyn HostUi>,
        config: PluginConfig,
    ) -> Self {
        let cache = LibraryCache::new(storage, importer).with_keys(config.storage_keys());
        Self {
            document,
            cache,
            ui,
            config,
            replacer: Replacer::default(),
        }
    }

    pub fn with_replacer(mut self, replacer: Replacer) -> Self {
        self.replacer = replacer;
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub async fn run_command(&mut self, command: Command) -> Result<CommandOutcome> {
        debug!("Running command {}", command);
        match command {
            Command::OpenSwitcher => {
                info!("Running theme switcher {}", env!("CARGO_PKG_VERSION"));
                self.ui.show_ui(self.config.panel);
                Ok(CommandOutcome::KeepOpen)
            }
            Command::SaveFromTeamLibrary => {
                self.save_team_styles().await?;
                self.ui
                    .notify("Saved team colors to storage", Some(self.config.notify_timeout));
                self.ui.close_plugin();
                Ok(CommandOutcome::Closed)
            }
            Command::LoadFromTeamLibrary => {
                self.cache.load_styles().await?;
                self.ui
                    .notify("Loaded team colors to storage", Some(self.config.notify_timeout));
                self.ui.close_plugin();
                Ok(CommandOutcome::Closed)
            }
        }
    }

    /// Handle a panel message. The panel stays open afterwards.
    pub async fn handle_message(&mut self, message: UiMessage) -> Result<()> {
        debug!("Handling panel message {:?}", message);
        match message {
            UiMessage::Dark => self.replace_all_styles(Mode::Dark).await.map(|_| ()),
            UiMessage::Light => self.replace_all_styles(Mode::Light).await.map(|_| ()),
            UiMessage::Save => self.save_team_styles().await.map(|_| ()),
            UiMessage::Load => self.cache.load_styles().await.map(|_| ()),
        }
    }

    /// Remember the document's local styles as the team library
    pub async fn save_team_styles(&self) -> Result<bool> {
        let local_styles = self.document.local_paint_styles();
        self.cache.save_identifiers(&local_styles).await
    }

    /// Switch every selected node, and everything under it, to `mode`.
    ///
    /// Each top-level node is rewritten on its own: an error there is shown
    /// as a notification and the pass moves on to the next node.
    pub async fn replace_all_styles(&mut self, mode: Mode) -> Result<PassReport> {
        let local_styles = self.document.local_paint_styles();
        let team_styles = self.cache.load_styles_from_storage().await?;
        debug!(
            "Building style index from {} local and {} team styles",
            local_styles.len(),
            team_styles.len()
        );
        let index = StyleIndex::from_sources(&local_styles, team_styles);
        let rewriter = StyleRewriter::new(&index, &self.replacer, mode);

        let mut report = PassReport::default();
        for node in self.document.selection_mut().iter_mut() {
            report.top_level_nodes += 1;
            match rewriter.rewrite(std::slice::from_mut(node)) {
                Ok(stats) => report.stats.merge(stats),
                Err(err) => {
                    warn!("Failed to switch {} to {}: {}", node.name, mode, err);
                    report.failed_nodes += 1;
                    self.ui.notify(&err.to_string(), None);
                }
            }
        }

        info!(
            "Switched {} bindings to {} across {} nodes ({} failed)",
            report.stats.bindings_rewritten, mode, report.top_level_nodes, report.failed_nodes
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSize;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use switcher_common::{PaintStyle, SwitchError};
    use switcher_core::{BindingKind, ContainerKind, LeafKind, ModeToken, Node};
    use switcher_library::MemoryStorage;

    struct TestDocument {
        local_styles: Vec<PaintStyle>,
        selection: Vec<Node>,
    }

    impl Document for TestDocument {
        fn local_paint_styles(&self) -> Vec<PaintStyle> {
            self.local_styles.clone()
        }

        fn selection_mut(&mut self) -> &mut [Node] {
            &mut self.selection
        }
    }

    #[derive(Default)]
    struct RecordingUi {
        notifications: Mutex<Vec<(String, Option<Duration>)>>,
        panels: Mutex<Vec<PanelSize>>,
        closed: Mutex<bool>,
    }

    impl HostUi for RecordingUi {
        fn notify(&self, message: &str, timeout: Option<Duration>) {
            self.notifications.lock().unwrap().push((message.to_string(), timeout));
        }

        fn show_ui(&self, panel: PanelSize) {
            self.panels.lock().unwrap().push(panel);
        }

        fn close_plugin(&self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct TableImporter(HashMap<String, PaintStyle>);

    #[async_trait]
    impl StyleImporter for TableImporter {
        async fn import_style_by_key(&self, key: &str) -> Result<PaintStyle> {
            self.0.get(key).cloned().ok_or_else(|| SwitchError::Import {
                key: key.to_string(),
                reason: "missing".to_string(),
            })
        }
    }

    fn paint(id: &str, name: &str) -> PaintStyle {
        PaintStyle {
            id: id.to_string(),
            key: format!("key-{id}"),
            name: name.to_string(),
        }
    }

    struct Fixture {
        plugin: ThemeSwitcherPlugin<TestDocument>,
        storage: Arc<MemoryStorage>,
        ui: Arc<RecordingUi>,
    }

    fn fixture(local_styles: Vec<PaintStyle>, selection: Vec<Node>, library: Vec<PaintStyle>) -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let ui = Arc::new(RecordingUi::default());
        let importer = TableImporter(library.into_iter().map(|s| (s.key.clone(), s)).collect());
        let plugin = ThemeSwitcherPlugin::new(
            TestDocument {
                local_styles,
                selection,
            },
            storage.clone(),
            Arc::new(importer),
            ui.clone(),
            PluginConfig::default(),
        );
        Fixture { plugin, storage, ui }
    }

    #[tokio::test]
    async fn test_open_switcher_shows_panel() {
        let mut fx = fixture(vec![], vec![], vec![]);
        let outcome = fx.plugin.run_command(Command::OpenSwitcher).await.unwrap();
        assert_eq!(outcome, CommandOutcome::KeepOpen);
        assert_eq!(*fx.ui.panels.lock().unwrap(), vec![PanelSize { width: 70, height: 70 }]);
        assert!(!*fx.ui.closed.lock().unwrap());
    }

    #[tokio::test]
    async fn test_save_command_with_no_styles_still_notifies() {
        let mut fx = fixture(vec![], vec![], vec![]);
        let outcome = fx.plugin.run_command(Command::SaveFromTeamLibrary).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Closed);
        assert!(fx.storage.snapshot().await.is_empty());
        let notifications = fx.ui.notifications.lock().unwrap();
        assert_eq!(
            notifications[0],
            ("Saved team colors to storage".to_string(), Some(Duration::from_millis(2000)))
        );
        assert!(*fx.ui.closed.lock().unwrap());
    }

    #[tokio::test]
    async fn test_local_styles_switch_light_and_back() {
        let local = vec![paint("S1", "Primary/Light"), paint("S2", "Primary/Dark")];
        let selection = vec![Node::container(
            "f",
            "Frame",
            ContainerKind::Frame,
            vec![Node::leaf("t", "Title", LeafKind::Text).with_binding(BindingKind::Fill, "S1")],
        )
        .with_binding(BindingKind::Background, "S1")];
        let mut fx = fixture(local, selection, vec![]);

        fx.plugin.handle_message(UiMessage::Dark).await.unwrap();
        let frame = &fx.plugin.document().selection[0];
        assert_eq!(frame.binding(BindingKind::Background), Some("S2"));
        assert_eq!(frame.find("t").unwrap().binding(BindingKind::Fill), Some("S2"));

        fx.plugin.handle_message(UiMessage::Light).await.unwrap();
        let frame = &fx.plugin.document().selection[0];
        assert_eq!(frame.binding(BindingKind::Background), Some("S1"));
        assert!(fx.ui.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_team_styles_come_from_cached_snapshot() {
        let library = vec![paint("T1", "Brand/Light"), paint("T2", "Brand/Dark")];

        // save in the library file
        let mut library_file = fixture(library.clone(), vec![], library.clone());
        library_file.plugin.run_command(Command::SaveFromTeamLibrary).await.unwrap();
        let saved = library_file.storage.snapshot().await;

        // load and switch in a consuming document sharing the same client storage
        let selection = vec![Node::leaf("r", "Box", LeafKind::Rectangle).with_binding(BindingKind::Stroke, "T1")];
        let storage = Arc::new(MemoryStorage::with_entries(saved));
        let ui = Arc::new(RecordingUi::default());
        let importer = TableImporter(library.into_iter().map(|s| (s.key.clone(), s)).collect());
        let mut plugin = ThemeSwitcherPlugin::new(
            TestDocument {
                local_styles: vec![],
                selection,
            },
            storage,
            Arc::new(importer),
            ui,
            PluginConfig::default(),
        );

        // nothing loaded yet: the snapshot is missing, binding stays
        let report = plugin.replace_all_styles(Mode::Dark).await.unwrap();
        assert_eq!(report.stats.bindings_rewritten, 0);

        plugin.handle_message(UiMessage::Load).await.unwrap();
        let report = plugin.replace_all_styles(Mode::Dark).await.unwrap();
        assert_eq!(report.stats.bindings_rewritten, 1);
        let doc = plugin.into_document();
        assert_eq!(doc.selection[0].binding(BindingKind::Stroke), Some("T2"));
    }

    #[tokio::test]
    async fn test_failed_top_level_node_does_not_stop_the_pass() {
        let local = vec![paint("S1", "Primary/Light"), paint("S2", "Primary/Dark")];
        let selection = vec![
            Node::leaf("a", "Locked", LeafKind::Rectangle)
                .with_binding(BindingKind::Fill, "S1")
                .into_read_only(),
            Node::leaf("b", "Open", LeafKind::Rectangle).with_binding(BindingKind::Fill, "S1"),
        ];
        let mut fx = fixture(local, selection, vec![]);

        let report = fx.plugin.replace_all_styles(Mode::Dark).await.unwrap();
        assert_eq!(report.top_level_nodes, 2);
        assert_eq!(report.failed_nodes, 1);
        assert_eq!(report.stats.bindings_rewritten, 1);

        let selection = &fx.plugin.document().selection;
        assert_eq!(selection[0].binding(BindingKind::Fill), Some("S1"));
        assert_eq!(selection[1].binding(BindingKind::Fill), Some("S2"));

        let notifications = fx.ui.notifications.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].0, "Cannot write to read-only node a");
        assert_eq!(notifications[0].1, None);
    }

    #[tokio::test]
    async fn test_injected_replacer_drives_the_pass() {
        const TOKENS: &[ModeToken] = &[
            ModeToken {
                token: "dark",
                capitalized: "Night",
            },
            ModeToken {
                token: "light",
                capitalized: "Day",
            },
        ];
        let local = vec![paint("S1", "Sky/Day"), paint("S2", "Sky/Dark"), paint("S3", "Sky/Light")];
        let selection = vec![Node::leaf("r", "Sky", LeafKind::Rectangle).with_binding(BindingKind::Fill, "S1")];
        let mut fx = fixture(local, selection, vec![]);
        fx.plugin = fx.plugin.with_replacer(Replacer::new(TOKENS));

        let report = fx.plugin.replace_all_styles(Mode::Dark).await.unwrap();
        assert_eq!(report.stats.bindings_rewritten, 1);
        assert_eq!(fx.plugin.document().selection[0].binding(BindingKind::Fill), Some("S2"));
    }

    #[tokio::test]
    async fn test_save_message_keeps_plugin_open() {
        let mut fx = fixture(vec![paint("S1", "Primary/Light")], vec![], vec![]);
        fx.plugin.handle_message(UiMessage::Save).await.unwrap();
        assert!(fx.storage.get("themeSwitcher.teamColorKeys").await.unwrap().is_some());
        assert!(!*fx.ui.closed.lock().unwrap());
        assert!(fx.ui.notifications.lock().unwrap().is_empty());
    }
}
