use crate::node::{BindingKind, Node};
use crate::replacer::{Mode, Replacer};
use crate::style_index::StyleIndex;
use switcher_common::Result;
use tracing::debug;

/// Counters collected while rewriting a subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub nodes_visited: usize,
    pub bindings_rewritten: usize,
    /// Bindings whose rewritten name has no style in the index
    pub bindings_unresolved: usize,
}

impl RewriteStats {
    pub fn merge(&mut self, other: RewriteStats) {
        self.nodes_visited += other.nodes_visited;
        self.bindings_rewritten += other.bindings_rewritten;
        self.bindings_unresolved += other.bindings_unresolved;
    }
}

/// Switches the style bindings of a node tree over to another mode
pub struct StyleRewriter<'a> {
    index: &'a StyleIndex,
    replacer: &'a Replacer,
    mode: Mode,
}

impl<'a> StyleRewriter<'a> {
    pub fn new(index: &'a StyleIndex, replacer: &'a Replacer, mode: Mode) -> Self {
        Self {
            index,
            replacer,
            mode,
        }
    }

    /// Rewrite every node in `nodes` and, for container kinds, their
    /// descendants. An error aborts the remaining work of the call.
    pub fn rewrite(&self, nodes: &mut [Node]) -> Result<RewriteStats> {
        let mut stats = RewriteStats::default();
        self.rewrite_nodes(nodes, &mut stats)?;
        Ok(stats)
    }

    fn rewrite_nodes(&self, nodes: &mut [Node], stats: &mut RewriteStats) -> Result<()> {
        for node in nodes.iter_mut() {
            stats.nodes_visited += 1;
            debug!("Processing node {} ({}) {}", node.name, node.type_name(), node.id);

            for kind in BindingKind::ALL {
                self.rewrite_binding(node, kind, stats)?;
            }

            if let Some(children) = node.children_mut() {
                self.rewrite_nodes(children, stats)?;
            }
        }
        Ok(())
    }

    fn rewrite_binding(&self, node: &mut Node, kind: BindingKind, stats: &mut RewriteStats) -> Result<()> {
        let Some(current_name) = node.binding(kind).and_then(|id| self.index.name_of(id)) else {
            return Ok(());
        };
        debug!("{} style name: {}", kind.as_str(), current_name);

        let replaced_name = self.replacer.replace_mode(current_name, self.mode);
        match self.index.identifier_of(&replaced_name) {
            Some(style_id) => {
                node.set_binding(kind, style_id)?;
                stats.bindings_rewritten += 1;
            }
            None => {
                debug!("No style named '{}', keeping {} binding", replaced_name, kind.as_str());
                stats.bindings_unresolved += 1;
            }
        }
        Ok(())
    }
}

/// Rewrite `nodes` to `mode` with the default mode keyword table
pub fn rewrite(mode: Mode, index: &StyleIndex, nodes: &mut [Node]) -> Result<RewriteStats> {
    let replacer = Replacer::default();
    StyleRewriter::new(index, &replacer, mode).rewrite(nodes)
}
