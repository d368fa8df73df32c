mod node;
mod replacer;
mod style_index;
mod walker;

pub use node::{BindingKind, ContainerKind, LeafKind, Node, NodeKind, StyleBinding, StyleBindings};
pub use replacer::{capitalize, Mode, ModeToken, Replacer, MODE_TOKENS};
pub use style_index::StyleIndex;
pub use walker::{rewrite, RewriteStats, StyleRewriter};
