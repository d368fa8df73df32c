use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use switcher_common::{Result, SwitchError};
use tracing::debug;

/// The three independent style slots a node can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Fill,
    Stroke,
    Background,
}

impl BindingKind {
    /// Processing order used by the rewriter
    pub const ALL: [BindingKind; 3] = [BindingKind::Fill, BindingKind::Stroke, BindingKind::Background];

    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Fill => "fill",
            BindingKind::Stroke => "stroke",
            BindingKind::Background => "background",
        }
    }
}

/// A node's reference to a style. The host reports "nothing bound" as an
/// empty string; that value is kept as-is but never reported by [`StyleBinding::id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBinding(Option<String>);

impl StyleBinding {
    pub fn to(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            Self(None)
        } else {
            Self(Some(id))
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<Option<String>> for StyleBinding {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBindings {
    pub fill: StyleBinding,
    pub stroke: StyleBinding,
    pub background: StyleBinding,
}

impl StyleBindings {
    pub fn get(&self, kind: BindingKind) -> &StyleBinding {
        match kind {
            BindingKind::Fill => &self.fill,
            BindingKind::Stroke => &self.stroke,
            BindingKind::Background => &self.background,
        }
    }

    fn get_mut(&mut self, kind: BindingKind) -> &mut StyleBinding {
        match kind {
            BindingKind::Fill => &mut self.fill,
            BindingKind::Stroke => &mut self.stroke,
            BindingKind::Background => &mut self.background,
        }
    }
}

/// Node kinds that own children and are descended into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Component,
    Instance,
    Frame,
    Group,
    Page,
}

impl ContainerKind {
    pub fn host_name(&self) -> &'static str {
        match self {
            ContainerKind::Component => "COMPONENT",
            ContainerKind::Instance => "INSTANCE",
            ContainerKind::Frame => "FRAME",
            ContainerKind::Group => "GROUP",
            ContainerKind::Page => "PAGE",
        }
    }

    fn from_host_name(name: &str) -> Option<Self> {
        match name {
            "COMPONENT" => Some(ContainerKind::Component),
            "INSTANCE" => Some(ContainerKind::Instance),
            "FRAME" => Some(ContainerKind::Frame),
            "GROUP" => Some(ContainerKind::Group),
            "PAGE" => Some(ContainerKind::Page),
            _ => None,
        }
    }
}

/// Everything else. Some of these (boolean operations, sections, component
/// sets) have children on the host side, but they are not descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafKind {
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Vector,
    Line,
    Text,
    BooleanOperation,
    Other(String),
}

impl LeafKind {
    pub fn host_name(&self) -> &str {
        match self {
            LeafKind::Rectangle => "RECTANGLE",
            LeafKind::Ellipse => "ELLIPSE",
            LeafKind::Polygon => "POLYGON",
            LeafKind::Star => "STAR",
            LeafKind::Vector => "VECTOR",
            LeafKind::Line => "LINE",
            LeafKind::Text => "TEXT",
            LeafKind::BooleanOperation => "BOOLEAN_OPERATION",
            LeafKind::Other(name) => name,
        }
    }

    fn from_host_name(name: &str) -> Self {
        match name {
            "RECTANGLE" => LeafKind::Rectangle,
            "ELLIPSE" => LeafKind::Ellipse,
            "POLYGON" => LeafKind::Polygon,
            "STAR" => LeafKind::Star,
            "VECTOR" => LeafKind::Vector,
            "LINE" => LeafKind::Line,
            "TEXT" => LeafKind::Text,
            "BOOLEAN_OPERATION" => LeafKind::BooleanOperation,
            other => LeafKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Container {
        kind: ContainerKind,
        children: Vec<Node>,
    },
    Leaf(LeafKind),
}

/// A node of the host document tree.
///
/// Only the style bindings are ever written; kind and children are read-only
/// structure. The JSON form uses the host's field names (`type`,
/// `fillStyleId`, `strokeStyleId`, `backgroundStyleId`, `children`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct Node {
    pub id: String,
    pub name: String,
    /// Set by the host for nodes whose properties cannot be written,
    /// e.g. locked sublayers of a remote instance.
    pub read_only: bool,
    pub bindings: StyleBindings,
    pub kind: NodeKind,
    passthrough: Passthrough,
}

/// Host data carried through untouched so a decoded node writes back as it came in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Passthrough {
    fields: Map<String, Value>,
    /// Children of leaf kinds; never visited
    leaf_children: Vec<RawNode>,
}

impl Node {
    pub fn container(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ContainerKind,
        children: Vec<Node>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            read_only: false,
            bindings: StyleBindings::default(),
            kind: NodeKind::Container { kind, children },
            passthrough: Passthrough::default(),
        }
    }

    pub fn leaf(id: impl Into<String>, name: impl Into<String>, kind: LeafKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            read_only: false,
            bindings: StyleBindings::default(),
            kind: NodeKind::Leaf(kind),
            passthrough: Passthrough::default(),
        }
    }

    pub fn with_binding(mut self, kind: BindingKind, style_id: impl Into<String>) -> Self {
        *self.bindings.get_mut(kind) = StyleBinding::to(style_id);
        self
    }

    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn binding(&self, kind: BindingKind) -> Option<&str> {
        self.bindings.get(kind).id()
    }

    /// Point `kind` at `style_id`. Fails on read-only nodes.
    pub fn set_binding(&mut self, kind: BindingKind, style_id: &str) -> Result<()> {
        if self.read_only {
            return Err(SwitchError::ReadOnlyNode {
                node_id: self.id.clone(),
            });
        }
        *self.bindings.get_mut(kind) = StyleBinding::to(style_id);
        Ok(())
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    pub fn children(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Container { children, .. } => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut [Node]> {
        match &mut self.kind {
            NodeKind::Container { children, .. } => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match &self.kind {
            NodeKind::Container { kind, .. } => kind.host_name(),
            NodeKind::Leaf(kind) => kind.host_name(),
        }
    }

    /// Depth-first search by id, including `self`
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    read_only: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let mut leaf_children = Vec::new();
        let kind = match ContainerKind::from_host_name(&raw.node_type) {
            Some(kind) => NodeKind::Container {
                kind,
                children: raw.children.into_iter().map(Node::from).collect(),
            },
            None => {
                if !raw.children.is_empty() {
                    debug!(
                        "Not descending into {} children of {} node {}",
                        raw.children.len(),
                        raw.node_type,
                        raw.id
                    );
                }
                leaf_children = raw.children;
                NodeKind::Leaf(LeafKind::from_host_name(&raw.node_type))
            }
        };

        Node {
            id: raw.id,
            name: raw.name,
            read_only: raw.read_only,
            bindings: StyleBindings {
                fill: raw.fill_style_id.into(),
                stroke: raw.stroke_style_id.into(),
                background: raw.background_style_id.into(),
            },
            kind,
            passthrough: Passthrough {
                fields: raw.extra,
                leaf_children,
            },
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let node_type = node.type_name().to_string();
        let children = match node.kind {
            NodeKind::Container { children, .. } => children.into_iter().map(RawNode::from).collect(),
            NodeKind::Leaf(_) => node.passthrough.leaf_children,
        };

        RawNode {
            id: node.id,
            name: node.name,
            node_type,
            fill_style_id: node.bindings.fill.0,
            stroke_style_id: node.bindings.stroke.0,
            background_style_id: node.bindings.background.0,
            read_only: node.read_only,
            children,
            extra: node.passthrough.fields,
        }
    }
}
