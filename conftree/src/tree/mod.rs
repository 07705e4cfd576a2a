//! Arena-backed configuration tree.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`] handles, so
//! growing a sequence or inserting a map key never invalidates handles that
//! were resolved earlier. Converting a node to another kind discards its
//! children; the discarded nodes stay allocated but are no longer reachable
//! from the root.
//!
//! ```rust
//! use conftree::{NodeKind, Tree};
//!
//! let mut tree = Tree::parse("servers: [alpha, beta]")?;
//! let id = tree.set_path("servers[3]", "delta")?;
//! assert_eq!(tree.val(id), Some("delta"));
//!
//! let servers = tree.lookup("servers")?.expect("servers exists");
//! assert_eq!(tree.kind(servers), Some(NodeKind::Seq));
//! assert_eq!(tree.len(servers), 4);
//! assert_eq!(tree.lookup("servers[2]")?.and_then(|n| tree.val(n)), Some(""));
//! # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
//! ```

mod merge;
mod path;
mod yaml;

pub use path::{MAX_SEQ_GROWTH, PathSegment, parse_path};

/// Handle to a node stored in a [`Tree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

/// The three shapes a node can take.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// Mapping from unique string keys to child nodes.
    Map,
    /// Index-ordered sequence of child nodes.
    Seq,
    /// Leaf holding a string value.
    Val,
}

#[derive(Clone, Debug)]
enum NodeData {
    Map(Vec<(String, NodeId)>),
    Seq(Vec<NodeId>),
    Val(String),
}

impl NodeData {
    const fn kind(&self) -> NodeKind {
        match self {
            Self::Map(_) => NodeKind::Map,
            Self::Seq(_) => NodeKind::Seq,
            Self::Val(_) => NodeKind::Val,
        }
    }
}

/// A mutable configuration tree of maps, sequences and scalars.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree whose root is an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::Map(Vec::new())],
            root: NodeId(0),
        }
    }

    /// Create a tree whose root is the scalar `value`.
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::Val(value.into())],
            root: NodeId(0),
        }
    }

    /// Handle of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(data);
        NodeId(self.nodes.len() - 1)
    }

    /// Kind of the node, or `None` for a handle from another tree.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.data(id).map(NodeData::kind)
    }

    /// Scalar value of the node, if it is a scalar.
    #[must_use]
    pub fn val(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Val(v) => Some(v),
            _ => None,
        }
    }

    /// Child of a map node by key.
    #[must_use]
    pub fn get_key(&self, id: NodeId, key: &str) -> Option<NodeId> {
        match self.data(id)? {
            NodeData::Map(entries) => entries
                .iter()
                .find_map(|(k, child)| (k == key).then_some(*child)),
            _ => None,
        }
    }

    /// Child of a sequence node by position.
    #[must_use]
    pub fn get_index(&self, id: NodeId, index: usize) -> Option<NodeId> {
        match self.data(id)? {
            NodeData::Seq(items) => items.get(index).copied(),
            _ => None,
        }
    }

    /// Children of a map or sequence node, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.data(id) {
            Some(NodeData::Map(entries)) => entries.iter().map(|(_, child)| *child).collect(),
            Some(NodeData::Seq(items)) => items.clone(),
            Some(NodeData::Val(_)) | None => Vec::new(),
        }
    }

    /// Keys of a map node, in insertion order.
    #[must_use]
    pub fn keys(&self, id: NodeId) -> Vec<&str> {
        match self.data(id) {
            Some(NodeData::Map(entries)) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of children; zero for scalars.
    #[must_use]
    pub fn len(&self, id: NodeId) -> usize {
        match self.data(id) {
            Some(NodeData::Map(entries)) => entries.len(),
            Some(NodeData::Seq(items)) => items.len(),
            Some(NodeData::Val(_)) | None => 0,
        }
    }

    /// Returns `true` when the node has no children.
    #[must_use]
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.len(id) == 0
    }

    /// Turn the node into a scalar holding `value`, discarding any children.
    pub fn set_val(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(data) = self.data_mut(id) {
            *data = NodeData::Val(value.into());
        }
    }

    /// Turn the node into a map. A node that is already a map is untouched;
    /// any other node loses its value and children.
    pub fn to_map(&mut self, id: NodeId) {
        if let Some(data) = self.data_mut(id) {
            if !matches!(data, NodeData::Map(_)) {
                *data = NodeData::Map(Vec::new());
            }
        }
    }

    /// Turn the node into a sequence. A node that is already a sequence is
    /// untouched; any other node loses its value and children.
    pub fn to_seq(&mut self, id: NodeId) {
        if let Some(data) = self.data_mut(id) {
            if !matches!(data, NodeData::Seq(_)) {
                *data = NodeData::Seq(Vec::new());
            }
        }
    }

    /// Append a blank scalar to a sequence node and return its handle.
    ///
    /// Returns `None` when `id` is not a sequence.
    pub fn append_child(&mut self, id: NodeId) -> Option<NodeId> {
        if self.kind(id)? != NodeKind::Seq {
            return None;
        }
        let child = self.alloc(NodeData::Val(String::new()));
        match self.data_mut(id)? {
            NodeData::Seq(items) => items.push(child),
            _ => return None,
        }
        Some(child)
    }

    /// Return the child of a map node under `key`, inserting a blank scalar
    /// when the key is absent.
    ///
    /// Returns `None` when `id` is not a map.
    pub fn insert_key(&mut self, id: NodeId, key: &str) -> Option<NodeId> {
        if self.kind(id)? != NodeKind::Map {
            return None;
        }
        if let Some(existing) = self.get_key(id, key) {
            return Some(existing);
        }
        let child = self.alloc(NodeData::Val(String::new()));
        match self.data_mut(id)? {
            NodeData::Map(entries) => entries.push((key.to_owned(), child)),
            _ => return None,
        }
        Some(child)
    }
}
