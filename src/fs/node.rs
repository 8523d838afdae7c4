//! Tree Node Model
//!
//! Arena-backed nodes for the virtual file system tree. Nodes are addressed
//! by stable [`NodeId`] handles; directories keep an insertion-ordered child
//! map, and every non-root node keeps a handle to its parent so a node's
//! path can always be computed from the node itself. A node with no parent
//! that is not the root is detached, which is how deletion works: the arena
//! slot lives on, but nothing reachable from the root refers to it.

use indexmap::IndexMap;

use super::types::FileKind;

/// Stable handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Kind-specific payload of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Insertion order is display order; names are unique.
    Directory { children: IndexMap<String, NodeId> },
    /// A single mutable text payload.
    TextFile { contents: String },
}

/// One entry in the virtual filesystem tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
    // Cosmetic attributes, never enforced.
    pub(crate) read_only: bool,
    pub(crate) hidden: bool,
}

impl Node {
    pub(crate) fn directory(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            kind: NodeKind::Directory {
                children: IndexMap::new(),
            },
            read_only: false,
            hidden: false,
        }
    }

    pub(crate) fn text_file(name: String, parent: Option<NodeId>, contents: String) -> Self {
        Self {
            name,
            parent,
            kind: NodeKind::TextFile { contents },
            read_only: false,
            hidden: false,
        }
    }

    pub(crate) fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub(crate) fn file_kind(&self) -> FileKind {
        match self.kind {
            NodeKind::Directory { .. } => FileKind::Directory,
            NodeKind::TextFile { .. } => FileKind::TextFile,
        }
    }

    /// A directory is empty when it has no children; a text file is empty
    /// when its contents trimmed of whitespace are empty.
    pub(crate) fn is_empty(&self) -> bool {
        match &self.kind {
            NodeKind::Directory { children } => children.is_empty(),
            NodeKind::TextFile { contents } => contents.trim().is_empty(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        let dir = Node::directory("d".to_string(), None);
        assert!(dir.is_directory());
        assert_eq!(dir.file_kind(), FileKind::Directory);

        let file = Node::text_file("f".to_string(), None, "hi".to_string());
        assert!(!file.is_directory());
        assert_eq!(file.file_kind(), FileKind::TextFile);
    }

    #[test]
    fn test_emptiness() {
        let dir = Node::directory("d".to_string(), None);
        assert!(dir.is_empty());

        let blank = Node::text_file("f".to_string(), None, "  \n\t ".to_string());
        assert!(blank.is_empty());

        let full = Node::text_file("f".to_string(), None, "x".to_string());
        assert!(!full.is_empty());
    }

    #[test]
    fn test_new_nodes_carry_no_attributes() {
        let file = Node::text_file("f".to_string(), None, String::new());
        assert!(!file.read_only);
        assert!(!file.hidden);
    }
}
