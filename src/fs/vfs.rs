//! Virtual File System
//!
//! Owns the node arena, the root, and the current-directory cursor, and is
//! the only component allowed to mutate tree topology. Every public method
//! locks the tree for the duration of the call; path resolution temporarily
//! moves the cursor and always restores it before the lock is released, so
//! no caller can ever observe a mid-resolution cursor.

use tokio::sync::RwLock;

use super::node::{Node, NodeId, NodeKind};
use super::path::{self, ROOT};
use super::types::{validate_name, DirEntry, FsError};

/// Interior tree state, guarded by the lock in [`VirtualFileSystem`].
struct FsTree {
    nodes: Vec<Node>,
    root: NodeId,
    cwd: NodeId,
    total_directories: usize,
    total_text_files: usize,
}

impl FsTree {
    fn new() -> Self {
        // The root is the one node with no name and no parent. It is not
        // counted: the counters track created entries only.
        let root = Node::directory(String::new(), None);
        Self {
            nodes: vec![root],
            root: NodeId(0),
            cwd: NodeId(0),
            total_directories: 0,
            total_text_files: 0,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match node.kind {
            NodeKind::Directory { .. } => self.total_directories += 1,
            NodeKind::TextFile { .. } => self.total_text_files += 1,
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Compute a node's path by walking parent links up to the root.
    fn path_of(&self, id: NodeId) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current);
            match node.parent {
                Some(parent) => {
                    segments.push(node.name.clone());
                    current = parent;
                }
                None => break,
            }
        }
        if segments.is_empty() {
            ROOT.to_string()
        } else {
            segments.reverse();
            path::rebuild(&segments)
        }
    }

    fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        match &self.node(dir).kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            NodeKind::TextFile { .. } => None,
        }
    }

    fn entry(&self, id: NodeId) -> DirEntry {
        let node = self.node(id);
        DirEntry {
            name: node.name.clone(),
            path: self.path_of(id),
            kind: node.file_kind(),
        }
    }

    /// Transform a possibly-relative path into a canonical absolute path.
    ///
    /// The cursor is saved, moved segment by segment, and restored on every
    /// exit path; resolution must never leave an observable cursor change.
    /// The final segment is not required to exist, so callers can resolve
    /// paths for entries they are about to create.
    fn resolve_absolute(&mut self, path: &str) -> Result<String, FsError> {
        if path == ROOT {
            return Ok(ROOT.to_string());
        }
        let saved = self.cwd;
        if path.starts_with(ROOT) {
            self.cwd = self.root;
        }
        let result = self.follow_path(path);
        self.cwd = saved;
        result
    }

    fn follow_path(&mut self, path: &str) -> Result<String, FsError> {
        let segments = path::tokenize(path);
        let last = segments.len().saturating_sub(1);
        let mut trailing = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if segment == ".." {
                if let Some(parent) = self.node(self.cwd).parent {
                    self.cwd = parent;
                }
            } else if segment != "." {
                if i == last {
                    trailing = segment.clone();
                } else {
                    self.set_to(segment)?;
                }
            }
        }
        let base = self.path_of(self.cwd);
        if trailing.is_empty() {
            Ok(base)
        } else if base.ends_with(ROOT) {
            Ok(format!("{}{}", base, trailing))
        } else {
            Ok(format!("{}/{}", base, trailing))
        }
    }

    /// Move the cursor into the named child, which must be a directory.
    fn set_to(&mut self, name: &str) -> Result<(), FsError> {
        match self.child(self.cwd, name) {
            Some(id) if self.node(id).is_directory() => {
                self.cwd = id;
                Ok(())
            }
            Some(_) => Err(FsError::InvalidPath(
                "Cannot set directory to a file.".to_string(),
            )),
            None => Err(FsError::InvalidPath(format!(
                "{}: Directory does not exist.",
                name
            ))),
        }
    }

    /// Non-raising counterpart to [`FsTree::resolve_absolute`]: the node at
    /// `path`, or `None` when any part of it does not exist.
    fn lookup_id(&mut self, path: &str) -> Option<NodeId> {
        let abs = self.resolve_absolute(path).ok()?;
        if abs == ROOT {
            return Some(self.root);
        }
        let mut current = self.root;
        for segment in path::tokenize(&abs) {
            current = self.child(current, &segment)?;
        }
        Some(current)
    }

    /// Append-or-replace `child` under `parent` by name. A displaced node
    /// loses its parent link so it can never resolve to the same path as
    /// its replacement.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let name = self.node(child).name.clone();
        let displaced = match &mut self.node_mut(parent).kind {
            NodeKind::Directory { children } => {
                let old = children.shift_remove(&name);
                children.insert(name, child);
                old
            }
            NodeKind::TextFile { .. } => None,
        };
        if let Some(old) = displaced {
            if old != child {
                self.node_mut(old).parent = None;
            }
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Remove `id` from its parent's child list, by identity.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let name = self.node(id).name.clone();
        if let NodeKind::Directory { children } = &mut self.node_mut(parent).kind {
            if children.get(&name) == Some(&id) {
                children.shift_remove(&name);
            }
        }
        self.node_mut(id).parent = None;
    }

    /// Where a new entry named by `path_or_name` belongs: a bare name goes
    /// into the current directory, a path into the directory named by its
    /// parent portion.
    fn destination_for(&mut self, path_or_name: &str) -> Result<(String, NodeId), FsError> {
        if path::is_path(path_or_name) {
            let abs = self.resolve_absolute(path_or_name)?;
            let name = path::tokenize(&abs)
                .pop()
                .ok_or_else(|| FsError::InvalidFileName("File name cannot be empty.".to_string()))?;
            let parent_abs = path::parent_path(&abs);
            let parent = self.lookup_id(&parent_abs).ok_or_else(|| {
                FsError::InvalidPath(format!("The path does not exist:\n{}", parent_abs))
            })?;
            if !self.node(parent).is_directory() {
                return Err(FsError::InvalidPath(format!(
                    "{}: Is not a directory.",
                    parent_abs
                )));
            }
            Ok((name, parent))
        } else {
            Ok((path_or_name.to_string(), self.cwd))
        }
    }

    fn create_directory(&mut self, path_or_name: &str) -> Result<NodeId, FsError> {
        let (name, parent) = self.destination_for(path_or_name)?;
        validate_name(&name)?;
        let id = self.alloc(Node::directory(name, None));
        self.attach(parent, id);
        Ok(id)
    }

    fn create_text_file(&mut self, path_or_name: &str, contents: &str) -> Result<NodeId, FsError> {
        let (name, parent) = self.destination_for(path_or_name)?;
        validate_name(&name)?;
        let id = self.alloc(Node::text_file(name, None, contents.to_string()));
        self.attach(parent, id);
        Ok(id)
    }

    /// Recursively mirror the subtree rooted at `src` into fresh nodes.
    fn deep_copy_node(&mut self, src: NodeId, name: String) -> NodeId {
        match self.node(src).kind.clone() {
            NodeKind::TextFile { contents } => self.alloc(Node::text_file(name, None, contents)),
            NodeKind::Directory { children } => {
                let copy = self.alloc(Node::directory(name, None));
                for (child_name, child_id) in children {
                    let child_copy = self.deep_copy_node(child_id, child_name);
                    self.attach(copy, child_copy);
                }
                copy
            }
        }
    }

    /// Whether `candidate` is `of` itself or one of its ancestors.
    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    /// Resolve a copy/move destination: `dest_dir` must exist and be a
    /// directory, and it must not sit inside the subtree rooted at `src`.
    fn move_target(&mut self, src: NodeId, dest_dir: &str) -> Result<NodeId, FsError> {
        let dest = self.lookup_id(dest_dir).ok_or_else(|| {
            FsError::InvalidPath(format!("The path does not exist:\n{}", dest_dir))
        })?;
        if !self.node(dest).is_directory() {
            return Err(FsError::InvalidPath(format!(
                "{}: Is not a directory.",
                dest_dir
            )));
        }
        if self.is_ancestor(src, dest) {
            return Err(FsError::InvalidPath(
                "Cannot move/copy to a subdirectory of itself.".to_string(),
            ));
        }
        Ok(dest)
    }
}

/// The virtual file system: one per session, threaded through the dispatcher
/// and all commands explicitly.
pub struct VirtualFileSystem {
    tree: RwLock<FsTree>,
}

impl VirtualFileSystem {
    /// Create a file system containing only an empty root, with the current
    /// directory at the root.
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(FsTree::new()),
        }
    }

    /// Discard the whole tree and rebuild an empty root. The creation
    /// counters are monotonic and survive the reset.
    pub async fn reset(&self) {
        let mut tree = self.tree.write().await;
        tree.nodes = vec![Node::directory(String::new(), None)];
        tree.root = NodeId(0);
        tree.cwd = tree.root;
    }

    /// Path of the current working directory.
    pub async fn current_path(&self) -> String {
        let tree = self.tree.read().await;
        tree.path_of(tree.cwd)
    }

    /// Transform `path` into a canonical absolute path without requiring
    /// the final segment to exist. The cursor is unchanged on return.
    pub async fn resolve_absolute(&self, path: &str) -> Result<String, FsError> {
        self.tree.write().await.resolve_absolute(path)
    }

    /// The entry at `path`, or `None` when it does not exist.
    pub async fn lookup(&self, path: &str) -> Option<DirEntry> {
        let mut tree = self.tree.write().await;
        let id = tree.lookup_id(path)?;
        Some(tree.entry(id))
    }

    pub async fn exists(&self, path: &str) -> bool {
        self.tree.write().await.lookup_id(path).is_some()
    }

    /// Contents of the text file at `path`.
    pub async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        match &tree.node(id).kind {
            NodeKind::TextFile { contents } => Ok(contents.clone()),
            NodeKind::Directory { .. } => {
                Err(FsError::InvalidPath(format!("{}: Is not a text file.", path)))
            }
        }
    }

    /// Write `contents` to the text file at `path`, creating it on demand.
    /// Appending joins onto existing non-empty contents with a newline.
    pub async fn write_file(&self, path: &str, contents: &str, append: bool) -> Result<(), FsError> {
        let mut tree = self.tree.write().await;
        if let Some(id) = tree.lookup_id(path) {
            match &mut tree.node_mut(id).kind {
                NodeKind::TextFile {
                    contents: existing,
                } => {
                    if !append {
                        *existing = contents.to_string();
                    } else if existing.is_empty() {
                        existing.push_str(contents);
                    } else {
                        existing.push('\n');
                        existing.push_str(contents);
                    }
                    Ok(())
                }
                NodeKind::Directory { .. } => {
                    Err(FsError::InvalidPath(format!("{}: Is a directory.", path)))
                }
            }
        } else {
            tree.create_text_file(path, contents)?;
            Ok(())
        }
    }

    /// Create a directory named by `path_or_name`: a bare name in the
    /// current directory, a path under its parent portion.
    pub async fn create_directory(&self, path_or_name: &str) -> Result<(), FsError> {
        self.tree.write().await.create_directory(path_or_name)?;
        Ok(())
    }

    /// Create an empty-or-seeded text file named by `path_or_name`.
    pub async fn create_text_file(&self, path_or_name: &str, contents: &str) -> Result<(), FsError> {
        self.tree
            .write()
            .await
            .create_text_file(path_or_name, contents)?;
        Ok(())
    }

    /// Detach the entry at `path` from its parent. No-op when absent.
    pub async fn delete(&self, path: &str) {
        let mut tree = self.tree.write().await;
        if let Some(id) = tree.lookup_id(path) {
            tree.detach(id);
        }
    }

    /// Move the cursor to the directory at `path`.
    pub async fn change_directory(&self, path: &str) -> Result<(), FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        if !tree.node(id).is_directory() {
            return Err(FsError::InvalidPath(format!("{}: Is not a directory.", path)));
        }
        tree.cwd = id;
        Ok(())
    }

    /// Children of the directory at `path`, in insertion order.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        match &tree.node(id).kind {
            NodeKind::Directory { children } => {
                let ids: Vec<NodeId> = children.values().copied().collect();
                Ok(ids.into_iter().map(|child| tree.entry(child)).collect())
            }
            NodeKind::TextFile { .. } => {
                Err(FsError::InvalidPath(format!("{}: Is not a directory.", path)))
            }
        }
    }

    /// Deep-copy the subtree at `src` into `dest_dir` under `new_name`,
    /// replacing any existing child of that name.
    pub async fn deep_copy(&self, src: &str, dest_dir: &str, new_name: &str) -> Result<(), FsError> {
        let mut tree = self.tree.write().await;
        let src_id = tree
            .lookup_id(src)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", src)))?;
        let dest_id = tree.move_target(src_id, dest_dir)?;
        validate_name(new_name)?;
        let copy = tree.deep_copy_node(src_id, new_name.to_string());
        tree.attach(dest_id, copy);
        Ok(())
    }

    /// Detach the subtree at `src` and reattach it in `dest_dir` under
    /// `new_name`, replacing any existing child of that name.
    pub async fn relocate(&self, src: &str, dest_dir: &str, new_name: &str) -> Result<(), FsError> {
        let mut tree = self.tree.write().await;
        let src_id = tree
            .lookup_id(src)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", src)))?;
        let dest_id = tree.move_target(src_id, dest_dir)?;
        validate_name(new_name)?;
        tree.detach(src_id);
        tree.node_mut(src_id).name = new_name.to_string();
        tree.attach(dest_id, src_id);
        Ok(())
    }

    /// Monotonic creation counters: `(directories, text_files)`.
    pub async fn counts(&self) -> (usize, usize) {
        let tree = self.tree.read().await;
        (tree.total_directories, tree.total_text_files)
    }

    /// Whether nothing has ever been created in this file system.
    pub async fn is_empty(&self) -> bool {
        let tree = self.tree.read().await;
        tree.total_directories + tree.total_text_files == 0
    }

    /// Whether the entry at `path` is empty: a directory with no children,
    /// or a text file whose contents are nothing but whitespace.
    pub async fn is_entry_empty(&self, path: &str) -> Result<bool, FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        Ok(tree.node(id).is_empty())
    }

    /// Flip the cosmetic read-only attribute; returns the new value.
    pub async fn toggle_read_only(&self, path: &str) -> Result<bool, FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        let node = tree.node_mut(id);
        node.read_only = !node.read_only;
        Ok(node.read_only)
    }

    /// Flip the cosmetic hidden attribute; returns the new value.
    pub async fn toggle_hidden(&self, path: &str) -> Result<bool, FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        let node = tree.node_mut(id);
        node.hidden = !node.hidden;
        Ok(node.hidden)
    }

    /// Cosmetic `(read_only, hidden)` attributes of the entry at `path`.
    pub async fn attributes(&self, path: &str) -> Result<(bool, bool), FsError> {
        let mut tree = self.tree.write().await;
        let id = tree
            .lookup_id(path)
            .ok_or_else(|| FsError::InvalidPath(format!("{}: No such file or directory.", path)))?;
        let node = tree.node(id);
        Ok((node.read_only, node.hidden))
    }
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
