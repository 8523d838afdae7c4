//! Input History
//!
//! Append-only, 1-indexed log of raw input lines. Populated by the front
//! end after each line is read; consumed by the recall (`!N`) and `history`
//! commands.

use tokio::sync::RwLock;

/// The session's input history.
pub struct History {
    entries: RwLock<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record one input line.
    pub async fn push(&self, line: &str) {
        self.entries.write().await.push(line.to_string());
    }

    /// Number of recorded lines.
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    /// The `index`-th recorded line, 1-indexed.
    pub async fn get(&self, index: usize) -> Option<String> {
        if index == 0 {
            return None;
        }
        self.entries.read().await.get(index - 1).cloned()
    }

    /// Snapshot of every recorded line, oldest first.
    pub async fn entries(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_and_size() {
        let history = History::new();
        assert_eq!(history.size().await, 0);
        history.push("ls").await;
        history.push("pwd").await;
        assert_eq!(history.size().await, 2);
    }

    #[tokio::test]
    async fn test_get_is_one_indexed() {
        let history = History::new();
        history.push("first").await;
        history.push("second").await;

        assert_eq!(history.get(1).await.as_deref(), Some("first"));
        assert_eq!(history.get(2).await.as_deref(), Some("second"));
        assert_eq!(history.get(0).await, None);
        assert_eq!(history.get(3).await, None);
    }

    #[tokio::test]
    async fn test_entries_snapshot_preserves_order() {
        let history = History::new();
        history.push("a").await;
        history.push("b").await;
        assert_eq!(history.entries().await, vec!["a", "b"]);
    }
}
