//! In-memory session history.
//!
//! One store per session; its lifetime bounds the entries. The handle is
//! cheaply cloneable so the pipeline (writer) and the presentation layer
//! (readers) share the same sequence.

use std::sync::Arc;

use tokio::sync::RwLock;

use lumen_core::HistoryEntry;

/// Ordered, append-only collection of past analyses.
///
/// Invariants: insertion order is preserved (oldest first), entries are
/// never reordered or deduplicated, and the sequence only grows until an
/// explicit [`clear`](HistoryStore::clear).
#[derive(Clone, Default)]
pub struct HistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Always succeeds; never deduplicates.
    pub async fn append(&self, entry: HistoryEntry) {
        self.entries.write().await.push(entry);
    }

    /// Snapshot of all entries in append order. Repeated calls without an
    /// intervening mutation return equal sequences.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Entry at `index` (0-based), if present.
    pub async fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.entries.read().await.get(index).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Empty the sequence. Atomic with respect to concurrent readers;
    /// idempotent.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(filename: &str, analysis: &str) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            analysis: analysis.to_string(),
            timestamp: "2026-08-07 12:00:00".to_string(),
            image_base64: "/9j/2Q==".to_string(),
            width: 10,
            height: 10,
        }
    }

    #[tokio::test]
    async fn append_grows_by_one_and_preserves_order() {
        let store = HistoryStore::new();
        store.append(entry("a.png", "first")).await;
        store.append(entry("b.png", "second")).await;

        let entries = store.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].analysis, "first");
        assert_eq!(entries[1].analysis, "second");
        assert_eq!(entries.last().unwrap().filename, "b.png");
    }

    #[tokio::test]
    async fn duplicate_filenames_are_kept() {
        let store = HistoryStore::new();
        store.append(entry("same.png", "one")).await;
        store.append(entry("same.png", "two")).await;
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_idempotent_between_mutations() {
        let store = HistoryStore::new();
        store.append(entry("a.png", "first")).await;

        let first = store.list().await;
        let second = store.list().await;
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn clear_resets_regardless_of_length() {
        let store = HistoryStore::new();
        for i in 0..3 {
            store.append(entry(&format!("{i}.png"), "text")).await;
        }
        store.clear().await;
        assert!(store.list().await.is_empty());

        // Next append starts a fresh sequence of length one, not four.
        store.append(entry("after.png", "fresh")).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_is_zero_based() {
        let store = HistoryStore::new();
        store.append(entry("a.png", "first")).await;
        assert_eq!(store.get(0).await.unwrap().filename, "a.png");
        assert!(store.get(1).await.is_none());
    }
}
