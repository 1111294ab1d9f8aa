pub mod kind;
pub mod parser;
pub mod scanner;
pub mod tree;

use dashmap::DashMap;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

pub use kind::SyntaxKind;
pub use tree::{Child, ListId, Node, NodeData, NodeId, NodeList, SyntaxTree};

/// Thread-safe store of parsed syntax trees keyed by file path.
pub struct DocumentTrees {
    snapshots: DashMap<PathBuf, Arc<SyntaxTree>>,
}

impl DocumentTrees {
    pub fn new() -> Self {
        Self {
            snapshots: DashMap::new(),
        }
    }

    /// Full parse of a document, replacing any existing snapshot.
    pub fn parse_and_store(
        &self,
        path: &Path,
        source: &str,
    ) {
        self.snapshots.insert(path.to_path_buf(), Arc::new(SyntaxTree::parse(source)));
    }

    /// Get an Arc-cloned snapshot. No lock held after return.
    pub fn get(
        &self,
        path: &Path,
    ) -> Option<Arc<SyntaxTree>> {
        self.snapshots.get(path).map(|entry| entry.clone())
    }

    pub fn remove(
        &self,
        path: &Path,
    ) {
        self.snapshots.remove(path);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Paths currently stored, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.snapshots.iter().map(|entry| entry.key().clone()).collect();
        paths.sort();
        paths
    }
}

impl Default for DocumentTrees {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/document_trees_tests.rs"]
mod tests;
