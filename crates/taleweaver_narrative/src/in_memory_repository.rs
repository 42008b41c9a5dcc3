//! In-memory implementation of StoryRepository.
//!
//! Sessions and nodes live in maps behind a single lock, so the two-part
//! commits are atomic. Useful for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use taleweaver_core::{SegmentNode, Session};
use taleweaver_error::{StorageError, StorageErrorKind, StoryError, TaleweaverResult};
use taleweaver_interface::StoryRepository;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory repository for story sessions.
///
/// Clones share the same storage. All data is lost when the last clone is
/// dropped.
///
/// # Example
/// ```no_run
/// use taleweaver_narrative::InMemoryStoryRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemoryStoryRepository::new();
///     assert!(repo.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    store: Arc<RwLock<StoryStore>>,
}

#[derive(Debug, Default)]
struct StoryStore {
    sessions: HashMap<Uuid, Session>,
    nodes: HashMap<Uuid, BTreeMap<u32, SegmentNode>>,
}

impl StoryStore {
    fn check_free(&self, node: &SegmentNode) -> TaleweaverResult<()> {
        let taken = self
            .nodes
            .get(node.session_id())
            .is_some_and(|nodes| nodes.contains_key(node.segment_index()));
        if taken {
            return Err(StorageError::new(StorageErrorKind::Conflict(format!(
                "Segment {} of session {} already exists",
                node.segment_index(),
                node.session_id()
            )))
            .into());
        }
        Ok(())
    }

    fn put_node(&mut self, node: &SegmentNode) {
        self.nodes
            .entry(*node.session_id())
            .or_default()
            .insert(*node.segment_index(), node.clone());
    }

    fn truncate_after(&mut self, session_id: Uuid, segment_index: u32) -> usize {
        match self.nodes.get_mut(&session_id) {
            Some(nodes) => nodes.split_off(&(segment_index + 1)).len(),
            None => 0,
        }
    }
}

impl InMemoryStoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (for testing).
    pub async fn session_count(&self) -> usize {
        self.store.read().await.sessions.len()
    }

    /// Number of nodes stored for a session (for testing).
    pub async fn node_count(&self, session_id: Uuid) -> usize {
        self.store
            .read()
            .await
            .nodes
            .get(&session_id)
            .map_or(0, BTreeMap::len)
    }

    /// Check if the repository is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.sessions.is_empty()
    }

    /// Clear all sessions and nodes (for testing).
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        store.sessions.clear();
        store.nodes.clear();
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn upsert_session(&self, session: &Session) -> TaleweaverResult<()> {
        self.store
            .write()
            .await
            .sessions
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> TaleweaverResult<Session> {
        self.store
            .read()
            .await
            .sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| StoryError::not_found(format!("Session not found: {}", id)).into())
    }

    async fn get_node(
        &self,
        session_id: Uuid,
        segment_index: u32,
    ) -> TaleweaverResult<Option<SegmentNode>> {
        Ok(self
            .store
            .read()
            .await
            .nodes
            .get(&session_id)
            .and_then(|nodes| nodes.get(&segment_index))
            .cloned())
    }

    async fn latest_node(&self, session_id: Uuid) -> TaleweaverResult<Option<SegmentNode>> {
        Ok(self
            .store
            .read()
            .await
            .nodes
            .get(&session_id)
            .and_then(|nodes| nodes.values().next_back())
            .cloned())
    }

    async fn delete_nodes_after(
        &self,
        session_id: Uuid,
        segment_index: u32,
    ) -> TaleweaverResult<usize> {
        Ok(self
            .store
            .write()
            .await
            .truncate_after(session_id, segment_index))
    }

    async fn insert_node(&self, node: &SegmentNode) -> TaleweaverResult<()> {
        let mut store = self.store.write().await;
        store.check_free(node)?;
        store.put_node(node);
        Ok(())
    }

    async fn commit_segment(&self, node: &SegmentNode, session: &Session) -> TaleweaverResult<()> {
        let mut store = self.store.write().await;
        store.check_free(node)?;
        store.put_node(node);
        store.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn commit_rewind(
        &self,
        session: &Session,
        restore_index: u32,
    ) -> TaleweaverResult<usize> {
        let mut store = self.store.write().await;
        let removed = store.truncate_after(session.id, restore_index);
        store.sessions.insert(session.id, session.clone());
        Ok(removed)
    }
}
