//! Persistence contract for sessions and segment nodes.

use async_trait::async_trait;
use taleweaver_core::{SegmentNode, Session};
use taleweaver_error::TaleweaverResult;
use uuid::Uuid;

/// Storage for story sessions and their segment nodes.
///
/// A session exclusively owns its nodes. At most one node exists per
/// `(session, segment_index)`.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert or replace a session by id.
    async fn upsert_session(&self, session: &Session) -> TaleweaverResult<()>;

    /// Load a session.
    ///
    /// Fails with a `NotFound` story error when the id is unknown.
    async fn get_session(&self, id: Uuid) -> TaleweaverResult<Session>;

    /// Load the node at `segment_index`, if any.
    async fn get_node(
        &self,
        session_id: Uuid,
        segment_index: u32,
    ) -> TaleweaverResult<Option<SegmentNode>>;

    /// Load the node with the highest index, if any.
    async fn latest_node(&self, session_id: Uuid) -> TaleweaverResult<Option<SegmentNode>>;

    /// Delete every node with an index strictly greater than `segment_index`.
    ///
    /// Returns the number of nodes removed.
    async fn delete_nodes_after(
        &self,
        session_id: Uuid,
        segment_index: u32,
    ) -> TaleweaverResult<usize>;

    /// Insert a node.
    ///
    /// Fails with a `Conflict` storage error when the index is already taken.
    async fn insert_node(&self, node: &SegmentNode) -> TaleweaverResult<()>;

    /// Insert a node and save its session as one unit.
    ///
    /// Either both writes happen or neither does.
    async fn commit_segment(&self, node: &SegmentNode, session: &Session) -> TaleweaverResult<()>;

    /// Truncate nodes after `restore_index` and save the session as one unit.
    ///
    /// Either both writes happen or neither does. Returns the number of nodes
    /// removed.
    async fn commit_rewind(&self, session: &Session, restore_index: u32)
    -> TaleweaverResult<usize>;
}
