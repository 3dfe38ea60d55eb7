//! The abstract posts backend a controller is constructed with.

use async_trait::async_trait;

use crate::error::DeckResult;
use crate::period::Period;
use crate::post::{PostDraft, PostId, PostPatch, PostRecord};

/// Posts backend, injected into `CalendarController`.
///
/// Implementations hand back raw wire records; validation happens in the
/// core so that one bad record never sinks a whole fetch. Mutations return
/// the canonical record as confirmed by the backend, which is the only
/// thing the local cache is ever patched with.
#[async_trait]
pub trait PostsGateway: Send + Sync {
    /// All posts scheduled within the given month.
    async fn fetch_period(&self, period: Period) -> DeckResult<Vec<PostRecord>>;

    async fn create_post(&self, draft: &PostDraft) -> DeckResult<PostRecord>;

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> DeckResult<PostRecord>;

    async fn delete_post(&self, id: &PostId) -> DeckResult<()>;

    /// Move a pending post onto the schedule.
    async fn approve_post(&self, id: &PostId) -> DeckResult<PostRecord>;

    /// Drop a pending post from the validation queue.
    async fn reject_post(&self, id: &PostId) -> DeckResult<PostRecord>;
}
