//! Folding confirmed backend mutations into the local cache.

use crate::post::{Post, PostId};
use crate::store::PostStore;

/// The confirmed result of a single mutating action.
///
/// Outcomes exist only for calls the backend has acknowledged; a failed
/// call produces no outcome and therefore no local mutation, so the cache
/// never drifts ahead of the server.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Created(Post),
    Updated(Post),
    Deleted(PostId),
    Approved(Post),
    Rejected(Post),
}

impl ActionOutcome {
    /// Patch the cache in place.
    ///
    /// Every outcome is expressible as a local patch, so no refetch is
    /// required: a rescheduled post lands on its new date at the next
    /// render because placement is computed from the post itself.
    pub fn apply(self, store: &mut PostStore) {
        match self {
            ActionOutcome::Created(post)
            | ActionOutcome::Updated(post)
            | ActionOutcome::Approved(post)
            | ActionOutcome::Rejected(post) => store.upsert(post),
            ActionOutcome::Deleted(id) => {
                store.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{PostRecord, PostStatus};

    fn post(id: i64, status: &str) -> Post {
        Post::from_record(PostRecord {
            id: PostId::Number(id),
            title: format!("post {id}"),
            content: "body".to_string(),
            platform: "instagram".to_string(),
            scheduled_at: "2024-03-15T10:00:00+01:00".to_string(),
            timezone: None,
            status: status.to_string(),
            hashtags: vec![],
            engagement: None,
            reach: None,
        })
        .unwrap()
    }

    #[test]
    fn test_created_outcome_inserts() {
        let mut store = PostStore::new();
        ActionOutcome::Created(post(1, "scheduled")).apply(&mut store);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_approved_outcome_overwrites_status_in_place() {
        let mut store = PostStore::new();
        store.upsert(post(1, "pending"));

        ActionOutcome::Approved(post(1, "scheduled")).apply(&mut store);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&PostId::Number(1)).unwrap().status,
            PostStatus::Scheduled
        );
    }

    #[test]
    fn test_deleted_outcome_removes_the_entity() {
        let mut store = PostStore::new();
        store.upsert(post(1, "scheduled"));
        store.upsert(post(2, "scheduled"));

        ActionOutcome::Deleted(PostId::Number(1)).apply(&mut store);

        assert_eq!(store.len(), 1);
        assert!(store.get(&PostId::Number(1)).is_none());
    }

    #[test]
    fn test_deleting_an_absent_id_changes_nothing() {
        let mut store = PostStore::new();
        store.upsert(post(2, "scheduled"));

        ActionOutcome::Deleted(PostId::Number(7)).apply(&mut store);

        assert_eq!(store.len(), 1);
    }
}
