//! In-memory cache of posts for the displayed period.

use chrono::NaiveDate;

use crate::post::{Post, PostId, PostStatus};

/// Cache of the posts currently held for display, in insertion order.
///
/// The backend is the source of truth; the cache is replaced wholesale on
/// every period change and patched locally after confirmed mutations.
/// Collections stay at one-month scale, so lookups are plain scans.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new() -> PostStore {
        PostStore::default()
    }

    /// Drop everything and take `posts` as the new contents.
    /// Duplicate ids collapse to the last occurrence.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts.clear();
        for post in posts {
            self.upsert(post);
        }
    }

    /// Insert, or overwrite the entry with the same id in place.
    pub fn upsert(&mut self, post: Post) {
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post,
            None => self.posts.push(post),
        }
    }

    /// Remove by id. An absent id is a no-op, not an error.
    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        let index = self.posts.iter().position(|p| &p.id == id)?;
        Some(self.posts.remove(index))
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts whose schedule date falls on `date`, in insertion order.
    pub fn by_date(&self, date: NaiveDate) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.scheduled_date() == date)
            .collect()
    }

    pub fn by_status(&self, status: PostStatus) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.status == status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostRecord;
    use chrono::Datelike;

    fn post(id: i64, scheduled_at: &str) -> Post {
        Post::from_record(PostRecord {
            id: PostId::Number(id),
            title: format!("post {id}"),
            content: "body".to_string(),
            platform: "twitter".to_string(),
            scheduled_at: scheduled_at.to_string(),
            timezone: None,
            status: "scheduled".to_string(),
            hashtags: vec![],
            engagement: None,
            reach: None,
        })
        .unwrap()
    }

    #[test]
    fn test_replace_all_discards_previous_contents() {
        let mut store = PostStore::new();
        store.replace_all(vec![post(1, "2024-03-01T09:00:00Z")]);
        store.replace_all(vec![
            post(2, "2024-04-01T09:00:00Z"),
            post(3, "2024-04-02T09:00:00Z"),
        ]);

        let ids: Vec<_> = store.all().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![PostId::Number(2), PostId::Number(3)]);
    }

    #[test]
    fn test_replace_all_with_duplicate_ids_keeps_the_last() {
        let mut store = PostStore::new();
        let mut newer = post(1, "2024-03-01T09:00:00Z");
        newer.title = "newer".to_string();
        store.replace_all(vec![post(1, "2024-03-01T09:00:00Z"), newer]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&PostId::Number(1)).unwrap().title, "newer");
    }

    #[test]
    fn test_upsert_overwrites_without_growing() {
        let mut store = PostStore::new();
        store.upsert(post(1, "2024-03-01T09:00:00Z"));

        let mut updated = post(1, "2024-03-20T09:00:00Z");
        updated.title = "moved".to_string();
        store.upsert(updated);

        assert_eq!(store.len(), 1);
        let held = store.get(&PostId::Number(1)).unwrap();
        assert_eq!(held.title, "moved");
        assert_eq!(held.scheduled_date().day(), 20);
    }

    #[test]
    fn test_remove_unknown_id_is_a_noop() {
        let mut store = PostStore::new();
        store.upsert(post(1, "2024-03-01T09:00:00Z"));

        assert!(store.remove(&PostId::Number(99)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_by_date_keeps_insertion_order() {
        let mut store = PostStore::new();
        store.upsert(post(5, "2024-03-15T18:00:00Z"));
        store.upsert(post(2, "2024-03-15T08:00:00Z"));
        store.upsert(post(9, "2024-03-16T08:00:00Z"));

        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let ids: Vec<_> = store.by_date(date).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![PostId::Number(5), PostId::Number(2)]);
    }

    #[test]
    fn test_by_status_filters() {
        let mut store = PostStore::new();
        let mut pending = post(1, "2024-03-01T09:00:00Z");
        pending.status = PostStatus::Pending;
        store.upsert(pending);
        store.upsert(post(2, "2024-03-02T09:00:00Z"));

        assert_eq!(store.by_status(PostStatus::Pending).len(), 1);
        assert_eq!(store.by_status(PostStatus::Scheduled).len(), 1);
        assert!(store.by_status(PostStatus::Failed).is_empty());
    }
}
