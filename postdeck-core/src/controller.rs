//! Calendar view-state controller.
//!
//! A `CalendarController` owns the displayed period and the post cache,
//! talks to an injected [`PostsGateway`], and publishes a render-ready
//! [`ViewModel`] whenever a fetch lands or a confirmed mutation is
//! applied. Any presentation layer (terminal, HTML, test harness)
//! consumes the same view model.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::DeckResult;
use crate::gateway::PostsGateway;
use crate::grid::month_grid;
use crate::period::Period;
use crate::post::{Post, PostDraft, PostId, PostPatch, PostRecord, PostStatus};
use crate::reconcile::ActionOutcome;
use crate::store::PostStore;

/// Where the controller currently is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// One rendered grid square with its posts attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub posts: Vec<Post>,
}

/// Render-ready projection of the controller state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub period: Period,
    pub phase: Phase,
    pub cells: Vec<ViewCell>,
    /// Records dropped from the last successful fetch because they failed
    /// validation.
    pub skipped: usize,
}

struct Inner {
    period: Period,
    store: PostStore,
    phase: Phase,
    skipped: usize,
}

/// Coordinates period navigation, fetching and cache reconciliation.
///
/// Fetches are serialized by a sequence token: a navigation issued while
/// an earlier fetch is still in flight supersedes it, and the stale
/// response is discarded when it eventually resolves. The cache is only
/// ever mutated from resolved calls, never optimistically.
pub struct CalendarController {
    gateway: Arc<dyn PostsGateway>,
    inner: Mutex<Inner>,
    fetch_seq: AtomicU64,
    week_start: Weekday,
    changed: watch::Sender<ViewModel>,
}

impl CalendarController {
    /// Controller starting at the current real-world month.
    pub fn new(gateway: Arc<dyn PostsGateway>) -> CalendarController {
        Self::starting_at(gateway, Period::current())
    }

    /// Controller pinned to a given starting period.
    pub fn starting_at(gateway: Arc<dyn PostsGateway>, period: Period) -> CalendarController {
        let inner = Inner {
            period,
            store: PostStore::new(),
            phase: Phase::Idle,
            skipped: 0,
        };
        let (changed, _) = watch::channel(Self::project(&inner, Weekday::Sun));

        CalendarController {
            gateway,
            inner: Mutex::new(inner),
            fetch_seq: AtomicU64::new(0),
            week_start: Weekday::Sun,
            changed,
        }
    }

    /// First column of the rendered grid (default Sunday).
    pub fn with_week_start(mut self, week_start: Weekday) -> CalendarController {
        self.week_start = week_start;
        let refreshed = Self::project(&self.lock(), week_start);
        self.changed.send_replace(refreshed);
        self
    }

    pub fn period(&self) -> Period {
        self.lock().period
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Posts waiting in the validation queue.
    pub fn pending(&self) -> Vec<Post> {
        self.lock()
            .store
            .by_status(PostStatus::Pending)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Receiver that sees a fresh view model on every transition to
    /// `Ready` or `Error`, so rendering layers redraw without polling.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.changed.subscribe()
    }

    /// Current grid with posts attached. Callable in any phase; while a
    /// fetch is in flight this still shows the previous data, so the view
    /// never flashes to empty.
    pub fn view_model(&self) -> ViewModel {
        Self::project(&self.lock(), self.week_start)
    }

    /// Fetch the starting period. Idle -> Loading -> Ready, or Error with
    /// the previous (possibly empty) grid retained.
    pub async fn initialize(&self) -> DeckResult<()> {
        self.load().await
    }

    /// Move the displayed period by `delta` months (wrapping the year) and
    /// refetch. A newer navigation supersedes any fetch still in flight.
    pub async fn navigate(&self, delta: i32) -> DeckResult<()> {
        {
            let mut inner = self.lock();
            inner.period = inner.period.shift(delta);
        }
        self.load().await
    }

    /// Refetch the current period without moving it.
    pub async fn refresh(&self) -> DeckResult<()> {
        self.load().await
    }

    /// Create a post; the cache picks up the backend's canonical copy.
    pub async fn create(&self, draft: &PostDraft) -> DeckResult<Post> {
        let record = self.gateway.create_post(draft).await?;
        self.confirm(ActionOutcome::Created, record)
    }

    /// Update a post. If the schedule date moved, the post shows up on its
    /// new cell at the next render; there is no separate "move" operation.
    pub async fn update(&self, id: &PostId, patch: &PostPatch) -> DeckResult<Post> {
        let record = self.gateway.update_post(id, patch).await?;
        self.confirm(ActionOutcome::Updated, record)
    }

    /// Delete a post. The local copy goes away only after the backend
    /// confirms; a failed call leaves the cache exactly as it was.
    pub async fn delete(&self, id: &PostId) -> DeckResult<()> {
        self.gateway.delete_post(id).await?;

        let mut inner = self.lock();
        ActionOutcome::Deleted(id.clone()).apply(&mut inner.store);
        self.publish(&inner);
        Ok(())
    }

    /// Approve a pending post; the backend answers with it rescheduled.
    pub async fn approve(&self, id: &PostId) -> DeckResult<Post> {
        let record = self.gateway.approve_post(id).await?;
        self.confirm(ActionOutcome::Approved, record)
    }

    /// Reject a pending post.
    pub async fn reject(&self, id: &PostId) -> DeckResult<Post> {
        let record = self.gateway.reject_post(id).await?;
        self.confirm(ActionOutcome::Rejected, record)
    }

    async fn load(&self) -> DeckResult<()> {
        let token = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let period = {
            let mut inner = self.lock();
            inner.phase = Phase::Loading;
            inner.period
        };
        debug!(%period, token, "fetching posts");

        let fetched = self.gateway.fetch_period(period).await;

        let mut inner = self.lock();
        if token != self.fetch_seq.load(Ordering::SeqCst) {
            // a newer navigation owns the view now
            debug!(%period, token, "fetch superseded, discarding response");
            return Ok(());
        }

        match fetched {
            Ok(records) => {
                let (posts, skipped) = validate(records);
                inner.store.replace_all(posts);
                inner.skipped = skipped;
                inner.phase = Phase::Ready;
                self.publish(&inner);
                Ok(())
            }
            Err(err) => {
                // stale data stays visible until a retry succeeds
                inner.phase = Phase::Error;
                warn!(%period, error = %err, "fetch failed, keeping previous posts");
                self.publish(&inner);
                Err(err)
            }
        }
    }

    fn confirm(&self, outcome: fn(Post) -> ActionOutcome, record: PostRecord) -> DeckResult<Post> {
        let post = Post::from_record(record)?;

        let mut inner = self.lock();
        outcome(post.clone()).apply(&mut inner.store);
        self.publish(&inner);
        Ok(post)
    }

    fn publish(&self, inner: &Inner) {
        self.changed.send_replace(Self::project(inner, self.week_start));
    }

    fn project(inner: &Inner, week_start: Weekday) -> ViewModel {
        let cells = month_grid(inner.period, week_start)
            .into_iter()
            .map(|cell| ViewCell {
                date: cell.date,
                in_month: cell.in_month,
                posts: inner.store.by_date(cell.date).into_iter().cloned().collect(),
            })
            .collect();

        ViewModel {
            period: inner.period,
            phase: inner.phase,
            cells,
            skipped: inner.skipped,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // recover the guard on poisoning; the cache is still structurally valid
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Split a fetch into usable posts and a count of skipped records.
fn validate(records: Vec<PostRecord>) -> (Vec<Post>, usize) {
    let total = records.len();
    let posts: Vec<Post> = records
        .into_iter()
        .filter_map(|record| match Post::from_record(record) {
            Ok(post) => Some(post),
            Err(err) => {
                warn!(error = %err, "skipping malformed post record");
                None
            }
        })
        .collect();

    let skipped = total - posts.len();
    (posts, skipped)
}
