//! Core types for the postdeck ecosystem.
//!
//! This crate holds the calendar view-state logic shared by every postdeck
//! front end:
//! - `grid` for the pure month-grid date math
//! - `store` for the in-memory post cache
//! - `controller` for period navigation, fetching and view-model projection
//! - `reconcile` for folding confirmed backend mutations into the cache
//! - `gateway` for the abstract posts backend a controller is built around

pub mod controller;
pub mod error;
pub mod gateway;
pub mod grid;
pub mod period;
pub mod post;
pub mod reconcile;
pub mod store;

pub use controller::{CalendarController, Phase, ViewCell, ViewModel};
pub use error::{DeckError, DeckResult};
pub use gateway::PostsGateway;
pub use grid::{CalendarCell, month_grid};
pub use period::Period;
pub use post::{
    Platform, Post, PostDraft, PostId, PostPatch, PostRecord, PostStatus, ScheduledAt,
};
pub use reconcile::ActionOutcome;
pub use store::PostStore;
