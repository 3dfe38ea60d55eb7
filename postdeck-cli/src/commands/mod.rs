pub mod approve;
pub mod delete;
pub mod edit;
pub mod month;
pub mod new;
pub mod pending;
pub mod reject;
pub mod today;

use postdeck_core::PostId;

/// Ids are numeric on the current backend, but the API allows string ids.
pub fn parse_post_id(raw: &str) -> PostId {
    raw.parse::<i64>()
        .map(PostId::Number)
        .unwrap_or_else(|_| PostId::Text(raw.to_string()))
}
