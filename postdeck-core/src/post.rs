//! Backend-neutral post types.
//!
//! `PostRecord` is the raw shape crossing the gateway boundary. `Post` is
//! the validated cache copy, and `Post::from_record` is the only way to
//! obtain one, so every post held locally has a placeable schedule date.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

/// Backend-assigned post identifier (integer or string, immutable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for PostId {
    fn from(n: i64) -> Self {
        PostId::Number(n)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        PostId::Text(s.to_string())
    }
}

/// Target network for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Twitter,
    Instagram,
    Facebook,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Web,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkedin" => Ok(Platform::Linkedin),
            "twitter" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Post lifecycle state.
///
/// `pending` moves to `scheduled` (approve) or `rejected` (reject);
/// `scheduled` moves to `sent` or `failed` once publishing runs. Deletion
/// removes the post from the cache entirely rather than leaving a
/// tombstone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Scheduled,
    Sent,
    Failed,
    Rejected,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Sent => "sent",
            PostStatus::Failed => "failed",
            PostStatus::Rejected => "rejected",
        }
    }

    /// Whether the lifecycle ends here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PostStatus::Sent | PostStatus::Failed | PostStatus::Rejected)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PostStatus::Pending),
            "scheduled" => Ok(PostStatus::Scheduled),
            "sent" => Ok(PostStatus::Sent),
            "failed" => Ok(PostStatus::Failed),
            "rejected" => Ok(PostStatus::Rejected),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// When a post goes out, with its timezone context.
///
/// The date component in the post's own zone or offset is what places it
/// on the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScheduledAt {
    /// RFC 3339 timestamp with an explicit UTC offset.
    Fixed(DateTime<FixedOffset>),
    /// Instant pinned to an IANA timezone.
    Zoned { datetime: DateTime<Tz> },
    /// Timestamp without any offset; the wall-clock values are taken as written.
    Floating(NaiveDateTime),
}

impl ScheduledAt {
    /// Parse a wire timestamp plus an optional IANA zone name.
    pub fn parse(raw: &str, timezone: Option<&str>) -> Result<ScheduledAt, String> {
        if let Some(name) = timezone {
            let tz: Tz = name
                .parse()
                .map_err(|_| format!("unknown timezone '{name}'"))?;

            if let Ok(fixed) = DateTime::parse_from_rfc3339(raw) {
                return Ok(ScheduledAt::Zoned {
                    datetime: fixed.with_timezone(&tz),
                });
            }

            let naive = parse_naive(raw)?;
            return match tz.from_local_datetime(&naive) {
                LocalResult::Single(datetime) => Ok(ScheduledAt::Zoned { datetime }),
                LocalResult::Ambiguous(datetime, _) => Ok(ScheduledAt::Zoned { datetime }),
                LocalResult::None => Err(format!("nonexistent local time '{raw}' in {name}")),
            };
        }

        if let Ok(fixed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ScheduledAt::Fixed(fixed));
        }

        parse_naive(raw).map(ScheduledAt::Floating)
    }

    /// Calendar date in the post's own zone; this is what the grid keys on.
    pub fn date(&self) -> NaiveDate {
        match self {
            ScheduledAt::Fixed(dt) => dt.date_naive(),
            ScheduledAt::Zoned { datetime } => datetime.date_naive(),
            ScheduledAt::Floating(dt) => dt.date(),
        }
    }

    pub fn time(&self) -> NaiveTime {
        match self {
            ScheduledAt::Fixed(dt) => dt.time(),
            ScheduledAt::Zoned { datetime } => datetime.time(),
            ScheduledAt::Floating(dt) => dt.time(),
        }
    }

    /// The absolute instant. Floating timestamps are read as UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            ScheduledAt::Fixed(dt) => dt.with_timezone(&Utc),
            ScheduledAt::Zoned { datetime } => datetime.with_timezone(&Utc),
            ScheduledAt::Floating(dt) => Utc.from_utc_datetime(dt),
        }
    }
}

fn parse_naive(raw: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];

    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    Err(format!("unparseable timestamp '{raw}'"))
}

/// A cached copy of a backend post.
///
/// The backend stays the source of truth; instances are only built from
/// confirmed server responses, never from unconfirmed local edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub scheduled_at: ScheduledAt,
    pub status: PostStatus,
    pub hashtags: Vec<String>,
    pub engagement: Option<i64>,
    pub reach: Option<i64>,
}

impl Post {
    /// Validate a wire record. A record without a parseable schedule date,
    /// platform or status fails here and never reaches the store.
    pub fn from_record(record: PostRecord) -> DeckResult<Post> {
        let PostRecord {
            id,
            title,
            content,
            platform,
            scheduled_at,
            timezone,
            status,
            hashtags,
            engagement,
            reach,
        } = record;

        let platform = platform
            .parse::<Platform>()
            .map_err(|reason| DeckError::MalformedPost { id: id.to_string(), reason })?;
        let status = status
            .parse::<PostStatus>()
            .map_err(|reason| DeckError::MalformedPost { id: id.to_string(), reason })?;
        let scheduled_at = ScheduledAt::parse(&scheduled_at, timezone.as_deref())
            .map_err(|reason| DeckError::MalformedPost { id: id.to_string(), reason })?;

        Ok(Post {
            id,
            title,
            content,
            platform,
            scheduled_at,
            status,
            hashtags,
            engagement,
            reach,
        })
    }

    /// Grid placement date.
    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }
}

/// Raw post shape as exchanged with the backend, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub platform: String,
    #[serde(alias = "scheduled_date")]
    pub scheduled_at: String,
    #[serde(default)]
    pub timezone: Option<String>,
    pub status: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub engagement: Option<i64>,
    #[serde(default)]
    pub reach: Option<i64>,
}

/// Shape for creating a new post. The backend assigns the id and answers
/// with the canonical record.
#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub scheduled_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.platform.is_none()
            && self.scheduled_at.is_none()
            && self.timezone.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scheduled_at: &str, timezone: Option<&str>) -> PostRecord {
        PostRecord {
            id: PostId::Number(1),
            title: "Launch announcement".to_string(),
            content: "We are live.".to_string(),
            platform: "linkedin".to_string(),
            scheduled_at: scheduled_at.to_string(),
            timezone: timezone.map(String::from),
            status: "scheduled".to_string(),
            hashtags: vec![],
            engagement: None,
            reach: None,
        }
    }

    #[test]
    fn test_parse_fixed_offset_keeps_local_date() {
        let post = Post::from_record(record("2024-03-15T23:30:00+01:00", None)).unwrap();
        assert_eq!(
            post.scheduled_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_zoned_converts_instant_into_zone() {
        // 03:00 UTC on the 16th is still the evening of the 15th in New York.
        let post = Post::from_record(record("2024-03-16T03:00:00Z", Some("America/New_York"))).unwrap();
        assert_eq!(
            post.scheduled_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_floating_takes_date_as_written() {
        let post = Post::from_record(record("2024-03-15T10:00", None)).unwrap();
        assert_eq!(
            post.scheduled_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(post.scheduled_at.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_unparseable_timestamp_is_malformed() {
        let err = Post::from_record(record("sometime soon", None)).unwrap_err();
        assert!(matches!(err, DeckError::MalformedPost { .. }));
    }

    #[test]
    fn test_unknown_platform_is_malformed() {
        let mut rec = record("2024-03-15T10:00:00+01:00", None);
        rec.platform = "myspace".to_string();
        let err = Post::from_record(rec).unwrap_err();
        assert!(matches!(err, DeckError::MalformedPost { .. }));
    }

    #[test]
    fn test_unknown_timezone_is_malformed() {
        let err =
            Post::from_record(record("2024-03-15T10:00:00Z", Some("Mars/Olympus"))).unwrap_err();
        assert!(matches!(err, DeckError::MalformedPost { .. }));
    }

    #[test]
    fn test_record_accepts_legacy_scheduled_date_field() {
        let rec: PostRecord = serde_json::from_str(
            r#"{"id": 4, "title": "t", "platform": "twitter",
                "scheduled_date": "2024-05-01T09:00:00+00:00", "status": "pending"}"#,
        )
        .unwrap();
        assert_eq!(rec.scheduled_at, "2024-05-01T09:00:00+00:00");
        let post = Post::from_record(rec).unwrap();
        assert_eq!(post.status, PostStatus::Pending);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = PostPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "New title" }));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!PostStatus::Pending.is_terminal());
        assert!(!PostStatus::Scheduled.is_terminal());
        assert!(PostStatus::Sent.is_terminal());
        assert!(PostStatus::Failed.is_terminal());
        assert!(PostStatus::Rejected.is_terminal());
    }
}
