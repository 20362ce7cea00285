use serde_json::{Map, Value};

/// Suggested refresh interval for the following-shots feed (6 hours)
pub const FOLLOWING_FEED_TTL_SECS: u32 = 21600;

/// Single-level view of a shot; nested keys joined with `_`
pub type FlattenedRecord = Map<String, Value>;

/// One RSS `<item>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// HTML fragment, written as escaped text
    pub content: String,
    pub link: String,
    pub guid: String,
    pub pub_date: String,
}

impl FeedItem {
    /// Items have no identity scheme of their own: the guid is the link.
    pub fn new(title: String, content: String, link: String, pub_date: String) -> Self {
        Self {
            title,
            content,
            guid: link.clone(),
            link,
            pub_date,
        }
    }
}

/// RSS `<channel>`. Fields left at their default render as empty tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub link: String,
    pub build_date: String,
    pub pub_date: String,
    pub ttl: Option<u32>,
    pub items: Vec<FeedItem>,
}

/// String view of a JSON field; absent and `null` give `""`, other scalars their JSON text.
pub fn field_str(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
