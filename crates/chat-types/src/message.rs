use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

/// A single chat message, as served by `/messages` and pushed over `/ws`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned; absent until the server has stored the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub role: Role,
    pub content: String,
    pub user_id: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// A locally-authored message that the server has not confirmed yet
    pub fn optimistic(content: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: None,
            role: Role::User,
            content: content.into(),
            user_id,
            created_at: None,
        }
    }

    pub fn bot(id: i64, content: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: Some(id),
            role: Role::Bot,
            content: content.into(),
            user_id,
            created_at: None,
        }
    }

    /// Decode one inbound live-channel frame
    pub fn from_frame(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Payload sent over the live channel when the user submits a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundFrame {
    pub content: String,
    pub user_id: i64,
}

impl OutboundFrame {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Client-side identifier for a message that has no server id yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalId(pub Uuid);

impl LocalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local-{}", self.0)
    }
}

/// One slot in the message store.
///
/// Pending entries are the optimistic echoes of our own sends. Nothing
/// matches them against server copies today; the tag exists so that a
/// reconciliation pass can be added without changing the store's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEntry {
    Confirmed(Message),
    Pending { local_id: LocalId, message: Message },
}

impl StoreEntry {
    pub fn message(&self) -> &Message {
        match self {
            StoreEntry::Confirmed(message) => message,
            StoreEntry::Pending { message, .. } => message,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, StoreEntry::Pending { .. })
    }

    pub fn local_id(&self) -> Option<LocalId> {
        match self {
            StoreEntry::Confirmed(_) => None,
            StoreEntry::Pending { local_id, .. } => Some(*local_id),
        }
    }
}

/// `created_at` arrives as RFC 3339, as a naive ISO-8601 string (read as
/// UTC), as an empty string, or not at all. Anything else is logged and
/// read as absent; it never fails the surrounding message.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let parsed = match raw.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => {
                let ts = parse(s);
                if ts.is_none() {
                    log::warn!("Ignoring unrecognised timestamp {:?}", s);
                }
                ts
            }
        };
        Ok(parsed)
    }

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
