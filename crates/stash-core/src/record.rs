//! Record model.
//!
//! A [`Record`] is an immutable item in the stash: an id, a creation time and
//! one of four payload variants. Records are never edited in place; they are
//! created by the store's `add` and removed by `delete`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StashError};

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, generated at creation
    pub id: Uuid,

    /// When this record was added (informational)
    pub created_at: DateTime<Utc>,

    /// Typed payload
    pub variant: RecordVariant,
}

impl Record {
    /// Create a record with a fresh id.
    ///
    /// Does not validate; the store validates before inserting.
    pub fn new(variant: RecordVariant) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            variant,
        }
    }

    /// Two records are the same entity iff their ids match.
    pub fn is_same_entity(&self, other: &Record) -> bool {
        self.id == other.id
    }

    pub fn kind(&self) -> RecordKind {
        self.variant.kind()
    }
}

/// Payload of a record.
///
/// Serialized with an explicit `kind` tag so that new variants never change
/// how existing ones decode.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordVariant {
    Text {
        content: String,
    },
    Password {
        secret: String,
        alias: String,
    },
    Image {
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
        alias: String,
    },
    Link {
        url: String,
        alias: String,
    },
}

impl RecordVariant {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn password(secret: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Password {
            secret: secret.into(),
            alias: alias.into(),
        }
    }

    pub fn image(bytes: Vec<u8>, alias: impl Into<String>) -> Self {
        Self::Image {
            bytes,
            alias: alias.into(),
        }
    }

    pub fn link(url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Link {
            url: url.into(),
            alias: alias.into(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Text { .. } => RecordKind::Text,
            Self::Password { .. } => RecordKind::Password,
            Self::Image { .. } => RecordKind::Image,
            Self::Link { .. } => RecordKind::Link,
        }
    }

    /// The alias, for variants that carry one.
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Password { alias, .. } | Self::Image { alias, .. } | Self::Link { alias, .. } => {
                Some(alias)
            }
        }
    }

    /// A one-line label safe to show in lists (never the secret).
    pub fn label(&self) -> &str {
        match self {
            Self::Text { content } => content,
            Self::Password { alias, .. } | Self::Image { alias, .. } | Self::Link { alias, .. } => {
                alias
            }
        }
    }

    /// Check that required fields are present.
    ///
    /// # Errors
    ///
    /// Returns `StashError::Validation` if text, secret or url is blank,
    /// if an alias is blank, or if an image has no bytes.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Text { content } => require("content", content),
            Self::Password { secret, alias } => {
                require("secret", secret)?;
                require("alias", alias)
            }
            Self::Image { bytes, alias } => {
                if bytes.is_empty() {
                    return Err(StashError::Validation("Image is empty".to_string()));
                }
                require("alias", alias)
            }
            Self::Link { url, alias } => {
                require("url", url)?;
                require("alias", alias)
            }
        }
    }

    /// Trim surrounding whitespace from the alias. Other fields are kept as given.
    pub(crate) fn normalized(mut self) -> Self {
        match &mut self {
            Self::Text { .. } => {}
            Self::Password { alias, .. } | Self::Image { alias, .. } | Self::Link { alias, .. } => {
                let trimmed = alias.trim();
                if trimmed.len() != alias.len() {
                    *alias = trimmed.to_string();
                }
            }
        }
        self
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StashError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

impl fmt::Debug for RecordVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { content } => f.debug_struct("Text").field("content", content).finish(),
            Self::Password { alias, .. } => f
                .debug_struct("Password")
                .field("secret", &"[REDACTED]")
                .field("alias", alias)
                .finish(),
            Self::Image { bytes, alias } => f
                .debug_struct("Image")
                .field("bytes", &format_args!("<{} bytes>", bytes.len()))
                .field("alias", alias)
                .finish(),
            Self::Link { url, alias } => f
                .debug_struct("Link")
                .field("url", url)
                .field("alias", alias)
                .finish(),
        }
    }
}

/// Payload-free discriminant of [`RecordVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Text,
    Password,
    Image,
    Link,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Text,
        RecordKind::Password,
        RecordKind::Image,
        RecordKind::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Password => "password",
            RecordKind::Image => "image",
            RecordKind::Link => "link",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = StashError;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StashError::Validation(format!(
                    "Unknown record kind '{}' (expected text, password, image or link)",
                    s
                ))
            })
    }
}

/// Serde adapter storing binary blobs as base64 strings.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
