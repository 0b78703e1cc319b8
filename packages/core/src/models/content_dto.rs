//! Boundary representation of a content node
//!
//! `ContentDto` is what callers send and receive at the HTTP boundary. Every
//! field is optional on the way in so that missing fields can be reported as
//! validation failures instead of deserialization errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// External-facing content node
///
/// Serialized in camelCase. Repository metadata travels as `jcrMetadata`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub jcr_metadata: Option<HashMap<String, serde_json::Value>>,

    #[serde(default)]
    pub children: Option<Vec<ContentDto>>,
}

impl ContentDto {
    /// Convenience constructor for the four required text fields
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            author: Some(author.into()),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_child(mut self, child: ContentDto) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Children as a slice (empty when absent)
    pub fn children(&self) -> &[ContentDto] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Returns true if the value is absent or contains only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
