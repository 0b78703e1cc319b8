//! Content Node Data Structures
//!
//! This module defines the internal `Node` struct used by the tree store and
//! the content service. A node is a unit of page content (title, body, author,
//! tags) that can own an ordered list of child nodes of the same shape.
//!
//! # Repository Metadata
//!
//! Every stored node carries a `metadata` map that simulates the bookkeeping
//! of a JCR-style content repository:
//!
//! - `jcr:primaryType` - always `nt:unstructured`
//! - `jcr:created` - creation timestamp of this node
//! - `jcr:lastModified` - last update timestamp of this node (after an update)
//!
//! # Examples
//!
//! ```rust
//! use contentspace_core::models::Node;
//!
//! let page = Node::new("Home", "Welcome", "Admin", "/content/site/home")
//!     .with_tags(vec!["news".to_string()])
//!     .with_child(Node::new("Intro", "Hello", "Admin", "/content/site/home/intro"));
//!
//! assert!(page.id.is_empty());
//! assert_eq!(page.children.len(), 1);
//! assert_eq!(page.subtree_size(), 2);
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key for the repository node type
pub const PRIMARY_TYPE_KEY: &str = "jcr:primaryType";

/// Metadata key for the creation timestamp
pub const CREATED_KEY: &str = "jcr:created";

/// Metadata key for the last modification timestamp
pub const LAST_MODIFIED_KEY: &str = "jcr:lastModified";

/// Primary type assigned to every stored node
pub const UNSTRUCTURED_PRIMARY_TYPE: &str = "nt:unstructured";

/// Maximum number of tags a node may carry
pub const MAX_TAGS: usize = 10;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// Format a timestamp the same way it appears in serialized JSON
///
/// Metadata timestamps must compare equal to the serialized `createdAt` /
/// `updatedAt` fields, so both go through RFC 3339 with a `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Build the metadata map for a freshly created node
pub fn creation_metadata(created_at: &DateTime<Utc>) -> HashMap<String, serde_json::Value> {
    let mut metadata = HashMap::new();
    metadata.insert(
        PRIMARY_TYPE_KEY.to_string(),
        serde_json::Value::String(UNSTRUCTURED_PRIMARY_TYPE.to_string()),
    );
    metadata.insert(
        CREATED_KEY.to_string(),
        serde_json::Value::String(format_timestamp(created_at)),
    );
    metadata
}

/// Internal content node.
///
/// # Fields
///
/// - `id`: Store-assigned identifier (empty until the node is saved)
/// - `title`, `body`, `author`: Required text fields
/// - `tags`: Ordered tags (at most [`MAX_TAGS`], enforced at the boundary)
/// - `created_at` / `updated_at`: Store-assigned timestamps (`None` on input)
/// - `path`: Logical placement, opaque to the store
/// - `metadata`: Store-managed repository bookkeeping
/// - `children`: Ordered child nodes
///
/// Nodes returned by the store are always independent copies: mutating one
/// never affects stored state or any other returned node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier, assigned by the store on save
    pub id: String,

    pub title: String,

    pub body: String,

    pub author: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp (populated by the store)
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification timestamp (populated by the store)
    pub updated_at: Option<DateTime<Utc>>,

    pub path: String,

    /// Repository bookkeeping (see module docs for keys)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Child nodes in insertion order
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create an unsaved node with no tags, metadata or children
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author: author.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Replace the tags of this node (builder style)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Append a child node (builder style)
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including this node
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }

    /// Collect the ids of this node and all descendants in pre-order
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.subtree_size());
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<String>) {
        ids.push(self.id.clone());
        for child in &self.children {
            child.collect_ids(ids);
        }
    }
}
