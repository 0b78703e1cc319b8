/// Configuration for the content tree store
use serde::{Deserialize, Serialize};

/// What happens to a node's previous children when an update replaces them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacedChildren {
    /// Cascade-delete the previous subtree before attaching the new one
    #[default]
    Purge,

    /// Leave the previous descendants in the store, detached from the parent
    /// but still fetchable by their own id
    Retain,
}

/// Store behaviour settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Policy applied to the old subtree on update
    #[serde(default)]
    pub replaced_children: ReplacedChildren,
}

impl StoreConfig {
    /// Config that keeps detached descendants around after an update
    pub fn retaining_replaced_children() -> Self {
        Self {
            replaced_children: ReplacedChildren::Retain,
        }
    }
}
