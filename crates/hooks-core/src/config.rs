//! Configuration types and loading for block-hooks
//!
//! A configuration file names the document type reconciliation applies to
//! and declares block types with their hook anchors:
//!
//! ```toml
//! [reconcile]
//! document_type = "wp_navigation"
//! root_anchor = "core/navigation"
//! meta_key = "_wp_ignored_hooked_blocks"
//!
//! [[block_types]]
//! name = "tests/my-block"
//!
//! [block_types.block_hooks]
//! "core/navigation" = "last_child"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hooks::RelativePosition;

/// Document type reconciliation applies to by default
pub const DEFAULT_DOCUMENT_TYPE: &str = "wp_navigation";

/// Anchor type of the implicit root of a navigation document
pub const DEFAULT_ROOT_ANCHOR: &str = "core/navigation";

/// Metadata key holding the ignored hooked blocks list
pub const IGNORED_HOOKED_BLOCKS_META_KEY: &str = "_wp_ignored_hooked_blocks";

/// Reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Only documents of this type are reconciled
    #[serde(default = "default_document_type")]
    pub document_type: String,
    /// Block type the document's top-level content is treated as the inner blocks of
    #[serde(default = "default_root_anchor")]
    pub root_anchor: String,
    /// Metadata key the ignore list is stored under
    #[serde(default = "default_meta_key")]
    pub meta_key: String,
}

fn default_document_type() -> String {
    DEFAULT_DOCUMENT_TYPE.to_string()
}

fn default_root_anchor() -> String {
    DEFAULT_ROOT_ANCHOR.to_string()
}

fn default_meta_key() -> String {
    IGNORED_HOOKED_BLOCKS_META_KEY.to_string()
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            document_type: default_document_type(),
            root_anchor: default_root_anchor(),
            meta_key: default_meta_key(),
        }
    }
}

/// A block type and the anchors it hooks onto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTypeConfig {
    /// Namespaced block type, e.g. `tests/my-block`
    pub name: String,
    /// Anchor block type to position
    #[serde(default)]
    pub block_hooks: BTreeMap<String, RelativePosition>,
}

impl BlockTypeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            block_hooks: BTreeMap::new(),
        }
    }

    /// Hook this block type onto `anchor_type` at `position`.
    pub fn hooked_to(mut self, anchor_type: impl Into<String>, position: RelativePosition) -> Self {
        self.block_hooks.insert(anchor_type.into(), position);
        self
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub block_types: Vec<BlockTypeConfig>,
}

impl HooksConfig {
    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(?path, "Loading hooks config");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
