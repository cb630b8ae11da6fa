//! Hooked block reconciliation for block-hooks
//!
//! Hooked blocks are inserted automatically next to anchor blocks. When a
//! user removes one and saves, the removal has to stick. This crate compares
//! a saved document's block tree with what the [`HookRegistry`] expects and
//! records the missing hooked types in the document's ignore-list metadata.
//!
//! # Architecture
//!
//! ```text
//!            Reconciler
//!           /    |     \
//!  hooks-markup  |   MetadataWriter
//!                |
//!          HookRegistry
//! ```
//!
//! # Example
//!
//! ```
//! use hooks_core::{Document, HookRegistry, Reconciler, RelativePosition};
//!
//! let mut registry = HookRegistry::new();
//! registry.register("core/navigation", RelativePosition::LastChild, "tests/my-block");
//!
//! let doc = Document::new()
//!     .with_id(1)
//!     .with_type("wp_navigation")
//!     .with_body(r#"<!-- wp:navigation-link {"label":"News"} /-->"#);
//!
//! let doc = Reconciler::new(&registry).reconcile(doc);
//! assert_eq!(doc.meta("_wp_ignored_hooked_blocks"), Some(r#"["tests/my-block"]"#));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod hooks;
pub mod ignore_list;
pub mod logging;
pub mod reconcile;

pub use config::{
    BlockTypeConfig, DEFAULT_DOCUMENT_TYPE, DEFAULT_ROOT_ANCHOR, HooksConfig,
    IGNORED_HOOKED_BLOCKS_META_KEY, ReconcileConfig,
};
pub use document::Document;
pub use error::{Error, Result};
pub use hooks::{
    AnchorContext, HookAssociation, HookFilter, HookRegistry, HookResolver, RelativePosition,
    Resolution,
};
pub use ignore_list::{IgnoreList, MetadataWriter};
pub use reconcile::Reconciler;

/// Reconcile `document` against `registry` with the default navigation settings.
pub fn update_ignored_hooked_blocks(document: Document, registry: &HookRegistry) -> Document {
    Reconciler::new(registry).reconcile(document)
}
