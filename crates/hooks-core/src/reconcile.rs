//! Reconciliation of hooked blocks against a saved document
//!
//! On save, every anchor position in the document's block tree is compared
//! with what the [`HookRegistry`] expects there. Hooked types that are
//! expected but missing were removed by the user; they are added to the
//! document's ignore list so they are not inserted again.

use hooks_markup::{Block, BlockTree, parse_blocks, serialize_blocks};

use crate::config::ReconcileConfig;
use crate::document::Document;
use crate::error::Result;
use crate::hooks::{AnchorContext, HookRegistry, RelativePosition};
use crate::ignore_list::{IgnoreList, MetadataWriter};

/// Compares documents against a hook registry.
#[derive(Debug, Clone)]
pub struct Reconciler<'r> {
    registry: &'r HookRegistry,
    config: ReconcileConfig,
}

impl<'r> Reconciler<'r> {
    /// Create a reconciler with the default navigation settings.
    pub fn new(registry: &'r HookRegistry) -> Self {
        Self::with_config(registry, ReconcileConfig::default())
    }

    pub fn with_config(registry: &'r HookRegistry, config: ReconcileConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Check if a document is eligible: target type, saved, and with a body.
    pub fn is_applicable(&self, document: &Document) -> bool {
        document.document_type.as_deref() == Some(self.config.document_type.as_str())
            && document.id.is_some()
            && document.body.is_some()
    }

    /// Reconcile a document and return the updated snapshot.
    ///
    /// When absent hooked types are found, the body is replaced by its
    /// canonical serialization and the types not yet ignored are merged into
    /// the ignore list. In every other case, including unparseable markup
    /// and a corrupt ignore list, the document comes back unchanged.
    pub fn reconcile(&self, mut document: Document) -> Document {
        if !self.is_applicable(&document) {
            tracing::debug!(
                id = ?document.id,
                document_type = ?document.document_type,
                "Document not eligible for hooked block reconciliation"
            );
            return document;
        }

        let tree = match document.body.as_deref().map(parse_blocks) {
            Some(Ok(tree)) => tree,
            Some(Err(e)) => {
                tracing::debug!(id = ?document.id, error = %e, "Body is not valid block markup, leaving it untouched");
                return document;
            }
            None => return document,
        };

        let absent = self.detect(&tree, &document);
        if absent.is_empty() {
            return document;
        }

        let writer = MetadataWriter::new(&self.config.meta_key);
        match writer.apply(&mut document, &absent) {
            Ok(added) => {
                if added.is_empty() {
                    tracing::debug!(id = ?document.id, "All absent hooked blocks already ignored");
                } else {
                    tracing::info!(id = ?document.id, ?added, "Ignoring removed hooked blocks");
                }
                document.body = Some(serialize_blocks(&tree));
            }
            Err(e) => {
                tracing::warn!(id = ?document.id, error = %e, "Cannot update ignored hooked blocks");
            }
        }

        document
    }

    /// Hooked types expected somewhere in the document's body but absent.
    ///
    /// Returns an empty list for documents that are not eligible.
    ///
    /// # Errors
    /// Returns an error when the body is not valid block markup.
    pub fn absent_hooked_types(&self, document: &Document) -> Result<Vec<String>> {
        match document.body.as_deref() {
            Some(body) if self.is_applicable(document) => {
                let tree = parse_blocks(body)?;
                Ok(self.detect(&tree, document))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Hooked types expected in `tree` but absent, in detection order.
    ///
    /// The implicit root anchors `first_child` and `last_child` as the
    /// configured root type. Every block anchors `before` and `after`;
    /// non-void blocks also anchor `first_child` and `last_child`.
    pub fn detect(&self, tree: &BlockTree, document: &Document) -> Vec<String> {
        let mut absent = IgnoreList::new();
        let top_level: Vec<&Block> = tree.blocks().collect();

        for position in &RelativePosition::CHILD {
            let context = AnchorContext {
                anchor_type: &self.config.root_anchor,
                position,
                anchor: None,
                document,
            };
            self.check_position(&context, neighbours(position, &top_level), &mut absent);
        }

        self.visit(&top_level, document, &mut absent);
        absent.into_vec()
    }

    fn visit(&self, siblings: &[&Block], document: &Document, absent: &mut IgnoreList) {
        for (index, &block) in siblings.iter().enumerate() {
            let children: Vec<&Block> = block.children().collect();

            for position in RelativePosition::SIBLING.iter().chain(&RelativePosition::CHILD) {
                if position.is_child() && block.is_void() {
                    continue;
                }
                let context = AnchorContext {
                    anchor_type: &block.name,
                    position,
                    anchor: Some(block),
                    document,
                };
                let adjacent = match position {
                    RelativePosition::Before => &siblings[..index],
                    RelativePosition::After => &siblings[index + 1..],
                    _ => children.as_slice(),
                };
                self.check_position(&context, neighbours(position, adjacent), absent);
            }

            self.visit(&children, document, absent);
        }
    }

    /// Record expected types missing from the run of blocks next to the anchor.
    fn check_position<'b>(
        &self,
        context: &AnchorContext<'_>,
        neighbours: impl Iterator<Item = &'b Block>,
        absent: &mut IgnoreList,
    ) {
        let expected = self.registry.resolve(context);
        if expected.is_empty() {
            return;
        }

        let present: Vec<&str> = neighbours
            .map(|block| block.name.as_str())
            .take_while(|name| expected.iter().any(|t| t == *name))
            .collect();

        for hooked_type in expected {
            if !present.contains(&hooked_type.as_str()) {
                tracing::debug!(
                    anchor = context.anchor_type,
                    position = %context.position,
                    %hooked_type,
                    "Hooked block absent"
                );
                absent.insert(hooked_type);
            }
        }
    }
}

/// Blocks in `candidates` ordered outward from the anchor.
///
/// `candidates` are the siblings on the relevant side, or the anchor's
/// children for child positions.
fn neighbours<'a, 'b>(
    position: &RelativePosition,
    candidates: &'a [&'b Block],
) -> Box<dyn Iterator<Item = &'b Block> + 'a> {
    match position {
        RelativePosition::Before | RelativePosition::LastChild => {
            Box::new(candidates.iter().rev().copied())
        }
        RelativePosition::After | RelativePosition::FirstChild => {
            Box::new(candidates.iter().copied())
        }
        RelativePosition::Custom(_) => Box::new(std::iter::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(anchor: &str, position: RelativePosition, hooked: &str) -> HookRegistry {
        let mut registry = HookRegistry::new();
        registry.register(anchor, position, hooked);
        registry
    }

    fn detect(registry: &HookRegistry, markup: &str) -> Vec<String> {
        let tree = parse_blocks(markup).unwrap();
        Reconciler::new(registry).detect(&tree, &Document::new())
    }

    #[test]
    fn test_hooked_block_present_as_last_child() {
        let registry = registry_with("core/group", RelativePosition::LastChild, "x/h");
        let markup = "<!-- wp:group --><!-- wp:paragraph /--><!-- wp:x/h /--><!-- /wp:group -->";
        assert!(detect(&registry, markup).is_empty());
    }

    #[test]
    fn test_hooked_block_not_last_is_absent() {
        let registry = registry_with("core/group", RelativePosition::LastChild, "x/h");
        let markup = "<!-- wp:group --><!-- wp:x/h /--><!-- wp:paragraph /--><!-- /wp:group -->";
        assert_eq!(detect(&registry, markup), vec!["x/h"]);
    }

    #[test]
    fn test_empty_container_misses_child_hooks() {
        let registry = registry_with("core/group", RelativePosition::FirstChild, "x/h");
        assert_eq!(detect(&registry, "<!-- wp:group --><!-- /wp:group -->"), vec!["x/h"]);
    }

    #[test]
    fn test_void_anchor_has_no_child_positions() {
        let registry = registry_with("core/group", RelativePosition::FirstChild, "x/h");
        assert!(detect(&registry, "<!-- wp:group /-->").is_empty());
    }

    #[test]
    fn test_before_and_after_look_at_siblings() {
        let mut registry = HookRegistry::new();
        registry.register("core/paragraph", RelativePosition::Before, "x/before");
        registry.register("core/paragraph", RelativePosition::After, "x/after");

        let present = "<!-- wp:x/before /-->\n<!-- wp:paragraph /-->\n<!-- wp:x/after /-->";
        assert!(detect(&registry, present).is_empty());

        let removed = "<!-- wp:x/after /--><!-- wp:paragraph /--><!-- wp:x/before /-->";
        assert_eq!(detect(&registry, removed), vec!["x/before", "x/after"]);
    }

    #[test]
    fn test_run_of_hooked_blocks_counts_as_present() {
        let mut registry = HookRegistry::new();
        registry.register("core/paragraph", RelativePosition::After, "x/one");
        registry.register("core/paragraph", RelativePosition::After, "x/two");

        let markup = "<!-- wp:paragraph /--><!-- wp:x/two /--><!-- wp:x/one /-->";
        assert!(detect(&registry, markup).is_empty());
    }

    #[test]
    fn test_absent_hooked_types_requires_eligible_document() {
        let registry = registry_with("core/navigation", RelativePosition::LastChild, "x/h");
        let reconciler = Reconciler::new(&registry);
        let doc = Document::new()
            .with_id(3)
            .with_type("wp_navigation")
            .with_body("<!-- wp:navigation-link /-->");

        assert_eq!(reconciler.absent_hooked_types(&doc).unwrap(), vec!["x/h"]);
        assert!(reconciler
            .absent_hooked_types(&doc.clone().with_type("post"))
            .unwrap()
            .is_empty());
        assert!(reconciler
            .absent_hooked_types(&doc.with_body("<!-- wp:group -->"))
            .is_err());
    }

    #[test]
    fn test_custom_positions_are_not_diffed() {
        let registry = registry_with(
            "core/paragraph",
            RelativePosition::Custom("inside_label".to_string()),
            "x/h",
        );
        assert!(detect(&registry, "<!-- wp:paragraph /-->").is_empty());
    }
}
