//! Hook registry and expected-type resolution

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{AnchorContext, HookResolver, RelativePosition};
use crate::config::{BlockTypeConfig, HooksConfig};

/// Filter over the hooked types collected for one anchor position.
///
/// Receives the resolved list and returns the list to use instead.
pub type HookFilter = Arc<dyn Fn(Vec<String>, &AnchorContext<'_>) -> Vec<String> + Send + Sync>;

/// A hooked block type registered at one anchor position.
#[derive(Clone)]
pub struct HookAssociation {
    hooked_type: String,
    resolver: Arc<dyn HookResolver>,
}

impl HookAssociation {
    /// The block type as registered
    pub fn hooked_type(&self) -> &str {
        &self.hooked_type
    }

    /// Ask the resolver which type, if any, this association expects.
    pub fn resolve(&self, context: &AnchorContext<'_>) -> Option<String> {
        self.resolver
            .resolve(&self.hooked_type, context)
            .into_type(&self.hooked_type)
    }
}

impl fmt::Debug for HookAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookAssociation")
            .field("hooked_type", &self.hooked_type)
            .finish_non_exhaustive()
    }
}

/// Registry mapping anchor types and positions to hooked block types.
///
/// Associations keep their registration order. Resolution never mutates the
/// registry or the document.
///
/// # Example
///
/// ```
/// use hooks_core::{HookRegistry, RelativePosition};
///
/// let mut registry = HookRegistry::new();
/// registry.register("core/navigation", RelativePosition::LastChild, "tests/my-block");
/// assert_eq!(
///     registry.associations("core/navigation", &RelativePosition::LastChild)[0].hooked_type(),
///     "tests/my-block"
/// );
/// ```
#[derive(Clone, Default)]
pub struct HookRegistry {
    /// Maps anchor type to position to associations
    associations: HashMap<String, HashMap<RelativePosition, Vec<HookAssociation>>>,
    filters: Vec<HookFilter>,
}

impl HookRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every block type declared in `config`.
    pub fn from_config(config: &HooksConfig) -> Self {
        let mut registry = Self::new();
        for block_type in &config.block_types {
            registry.register_block_type(block_type);
        }
        registry
    }

    /// Register a hooked type that always applies.
    pub fn register(
        &mut self,
        anchor_type: impl Into<String>,
        position: RelativePosition,
        hooked_type: impl Into<String>,
    ) {
        self.register_with(anchor_type, position, hooked_type, |_, _| true);
    }

    /// Register a hooked type with a resolver closure.
    ///
    /// The closure may return a `bool`, an `Option<String>` replacement
    /// type, or a [`Resolution`](super::Resolution).
    pub fn register_with<F, R>(
        &mut self,
        anchor_type: impl Into<String>,
        position: RelativePosition,
        hooked_type: impl Into<String>,
        resolver: F,
    ) where
        F: Fn(&str, &AnchorContext<'_>) -> R + Send + Sync + 'static,
        R: Into<super::Resolution> + 'static,
    {
        self.register_resolver(anchor_type, position, hooked_type, Arc::new(resolver));
    }

    /// Register a hooked type with a shared resolver.
    pub fn register_resolver(
        &mut self,
        anchor_type: impl Into<String>,
        position: RelativePosition,
        hooked_type: impl Into<String>,
        resolver: Arc<dyn HookResolver>,
    ) {
        let anchor_type = anchor_type.into();
        let hooked_type = hooked_type.into();
        tracing::debug!(%anchor_type, %position, %hooked_type, "Registering hooked block");

        self.associations
            .entry(anchor_type)
            .or_default()
            .entry(position)
            .or_default()
            .push(HookAssociation {
                hooked_type,
                resolver,
            });
    }

    /// Register every anchor a block type declares in its `block_hooks`.
    pub fn register_block_type(&mut self, block_type: &BlockTypeConfig) {
        for (anchor_type, position) in &block_type.block_hooks {
            self.register(anchor_type.clone(), position.clone(), block_type.name.clone());
        }
    }

    /// Add a filter applied to every resolved hooked-type list.
    ///
    /// Filters run in the order they were added.
    pub fn add_filter<F>(&mut self, filter: F)
    where
        F: Fn(Vec<String>, &AnchorContext<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
    }

    /// Associations registered for an anchor type and position.
    ///
    /// Returns an empty slice when nothing is registered.
    pub fn associations(&self, anchor_type: &str, position: &RelativePosition) -> &[HookAssociation] {
        self.associations
            .get(anchor_type)
            .and_then(|positions| positions.get(position))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Block types expected at the context's anchor position.
    ///
    /// Runs every matching resolver, then every filter, and returns the
    /// result in order without duplicates.
    pub fn resolve(&self, context: &AnchorContext<'_>) -> Vec<String> {
        let mut hooked_types: Vec<String> = self
            .associations(context.anchor_type, context.position)
            .iter()
            .filter_map(|association| association.resolve(context))
            .collect();

        for filter in &self.filters {
            hooked_types = filter(hooked_types, context);
        }

        let mut seen = Vec::with_capacity(hooked_types.len());
        for hooked_type in hooked_types {
            if !seen.contains(&hooked_type) {
                seen.push(hooked_type);
            }
        }
        seen
    }

    /// Number of registered associations.
    pub fn len(&self) -> usize {
        self.associations
            .values()
            .flat_map(|positions| positions.values())
            .map(Vec::len)
            .sum()
    }

    /// Check if the registry holds no associations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("associations", &self.associations)
            .field("filters", &self.filters.len())
            .finish()
    }
}
