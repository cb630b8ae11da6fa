//! Block tree types

use serde_json::{Map, Value};

/// Namespace assumed for block names written without one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// Block attributes, kept in their original key order.
pub type Attributes = Map<String, Value>;

/// One chunk of a block's inner content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InnerContent {
    /// Freeform text between delimiters, kept byte-for-byte.
    Html(String),
    /// A nested block.
    Block(Block),
}

/// A parsed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Fully qualified block name, e.g. `core/navigation-link`.
    pub name: String,
    /// Attributes decoded from the delimiter's JSON blob.
    pub attributes: Attributes,
    /// The blob as written in the source, escapes included.
    ///
    /// Re-emitted on serialization while it still decodes to `attributes`.
    pub raw_attributes: Option<String>,
    /// Text and nested blocks in document order.
    pub inner_content: Vec<InnerContent>,
    /// Whether the block was written as a self-closing delimiter.
    pub void: bool,
}

impl Block {
    /// Create an empty container block.
    pub fn new(name: &str) -> Self {
        Self {
            name: qualify_name(name),
            attributes: Attributes::new(),
            raw_attributes: None,
            inner_content: Vec::new(),
            void: false,
        }
    }

    /// Create a self-closing block.
    pub fn void(name: &str) -> Self {
        Self {
            void: true,
            ..Self::new(name)
        }
    }

    /// Replace the attributes, dropping any source blob.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self.raw_attributes = None;
        self
    }

    /// Append a nested block. The block stops being void.
    pub fn with_child(mut self, child: Block) -> Self {
        self.void = false;
        self.inner_content.push(InnerContent::Block(child));
        self
    }

    /// Append freeform text. The block stops being void.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.void = false;
        self.inner_content.push(InnerContent::Html(html.into()));
        self
    }

    /// Nested blocks in document order, skipping freeform text.
    pub fn children(&self) -> impl Iterator<Item = &Block> {
        blocks_in(&self.inner_content)
    }

    /// True when the block is rendered as a self-closing delimiter.
    pub fn is_void(&self) -> bool {
        self.void && self.inner_content.is_empty()
    }
}

/// A parsed document: the implicit root holding top-level content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTree {
    pub content: Vec<InnerContent>,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level block.
    pub fn push_block(&mut self, block: Block) {
        self.content.push(InnerContent::Block(block));
    }

    /// Append top-level freeform text.
    pub fn push_html(&mut self, html: impl Into<String>) {
        self.content.push(InnerContent::Html(html.into()));
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        blocks_in(&self.content)
    }

    /// Every block in the tree, depth-first in document order.
    ///
    /// Each block appears exactly once, parents before their children.
    pub fn descendants(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        let mut stack: Vec<&Block> = self.blocks().collect();
        stack.reverse();
        while let Some(block) = stack.pop() {
            out.push(block);
            let before = stack.len();
            stack.extend(block.children());
            stack[before..].reverse();
        }
        out
    }

    /// True when the tree holds no content at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn blocks_in(content: &[InnerContent]) -> impl Iterator<Item = &Block> {
    content.iter().filter_map(|chunk| match chunk {
        InnerContent::Block(block) => Some(block),
        InnerContent::Html(_) => None,
    })
}

/// Prefix `name` with the default namespace when it has none.
pub fn qualify_name(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}/{name}")
    }
}

/// Strip the default namespace, the form used inside delimiters.
pub fn delimiter_name(name: &str) -> &str {
    name.strip_prefix(DEFAULT_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}
