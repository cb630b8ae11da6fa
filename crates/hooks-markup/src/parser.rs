//! Block markup parsing.
//!
//! Recognizes three delimiter shapes:
//! ```text
//! <!-- wp:name {"attr":1} -->   opener
//! <!-- /wp:name -->             closer
//! <!-- wp:name {"attr":1} /-->  void
//! ```
//! Everything else is freeform text and is kept as-is.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::block::{Attributes, Block, BlockTree, InnerContent, qualify_name};
use crate::error::{Error, Result};

/// Regex for matching any block delimiter.
/// The attribute blob ends at the first `}` followed by the delimiter end.
static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--\s+(?P<closer>/)?wp:(?P<namespace>[a-z][a-z0-9_-]*/)?(?P<name>[a-z][a-z0-9_-]*)\s+(?:(?P<attrs>\{.*?\})\s+)?(?P<void>/)?-->",
    )
    .expect("Invalid block delimiter regex")
});

/// An opener waiting for its closer.
struct OpenBlock {
    block: Block,
    position: usize,
}

/// Parses block markup into a tree.
///
/// # Errors
/// Returns an error for unbalanced delimiters or attribute blobs that are
/// not JSON objects. Callers are expected to leave such content untouched.
///
/// # Example
/// ```
/// use hooks_markup::parse_blocks;
///
/// let tree = parse_blocks(r#"<!-- wp:navigation-link {"label":"News"} /-->"#).unwrap();
/// let link = tree.blocks().next().unwrap();
/// assert_eq!(link.name, "core/navigation-link");
/// assert_eq!(link.attributes["label"], "News");
/// ```
pub fn parse_blocks(source: &str) -> Result<BlockTree> {
    let mut root: Vec<InnerContent> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut cursor = 0;

    for caps in DELIMITER_REGEX.captures_iter(source) {
        let Some(delimiter) = caps.get(0) else {
            continue;
        };
        let position = delimiter.start();
        push_html(current(&mut root, &mut stack), &source[cursor..position]);
        cursor = delimiter.end();

        let namespace = caps.name("namespace").map_or("", |m| m.as_str());
        let short = caps.name("name").map_or("", |m| m.as_str());
        let name = qualify_name(&format!("{namespace}{short}"));

        if caps.name("closer").is_some() {
            if caps.name("void").is_some() || caps.name("attrs").is_some() {
                return Err(Error::MalformedCloser {
                    name,
                    position,
                    message: "closers take neither attributes nor a void marker".to_string(),
                });
            }
            let Some(open) = stack.pop() else {
                return Err(Error::UnexpectedCloser { name, position });
            };
            if open.block.name != name {
                return Err(Error::MismatchedCloser {
                    expected: open.block.name,
                    found: name,
                    position,
                });
            }
            current(&mut root, &mut stack).push(InnerContent::Block(open.block));
            continue;
        }

        let attributes = match caps.name("attrs") {
            Some(raw) => parse_attributes(raw.as_str(), &name, position)?,
            None => Attributes::new(),
        };
        let block = Block {
            name,
            attributes,
            raw_attributes: caps.name("attrs").map(|raw| raw.as_str().to_string()),
            inner_content: Vec::new(),
            void: caps.name("void").is_some(),
        };

        if block.void {
            current(&mut root, &mut stack).push(InnerContent::Block(block));
        } else {
            stack.push(OpenBlock { block, position });
        }
    }

    push_html(current(&mut root, &mut stack), &source[cursor..]);

    if let Some(open) = stack.pop() {
        tracing::trace!(name = %open.block.name, position = open.position, "Unclosed block");
        return Err(Error::UnclosedBlock {
            name: open.block.name,
            position: open.position,
        });
    }

    Ok(BlockTree { content: root })
}

/// Content list new chunks are appended to: the innermost open block, or the root.
fn current<'a>(
    root: &'a mut Vec<InnerContent>,
    stack: &'a mut [OpenBlock],
) -> &'a mut Vec<InnerContent> {
    match stack.last_mut() {
        Some(open) => &mut open.block.inner_content,
        None => root,
    }
}

fn push_html(content: &mut Vec<InnerContent>, text: &str) {
    if !text.is_empty() {
        content.push(InnerContent::Html(text.to_string()));
    }
}

fn parse_attributes(raw: &str, name: &str, position: usize) -> Result<Attributes> {
    let invalid = |message: String| Error::InvalidAttributes {
        name: name.to_string(),
        position,
        message,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(attributes)) => Ok(attributes),
        Ok(_) => Err(invalid("attributes must be a JSON object".to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}
