//! Canonical block markup serialization.
//!
//! Delimiters are written with single spaces and names in the `core`
//! namespace lose their prefix. Parsed attribute blobs are written back as
//! they were read with `&` escaped; blobs of edited or built blocks are
//! compact JSON. Freeform text is written back unchanged.

use serde_json::Value;

use crate::block::{Attributes, Block, BlockTree, InnerContent, delimiter_name};

/// Escape applied to every `&` inside an attribute blob.
const AMPERSAND_ESCAPE: &str = "\\u0026";

/// Serializes a whole tree.
///
/// # Example
/// ```
/// use hooks_markup::{parse_blocks, serialize_blocks};
///
/// let tree = parse_blocks(r#"<!--   wp:link   {"label":"A & B"}   /-->"#).unwrap();
/// assert_eq!(
///     serialize_blocks(&tree),
///     r#"<!-- wp:link {"label":"A \u0026 B"} /-->"#
/// );
/// ```
pub fn serialize_blocks(tree: &BlockTree) -> String {
    let mut out = String::new();
    write_content(&mut out, &tree.content);
    out
}

/// Serializes a single block and everything nested in it.
pub fn serialize_block(block: &Block) -> String {
    let mut out = String::new();
    write_block(&mut out, block);
    out
}

/// Encodes attributes as the JSON blob placed inside a delimiter.
///
/// Keys keep their insertion order and every `&` becomes `\u0026`.
pub fn serialize_attributes(attributes: &Attributes) -> String {
    Value::Object(attributes.clone())
        .to_string()
        .replace('&', AMPERSAND_ESCAPE)
}

/// Check if a source blob still holds exactly `attributes`.
fn decodes_to(raw: &str, attributes: &Attributes) -> bool {
    serde_json::from_str::<Value>(raw).is_ok_and(|value| value.as_object() == Some(attributes))
}

fn write_content(out: &mut String, content: &[InnerContent]) {
    for chunk in content {
        match chunk {
            InnerContent::Html(html) => out.push_str(html),
            InnerContent::Block(block) => write_block(out, block),
        }
    }
}

fn write_block(out: &mut String, block: &Block) {
    let name = delimiter_name(&block.name);

    out.push_str("<!-- wp:");
    out.push_str(name);
    out.push(' ');
    if !block.attributes.is_empty() {
        match block.raw_attributes.as_deref() {
            Some(raw) if decodes_to(raw, &block.attributes) => {
                out.push_str(&raw.replace('&', AMPERSAND_ESCAPE));
            }
            _ => out.push_str(&serialize_attributes(&block.attributes)),
        }
        out.push(' ');
    }

    if block.is_void() {
        out.push_str("/-->");
        return;
    }

    out.push_str("-->");
    write_content(out, &block.inner_content);
    out.push_str("<!-- /wp:");
    out.push_str(name);
    out.push_str(" -->");
}
