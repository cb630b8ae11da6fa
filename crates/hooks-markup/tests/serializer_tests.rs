//! Integration tests for canonical block serialization.

use hooks_markup::{Block, BlockTree, parse_blocks, serialize_block, serialize_blocks};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

const NAVIGATION_LINK: &str = r#"<!-- wp:navigation-link {"label":"News & About","type":"page","id":2,"url":"http://localhost:8888/?page_id=2","kind":"post-type"} /-->"#;

#[test]
fn test_ampersand_is_the_only_change() {
    let tree = parse_blocks(NAVIGATION_LINK).unwrap();
    let expected = NAVIGATION_LINK.replace('&', "\\u0026");
    assert_eq!(serialize_blocks(&tree), expected);
}

#[test]
fn test_canonical_markup_is_a_fixpoint() {
    let source = r#"<!-- wp:navigation {"ref":4} -->
<!-- wp:navigation-link {"label":"Tea \u0026 Cake","url":"/menu"} /-->
<!-- wp:tests/my-block /-->
<!-- /wp:navigation -->"#;

    let tree = parse_blocks(source).unwrap();
    assert_eq!(serialize_blocks(&tree), source);
}

#[test]
fn test_source_escapes_survive_reserialization() {
    let source = r#"<!-- wp:navigation-link {"label":"a \u002d\u002d\u003e \u003cb\u003e & c","url":"http:\/\/x\/y","w":1e2} /-->"#;
    let tree = parse_blocks(source).unwrap();
    assert_eq!(serialize_blocks(&tree), source.replace('&', "\\u0026"));
}

#[test]
fn test_freeform_text_passes_through() {
    let source = "<p>Fish & Chips</p>\n<!-- wp:paragraph -->\n<p>A & B</p>\n<!-- /wp:paragraph -->\n";
    let tree = parse_blocks(source).unwrap();
    assert_eq!(serialize_blocks(&tree), source);
}

#[test]
fn test_delimiter_whitespace_is_normalized() {
    let source = "<!--  wp:group\n{\"tagName\":\"main\"}\t-->x<!--   /wp:group   -->";
    let tree = parse_blocks(source).unwrap();
    assert_eq!(
        serialize_blocks(&tree),
        r#"<!-- wp:group {"tagName":"main"} -->x<!-- /wp:group -->"#
    );
}

#[test]
fn test_built_tree_serializes() {
    let attributes = match json!({"label": "Home", "nested": {"a": [1, null, false]}}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let mut tree = BlockTree::new();
    tree.push_block(
        Block::new("navigation")
            .with_child(Block::void("navigation-link").with_attributes(attributes))
            .with_child(Block::void("tests/my-block")),
    );

    assert_eq!(
        serialize_blocks(&tree),
        r#"<!-- wp:navigation --><!-- wp:navigation-link {"label":"Home","nested":{"a":[1,null,false]}} /--><!-- wp:tests/my-block /--><!-- /wp:navigation -->"#
    );
}

#[test]
fn test_serialize_single_nested_block() {
    let block = Block::new("group").with_child(Block::new("paragraph").with_html("<p>x</p>"));
    assert_eq!(
        serialize_block(&block),
        "<!-- wp:group --><!-- wp:paragraph --><p>x</p><!-- /wp:paragraph --><!-- /wp:group -->"
    );
}

proptest! {
    #[test]
    fn prop_attribute_blob_never_contains_raw_ampersand(label in "[a-zA-Z0-9 &<>/:.?=-]{0,40}") {
        let attributes = match json!({ "label": label.clone() }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut tree = BlockTree::new();
        tree.push_block(Block::void("navigation-link").with_attributes(attributes));

        let markup = serialize_blocks(&tree);
        prop_assert!(!markup.contains('&'));
        prop_assert_eq!(markup.matches("\\u0026").count(), label.matches('&').count());

        let reparsed = parse_blocks(&markup).unwrap();
        let link = reparsed.blocks().next().unwrap();
        prop_assert_eq!(&link.attributes["label"], &json!(label));
    }
}
