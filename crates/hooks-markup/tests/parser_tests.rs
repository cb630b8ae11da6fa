//! Integration tests for block markup parsing.

use hooks_markup::{Block, Error, InnerContent, parse_blocks};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

const NAVIGATION_LINK: &str = r#"<!-- wp:navigation-link {"label":"News & About","type":"page","id":2,"url":"http://localhost:8888/?page_id=2","kind":"post-type"} /-->"#;

#[test]
fn test_navigation_link_attributes_decoded_in_order() {
    let tree = parse_blocks(NAVIGATION_LINK).unwrap();
    let blocks: Vec<&Block> = tree.blocks().collect();
    assert_eq!(blocks.len(), 1);

    let link = blocks[0];
    assert_eq!(link.name, "core/navigation-link");
    assert!(link.is_void());
    assert_eq!(link.attributes["label"], json!("News & About"));
    assert_eq!(link.attributes["id"], json!(2));

    let keys: Vec<&str> = link.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["label", "type", "id", "url", "kind"]);
}

#[test]
fn test_escaped_ampersand_is_decoded() {
    let tree = parse_blocks(r#"<!-- wp:link {"label":"A \u0026 B"} /-->"#).unwrap();
    let link = tree.blocks().next().unwrap();
    assert_eq!(link.attributes["label"], json!("A & B"));
}

#[test]
fn test_freeform_text_is_preserved_around_blocks() {
    let source = "<p>intro</p>\n<!-- wp:spacer /-->\n<p>outro</p>";
    let tree = parse_blocks(source).unwrap();

    assert_eq!(
        tree.content,
        vec![
            InnerContent::Html("<p>intro</p>\n".to_string()),
            InnerContent::Block(Block::void("spacer")),
            InnerContent::Html("\n<p>outro</p>".to_string()),
        ]
    );
}

#[test]
fn test_sibling_order_is_kept() {
    let source = r#"<!-- wp:navigation -->
<!-- wp:navigation-link {"label":"One"} /-->
<!-- wp:tests/my-block /-->
<!-- wp:navigation-link {"label":"Two"} /-->
<!-- /wp:navigation -->"#;

    let tree = parse_blocks(source).unwrap();
    let navigation = tree.blocks().next().unwrap();
    let names: Vec<&str> = navigation.children().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "core/navigation-link",
            "tests/my-block",
            "core/navigation-link"
        ]
    );
}

#[test]
fn test_multiple_top_level_blocks() {
    let source = "<!-- wp:a /--><!-- wp:b --><!-- /wp:b --><!-- wp:c /-->";
    let tree = parse_blocks(source).unwrap();
    let names: Vec<&str> = tree.blocks().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["core/a", "core/b", "core/c"]);
}

#[test]
fn test_non_block_comments_are_freeform() {
    let source = "<!-- a plain comment --><!--wp:tight /-->";
    let tree = parse_blocks(source).unwrap();
    assert_eq!(tree.blocks().count(), 0);
    assert_eq!(tree.content, vec![InnerContent::Html(source.to_string())]);
}

#[test]
fn test_attribute_blob_with_closing_brace_in_string() {
    let tree = parse_blocks(r#"<!-- wp:code {"content":"fn x() {}"} /-->"#).unwrap();
    let code = tree.blocks().next().unwrap();
    assert_eq!(code.attributes["content"], json!("fn x() {}"));
}

#[rstest]
#[case::unclosed("<!-- wp:group -->")]
#[case::stray_closer("<!-- /wp:group -->")]
#[case::mismatched("<!-- wp:group --><!-- /wp:columns -->")]
#[case::invalid_json(r#"<!-- wp:group {"a":} /-->"#)]
#[case::interleaved("<!-- wp:a --><!-- wp:b --><!-- /wp:a --><!-- /wp:b -->")]
#[case::closer_with_attributes(r#"<!-- wp:group --><!-- /wp:group {"a":1} -->"#)]
fn test_malformed_markup_is_rejected(#[case] source: &str) {
    assert!(parse_blocks(source).is_err(), "expected error for {source:?}");
}

#[test]
fn test_mismatched_closer_reports_both_names() {
    let err = parse_blocks("<!-- wp:group --><!-- /wp:columns -->").unwrap_err();
    assert_eq!(
        err,
        Error::MismatchedCloser {
            expected: "core/group".to_string(),
            found: "core/columns".to_string(),
            position: 17,
        }
    );
}
