//! Block markup parsing and serialization for block-hooks.
//!
//! Documents are stored as text with blocks delimited by HTML comments:
//!
//! ```text
//! <!-- wp:navigation -->
//! <!-- wp:navigation-link {"label":"News","id":2} /-->
//! <!-- /wp:navigation -->
//! ```
//!
//! [`parse_blocks`] turns such text into a [`BlockTree`] and
//! [`serialize_blocks`] writes a tree back in canonical form. Text outside
//! of delimiters is kept byte-for-byte; only the delimiters themselves are
//! normalized.
//!
//! # Canonical attributes
//!
//! Attributes are written as compact JSON in their original key order, with
//! every `&` replaced by `\u0026` so the blob stays inert when the markup is
//! embedded in other HTML.

pub mod block;
pub mod error;
pub mod parser;
pub mod serializer;

pub use block::{Attributes, Block, BlockTree, DEFAULT_NAMESPACE, InnerContent};
pub use error::{Error, Result};
pub use parser::parse_blocks;
pub use serializer::{serialize_attributes, serialize_block, serialize_blocks};
