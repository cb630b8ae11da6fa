//! Hooked block associations
//!
//! A hooked block is a block type that should appear at a position relative
//! to an anchor block type. Associations live in a [`HookRegistry`]; each
//! carries a [`HookResolver`] that decides, per anchor and document, whether
//! the hooked type really applies.

mod registry;

pub use registry::{HookAssociation, HookFilter, HookRegistry};

use std::fmt;
use std::str::FromStr;

use hooks_markup::Block;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Error;

/// Where a hooked block sits relative to its anchor.
///
/// The four structural positions are built in; registries may use further
/// snake_case names, kept as [`RelativePosition::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelativePosition {
    /// Previous sibling of the anchor
    Before,
    /// Next sibling of the anchor
    After,
    /// First inner block of the anchor
    FirstChild,
    /// Last inner block of the anchor
    LastChild,
    /// Registry-defined position
    Custom(String),
}

impl RelativePosition {
    /// Positions among the anchor's siblings
    pub const SIBLING: [RelativePosition; 2] = [Self::Before, Self::After];

    /// Positions among the anchor's inner blocks
    pub const CHILD: [RelativePosition; 2] = [Self::FirstChild, Self::LastChild];

    /// Check if the position refers to the anchor's inner blocks.
    pub fn is_child(&self) -> bool {
        matches!(self, Self::FirstChild | Self::LastChild)
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
            Self::FirstChild => write!(f, "first_child"),
            Self::LastChild => write!(f, "last_child"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for RelativePosition {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "first_child" => Ok(Self::FirstChild),
            "last_child" => Ok(Self::LastChild),
            _ if is_custom_name(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(Error::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RelativePosition {
    type Error = Error;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RelativePosition> for String {
    fn from(position: RelativePosition) -> Self {
        position.to_string()
    }
}

fn is_custom_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Everything a resolver or filter may consult about one anchor position.
#[derive(Debug, Clone, Copy)]
pub struct AnchorContext<'a> {
    /// Block type of the anchor
    pub anchor_type: &'a str,
    pub position: &'a RelativePosition,
    /// The anchor block; `None` when the anchor is the document root
    pub anchor: Option<&'a Block>,
    /// The full document being reconciled
    pub document: &'a Document,
}

/// Outcome of asking a resolver about one hooked type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The registered type is expected at the position
    Applicable,
    /// Another type is expected in place of the registered one
    Replaced(String),
    /// Nothing is expected from this association
    NotApplicable,
}

impl Resolution {
    /// Resolve to the expected block type, if any.
    pub fn into_type(self, registered: &str) -> Option<String> {
        match self {
            Self::Applicable => Some(registered.to_string()),
            Self::Replaced(replacement) => Some(replacement),
            Self::NotApplicable => None,
        }
    }
}

impl From<bool> for Resolution {
    fn from(applicable: bool) -> Self {
        if applicable {
            Self::Applicable
        } else {
            Self::NotApplicable
        }
    }
}

impl From<Option<String>> for Resolution {
    fn from(replacement: Option<String>) -> Self {
        match replacement {
            Some(hooked_type) => Self::Replaced(hooked_type),
            None => Self::NotApplicable,
        }
    }
}

/// Decides whether a registered hooked type applies at an anchor.
pub trait HookResolver: Send + Sync {
    fn resolve(&self, hooked_type: &str, context: &AnchorContext<'_>) -> Resolution;
}

impl<F, R> HookResolver for F
where
    F: Fn(&str, &AnchorContext<'_>) -> R + Send + Sync,
    R: Into<Resolution>,
{
    fn resolve(&self, hooked_type: &str, context: &AnchorContext<'_>) -> Resolution {
        self(hooked_type, context).into()
    }
}
