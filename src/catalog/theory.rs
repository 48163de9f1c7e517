//! Theory and category records.

use serde::Deserialize;
use std::fmt;

/// Stable identifier of a theory within a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TheoryId(pub u32);

impl fmt::Display for TheoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single timeline entry.
///
/// Records are immutable once the catalog is loaded. `color` is always set on
/// a loaded theory; the loader falls back to the category colour when the
/// file leaves it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Theory {
    pub id: TheoryId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: String,
    /// Negative values are BCE
    pub year: i32,
    pub display_year: String,
    pub color: String,
    pub source_url: Option<String>,
    pub source_label: Option<String>,
}

/// Outbound reference attached to a theory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLink<'a> {
    pub url: &'a str,
    pub label: &'a str,
}

impl Theory {
    /// Source link, if the theory has a URL. The label defaults to the URL.
    pub fn source(&self) -> Option<SourceLink<'_>> {
        let url = self.source_url.as_deref()?;
        let label = self.source_label.as_deref().unwrap_or(url);
        Some(SourceLink { url, label })
    }

    /// Parsed RGB triple of the display colour
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// A known category with its display colour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Parse a `#rrggbb` colour token
pub fn parse_hex_color(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
