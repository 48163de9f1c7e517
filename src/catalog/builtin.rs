//! The catalog compiled into the binary.

use crate::catalog::{parse_catalog, Catalog};
use crate::error::Result;

const BUILTIN_CATALOG: &str = include_str!("../../data/theories.toml");

/// Parse the embedded theories-of-consciousness catalog
pub fn builtin_catalog() -> Result<Catalog> {
    parse_catalog(BUILTIN_CATALOG)
}
