//! Catalog parsing and validation.
//!
//! Catalog files are TOML documents with `[[categories]]`, optional
//! `[[eras]]` and `[[theories]]` tables. Everything the timeline core assumes
//! about its input is checked here, once, so the core itself never has to
//! fail.

use crate::catalog::{parse_hex_color, Catalog, Category, Era, EraTable, Theory, TheoryId};
use crate::error::{MindlineError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Header title for catalogs that do not name themselves
pub const DEFAULT_TITLE: &str = "Timeline";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    title: Option<String>,
    categories: Vec<Category>,
    #[serde(default)]
    eras: Option<Vec<Era>>,
    #[serde(default)]
    theories: Vec<TheoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TheoryEntry {
    id: TheoryId,
    title: String,
    author: String,
    description: String,
    category: String,
    year: i32,
    display_year: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    source_label: Option<String>,
}

/// Read and validate a catalog file from disk
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        MindlineError::file_error(format!("Cannot read catalog {}", path.display()), e)
    })?;
    let catalog = parse_catalog(&contents)?;
    log::info!(
        "loaded catalog {} ({} theories, {} categories)",
        path.display(),
        catalog.theories.len(),
        catalog.categories.len()
    );
    Ok(catalog)
}

/// Parse and validate a catalog from TOML text
///
/// # Validations Performed
/// - Category names are unique and colours are `#rrggbb`
/// - Every era has `start_year <= end_year`
/// - Theory identifiers are unique
/// - Theory years are non-decreasing in file order
/// - Every theory belongs to a declared category
///
/// Overlapping eras are accepted; the first era in file order wins and a
/// warning is logged.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let file: CatalogFile = toml::from_str(contents)
        .map_err(|e| MindlineError::catalog(format!("invalid catalog TOML: {e}")))?;

    validate_categories(&file.categories)?;

    let eras = match file.eras {
        Some(eras) => {
            validate_eras(&eras)?;
            EraTable::new(eras)
        }
        None => EraTable::standard(),
    };
    for (first, second) in eras.overlapping_pairs() {
        log::warn!("eras '{first}' and '{second}' overlap; '{first}' takes precedence");
    }

    let theories = build_theories(file.theories, &file.categories)?;
    log::debug!(
        "parsed catalog: {} theories, {} categories, {} eras",
        theories.len(),
        file.categories.len(),
        eras.eras().len()
    );

    Ok(Catalog {
        title: file.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        theories,
        categories: file.categories,
        eras,
    })
}

fn validate_categories(categories: &[Category]) -> Result<()> {
    let mut seen = HashSet::new();
    for category in categories {
        if category.name == crate::timeline::ALL_CATEGORIES {
            return Err(MindlineError::catalog(format!(
                "category name '{}' is reserved",
                category.name
            )));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(MindlineError::catalog(format!(
                "duplicate category '{}'",
                category.name
            )));
        }
        if parse_hex_color(&category.color).is_none() {
            return Err(MindlineError::catalog(format!(
                "category '{}' has invalid colour '{}'",
                category.name, category.color
            )));
        }
    }
    Ok(())
}

fn validate_eras(eras: &[Era]) -> Result<()> {
    for era in eras {
        if era.start_year > era.end_year {
            return Err(MindlineError::catalog(format!(
                "era '{}' starts after it ends ({} > {})",
                era.label, era.start_year, era.end_year
            )));
        }
    }
    Ok(())
}

fn build_theories(entries: Vec<TheoryEntry>, categories: &[Category]) -> Result<Vec<Theory>> {
    let mut ids = HashSet::new();
    let mut previous_year: Option<i32> = None;
    let mut theories = Vec::with_capacity(entries.len());

    for entry in entries {
        if !ids.insert(entry.id) {
            return Err(MindlineError::catalog(format!(
                "duplicate theory id {}",
                entry.id
            )));
        }

        if let Some(previous) = previous_year {
            if entry.year < previous {
                return Err(MindlineError::catalog(format!(
                    "theory {} ({}) is out of order: year {} follows {}",
                    entry.id, entry.title, entry.year, previous
                )));
            }
        }
        previous_year = Some(entry.year);

        let category = categories
            .iter()
            .find(|category| category.name == entry.category)
            .ok_or_else(|| {
                MindlineError::catalog(format!(
                    "theory {} uses unknown category '{}'",
                    entry.id, entry.category
                ))
            })?;

        let color = entry.color.unwrap_or_else(|| category.color.clone());
        if parse_hex_color(&color).is_none() {
            return Err(MindlineError::catalog(format!(
                "theory {} has invalid colour '{}'",
                entry.id, color
            )));
        }

        theories.push(Theory {
            id: entry.id,
            title: entry.title,
            author: entry.author,
            description: entry.description,
            category: entry.category,
            year: entry.year,
            display_year: entry.display_year,
            color,
            source_url: entry.source_url,
            source_label: entry.source_label,
        });
    }

    Ok(theories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATEGORIES: &str = r##"
[[categories]]
name = "Philosophy"
color = "#a78bfa"

[[categories]]
name = "Neuroscience"
color = "#34d399"
"##;

    fn theory_toml(id: u32, year: i32, category: &str) -> String {
        format!(
            r#"
[[theories]]
id = {id}
title = "Theory {id}"
author = "Author {id}"
description = "Description {id}"
category = "{category}"
year = {year}
display_year = "{year}"
"#
        )
    }

    fn expect_catalog_error(contents: &str, needle: &str) {
        match parse_catalog(contents) {
            Err(MindlineError::CatalogError { message }) => {
                assert!(
                    message.contains(needle),
                    "expected '{needle}' in '{message}'"
                );
            }
            other => panic!("expected CatalogError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_valid_catalog() {
        let contents = format!(
            "{CATEGORIES}{}{}",
            theory_toml(1, -400, "Philosophy"),
            theory_toml(2, 1890, "Neuroscience")
        );
        let catalog = parse_catalog(&contents).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.title, DEFAULT_TITLE);
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.eras, EraTable::standard());
        // Colour inherited from the category
        assert_eq!(catalog.theories[0].color, "#a78bfa");
        assert_eq!(catalog.theories[1].color, "#34d399");
    }

    #[test]
    fn test_custom_eras_replace_standard_table() {
        let contents = format!(
            r#"{CATEGORIES}
[[eras]]
label = "Modern"
start_year = 1800
end_year = 2100
{}"#,
            theory_toml(1, 1890, "Neuroscience")
        );
        let catalog = parse_catalog(&contents).unwrap();
        assert_eq!(catalog.eras.eras().len(), 1);
        assert_eq!(catalog.eras.resolve(1890), "Modern");
        assert_eq!(catalog.eras.resolve(1700), "Other");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let contents = format!(
            "{CATEGORIES}{}{}",
            theory_toml(1, 1800, "Philosophy"),
            theory_toml(1, 1900, "Philosophy")
        );
        expect_catalog_error(&contents, "duplicate theory id 1");
    }

    #[test]
    fn test_rejects_unsorted_years() {
        let contents = format!(
            "{CATEGORIES}{}{}",
            theory_toml(1, 1900, "Philosophy"),
            theory_toml(2, 1800, "Philosophy")
        );
        expect_catalog_error(&contents, "out of order");
    }

    #[test]
    fn test_accepts_equal_years() {
        let contents = format!(
            "{CATEGORIES}{}{}",
            theory_toml(1, 1995, "Philosophy"),
            theory_toml(2, 1995, "Neuroscience")
        );
        assert_eq!(parse_catalog(&contents).unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_unknown_category() {
        let contents = format!("{CATEGORIES}{}", theory_toml(1, 1900, "Astrology"));
        expect_catalog_error(&contents, "unknown category 'Astrology'");
    }

    #[test]
    fn test_rejects_reserved_category_name() {
        let contents = r##"
[[categories]]
name = "All"
color = "#ffffff"
"##;
        expect_catalog_error(contents, "reserved");
    }

    #[test]
    fn test_rejects_bad_colours() {
        let contents = r#"
[[categories]]
name = "Philosophy"
color = "purple"
"#;
        expect_catalog_error(contents, "invalid colour");

        let contents = format!(
            "{CATEGORIES}{}color = \"#12\"\n",
            theory_toml(1, 1900, "Philosophy")
        );
        expect_catalog_error(&contents, "theory 1 has invalid colour");
    }

    #[test]
    fn test_rejects_inverted_era() {
        let contents = format!(
            r#"{CATEGORIES}
[[eras]]
label = "Backwards"
start_year = 1900
end_year = 1800
"#
        );
        expect_catalog_error(&contents, "starts after it ends");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        expect_catalog_error("[[theories]\nid = ", "invalid catalog TOML");
    }

    #[test]
    fn test_load_catalog_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        let contents = format!("{CATEGORIES}{}", theory_toml(9, 2004, "Neuroscience"));
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.theories[0].id, TheoryId(9));
    }

    #[test]
    fn test_load_missing_catalog() {
        let result = load_catalog(Path::new("/this/catalog/does/not/exist.toml"));
        match result {
            Err(MindlineError::FileError { message, .. }) => {
                assert!(message.contains("Cannot read catalog"));
            }
            other => panic!("expected FileError, got {other:?}"),
        }
    }
}
