//! Era table and year → era resolution.

use serde::Deserialize;

/// Label returned for years that fall outside every era
pub const OTHER_ERA_LABEL: &str = "Other";

/// A named, inclusive year range
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Era {
    pub label: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl Era {
    pub fn new(label: impl Into<String>, start_year: i32, end_year: i32) -> Self {
        Self {
            label: label.into(),
            start_year,
            end_year,
        }
    }

    /// Both bounds are inclusive
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    fn overlaps(&self, other: &Era) -> bool {
        self.start_year <= other.end_year && other.start_year <= self.end_year
    }
}

/// Ordered list of eras. Earlier entries win when ranges overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraTable {
    eras: Vec<Era>,
}

impl EraTable {
    pub fn new(eras: Vec<Era>) -> Self {
        Self { eras }
    }

    /// The era segmentation used by the built-in catalog
    pub fn standard() -> Self {
        Self::new(vec![
            Era::new("Ancient World", -600, -1),
            Era::new("Early Modern Period", 1600, 1799),
            Era::new("19th Century", 1800, 1899),
            Era::new("Early 20th Century", 1900, 1959),
            Era::new("Late 20th Century", 1960, 1999),
            Era::new("21st Century", 2000, 2100),
        ])
    }

    /// Label of the first era containing `year`, or [`OTHER_ERA_LABEL`].
    ///
    /// Total over `i32`.
    pub fn resolve(&self, year: i32) -> &str {
        self.eras
            .iter()
            .find(|era| era.contains(year))
            .map_or(OTHER_ERA_LABEL, |era| era.label.as_str())
    }

    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Pairs of era labels whose ranges overlap
    pub fn overlapping_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, first) in self.eras.iter().enumerate() {
            for second in &self.eras[i + 1..] {
                if first.overlaps(second) {
                    pairs.push((first.label.as_str(), second.label.as_str()));
                }
            }
        }
        pairs
    }
}

impl Default for EraTable {
    fn default() -> Self {
        Self::standard()
    }
}
