use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    core::Color,
    error::{ChartError, ChartResult},
};

/// Three-tone color scheme for one category.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColorScheme {
    /// Bar fill.
    pub main: Color,
    /// Background phase band.
    pub light: Color,
    /// Milestone markers, reference lines and the category badge.
    pub dark: Color,
}

/// One declared category: a display name plus its color scheme.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub colors: ColorScheme,
}

/// Caller-declared, ordered category set.
///
/// Rank is the position in the declared list and fixes the vertical grouping
/// order of the chart; it is never inferred from record appearance order.
#[derive(Clone, Debug)]
pub struct CategorySet {
    specs: Vec<CategorySpec>,
    ranks: HashMap<String, usize>,
}

impl CategorySet {
    pub fn new(specs: Vec<CategorySpec>) -> ChartResult<Self> {
        let mut ranks = HashMap::with_capacity(specs.len());
        for (rank, spec) in specs.iter().enumerate() {
            if ranks.insert(spec.name.clone(), rank).is_some() {
                return Err(ChartError::validation(format!(
                    "duplicate category '{}'",
                    spec.name
                )));
            }
        }
        Ok(Self { specs, ranks })
    }

    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    pub fn get(&self, rank: usize) -> Option<&CategorySpec> {
        self.specs.get(rank)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategorySpec> {
        self.specs.iter()
    }
}

/// Raw input record as it appears in a chart document, dates still unparsed.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub start: String,
    /// Inclusive calendar date, `YYYY-MM-DD`.
    pub end: String,
    pub category: String,
    #[serde(default)]
    pub milestone: bool,
}

/// Normalized record: parsed dates, resolved category rank, derived duration.
#[derive(Clone, Debug)]
pub struct Record {
    pub name: String,
    pub start: NaiveDate,
    /// Inclusive end date.
    pub end: NaiveDate,
    pub category_rank: usize,
    pub milestone: bool,
    /// Whole days covered, end inclusive: `(end - start).num_days() + 1`.
    pub duration_days: i64,
}

/// A record with its assigned vertical slot (dense, 0-based, top row first).
#[derive(Clone, Debug)]
pub struct PositionedRecord {
    pub record: Record,
    pub slot: usize,
}

/// One contiguous run of same-category rows, in slot space.
///
/// `top`/`bottom` carry the half-row offsets (`first - 0.5`, `last + 0.5`) so
/// background bands cover full row height; consecutive spans tile
/// `[-0.5, N - 0.5]` with no gap or overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSpan {
    pub category_rank: usize,
    pub top: f64,
    pub bottom: f64,
}

/// Top-level chart document: the CLI input format.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_label: Option<String>,
    pub categories: Vec<CategorySpec>,
    pub records: Vec<RawRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ColorScheme {
        ColorScheme {
            main: Color::rgb(78, 205, 196),
            light: Color::rgb(199, 242, 239),
            dark: Color::rgb(58, 163, 156),
        }
    }

    #[test]
    fn category_rank_follows_declaration_order() {
        let set = CategorySet::new(vec![
            CategorySpec {
                name: "review".into(),
                colors: scheme(),
            },
            CategorySpec {
                name: "launch".into(),
                colors: scheme(),
            },
        ])
        .unwrap();
        assert_eq!(set.rank("review"), Some(0));
        assert_eq!(set.rank("launch"), Some(1));
        assert_eq!(set.rank("other"), None);
        assert_eq!(set.get(1).unwrap().name, "launch");
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let err = CategorySet::new(vec![
            CategorySpec {
                name: "a".into(),
                colors: scheme(),
            },
            CategorySpec {
                name: "a".into(),
                colors: scheme(),
            },
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn chart_spec_parses_minimal_json() {
        let json = r##"{
            "categories": [
                {"name": "c1", "colors": {"main": "#4ECDC4", "light": "#C7F2EF", "dark": "#3AA39C"}}
            ],
            "records": [
                {"name": "t", "start": "2025-01-01", "end": "2025-01-02", "category": "c1"}
            ]
        }"##;
        let spec: ChartSpec = serde_json::from_str(json).unwrap();
        assert!(spec.title.is_none());
        assert_eq!(spec.categories.len(), 1);
        assert!(!spec.records[0].milestone);
    }
}
