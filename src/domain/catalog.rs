// src/domain/catalog.rs
use crate::constants::{DEFAULT_PAGE_SIZE, EMPTY_CELL, MAX_PAGE_SIZE};
use crate::util::text::format_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Columns of the results table, in display order.
pub const RESULT_COLUMNS: [&str; 16] = [
    "id",
    "mission",
    "object_id",
    "ra",
    "dec",
    "stellar_temperature",
    "stellar_radius",
    "planet_radius",
    "eq_temperature",
    "distance",
    "surface_gravity",
    "orbital_period",
    "insol_flux",
    "depth",
    "final_classification",
    "final_confidence",
];

/// Numeric fields the catalog can filter by range (`min_<field>` / `max_<field>`).
pub const RANGE_FIELDS: [&str; 10] = [
    "stellar_temperature",
    "stellar_radius",
    "planet_radius",
    "eq_temperature",
    "distance",
    "surface_gravity",
    "orbital_period",
    "insol_flux",
    "depth",
    "final_confidence",
];

/// One catalog row. Records are open objects; only the named columns are rendered.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CatalogRecord(pub Map<String, Value>);

impl CatalogRecord {
    /// Display text for a column: `-` for null or missing, grouped digits for numbers.
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => EMPTY_CELL.to_string(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => format_number(v),
                None => n.to_string(),
            },
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// A page of search results as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SearchResultPage {
    #[serde(default)]
    pub items: Vec<CatalogRecord>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl SearchResultPage {
    pub fn pager(&self) -> Pager {
        Pager {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Prev,
    Next,
}

/// Page arithmetic for the Prev/Next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pager {
    /// `ceil(total / page_size)`, or 1 when the page size is 0.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size as u64)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// False on the last page, and on `u32::MAX` where no further page can be addressed.
    pub fn has_next(&self) -> bool {
        self.page < u32::MAX && (self.page as u64) < self.total_pages()
    }

    /// The page a control leads to, or `None` when it is disabled.
    pub fn target(&self, action: PagerAction) -> Option<u32> {
        match action {
            PagerAction::Prev if self.has_prev() => Some(self.page - 1),
            PagerAction::Next if self.has_next() => Some(self.page.saturating_add(1)),
            _ => None,
        }
    }
}

/// Current values of the search form. Empty fields are left out of the query.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchForm {
    pub mission: Option<String>,
    pub final_classification: Option<String>,
    pub object_id: Option<String>,
    /// `(field, min, max)` for entries of [`RANGE_FIELDS`]
    pub ranges: Vec<(String, Option<f64>, Option<f64>)>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchForm {
    pub fn with_range(mut self, field: &str, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.ranges.push((field.to_string(), min, max));
        }
        self
    }

    /// Copy of the form with the pager overrides applied.
    pub fn at_page(&self, page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..self.clone()
        }
    }

    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Serialize non-empty fields into query pairs, in form order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |key: &str, value: &Option<String>| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), v.to_string()));
            }
        };

        push_text("mission", &self.mission);
        push_text("final_classification", &self.final_classification);
        push_text("object_id", &self.object_id);
        push_text("order_by", &self.order_by);
        push_text("order_dir", &self.order_dir);

        for (field, min, max) in &self.ranges {
            if let Some(v) = min {
                pairs.push((format!("min_{field}"), v.to_string()));
            }
            if let Some(v) = max {
                pairs.push((format!("max_{field}"), v.to_string()));
            }
        }

        pairs.push(("page".to_string(), self.effective_page().to_string()));
        pairs.push(("page_size".to_string(), self.effective_page_size().to_string()));
        pairs
    }
}
