use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One category field of the form, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub label: String,
    pub value: i64,
    pub min: i64,
    pub max: Option<i64>,
    pub color_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total_capacity: i64,
    pub entries: Vec<CategoryEntry>,
}

impl Budget {
    pub fn value_of(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accounting {
    pub used_hours: i64,
    pub remaining_hours: i64,
    pub is_valid: bool,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageResult {
    pub key: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
    pub label_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub per_category: Vec<PercentageResult>,
    pub remaining_percentage: f64,
    pub chart_slices: Vec<ChartSlice>,
}

/// Declared shape of a category: bounds, default and colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub min: i64,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub default: i64,
    pub color_key: String,
}

/// Slider bound to one category, optionally driving a derived category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderLink {
    pub key: String,
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub derived_key: Option<String>,
    #[serde(default = "default_factor")]
    pub factor: i64,
}

fn default_factor() -> i64 {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Palette {
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLayout {
    pub total_capacity: i64,
    pub categories: Vec<CategoryTemplate>,
    #[serde(default)]
    pub slider: Option<SliderLink>,
    #[serde(default)]
    pub palette: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditSource {
    #[default]
    Field,
    Slider,
}

#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub source: EditSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateResponse {
    pub budget: Budget,
    pub accounting: Accounting,
    pub summary: Option<Summary>,
    pub slider_value: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub layout: BudgetLayout,
    pub defaults: RecalculateResponse,
}

#[derive(Debug, Deserialize)]
pub struct ContrastQuery {
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContrastResponse {
    pub color: String,
    pub contrast: String,
    pub luminance: f64,
}
