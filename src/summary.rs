use crate::contrast::{contrast_color_for, DARK_TEXT};
use crate::models::{Budget, ChartSlice, Palette, PercentageResult, Summary};
use tracing::debug;

pub const REMAINING_LABEL: &str = "Remaining";
pub const REMAINING_COLOR_KEY: &str = "remaining";
pub const DEFAULT_SLICE_COLOR: &str = "#C9CBCF";

impl Palette {
    /// Looks up a colour key, falling back to the neutral slice colour.
    pub fn resolve(&self, color_key: &str) -> &str {
        self.colors
            .get(color_key)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SLICE_COLOR)
    }
}

/// Share of `total` taken by `value`, in percent, rounded to two decimals.
pub fn percentage_of(value: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(value as f64 / total as f64 * 100.0)
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}%")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn summarize(budget: &Budget, remaining_hours: i64, palette: &Palette) -> Summary {
    let per_category: Vec<PercentageResult> = budget
        .entries
        .iter()
        .map(|entry| PercentageResult {
            key: entry.key.clone(),
            percentage: percentage_of(entry.value, budget.total_capacity),
        })
        .collect();

    let remaining_percentage = percentage_of(remaining_hours, budget.total_capacity);

    let mut chart_slices: Vec<ChartSlice> = budget
        .entries
        .iter()
        .zip(&per_category)
        .map(|(entry, result)| slice(&entry.label, result.percentage, palette.resolve(&entry.color_key)))
        .collect();

    // pie wedges cannot be negative; the raw figure stays in remaining_percentage
    chart_slices.push(slice(
        REMAINING_LABEL,
        remaining_percentage.max(0.0),
        palette.resolve(REMAINING_COLOR_KEY),
    ));

    debug!(slices = chart_slices.len(), remaining_percentage, "summarized allocation");

    Summary {
        per_category,
        remaining_percentage,
        chart_slices,
    }
}

fn slice(label: &str, value: f64, color: &str) -> ChartSlice {
    let label_color = match contrast_color_for(color) {
        Ok(contrast) => contrast,
        Err(err) => {
            debug!("no contrast for slice {label:?}: {err}");
            DARK_TEXT
        }
    };
    ChartSlice {
        label: label.to_string(),
        value,
        color: color.to_string(),
        label_color: label_color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accountant::accumulate;
    use crate::contrast::LIGHT_TEXT;
    use crate::models::CategoryEntry;
    use proptest::prelude::*;

    fn entry(key: &str, value: i64) -> CategoryEntry {
        CategoryEntry {
            key: key.to_string(),
            label: key.to_string(),
            value,
            min: 0,
            max: Some(168),
            color_key: key.to_string(),
        }
    }

    fn budget(values: &[(&str, i64)]) -> Budget {
        Budget {
            total_capacity: 168,
            entries: values.iter().map(|(key, value)| entry(key, *value)).collect(),
        }
    }

    fn palette() -> Palette {
        let mut palette = Palette::default();
        palette.colors.insert("credit-hours".into(), "#36A2EB".into());
        palette.colors.insert("study-hours".into(), "#FFCE56".into());
        palette.colors.insert(REMAINING_COLOR_KEY.into(), "#000000".into());
        palette
    }

    #[test]
    fn example_week_percentages() {
        let budget = budget(&[("credit-hours", 15), ("study-hours", 45)]);
        let accounting = accumulate(&budget.entries, budget.total_capacity);
        let summary = summarize(&budget, accounting.remaining_hours, &palette());

        assert_eq!(summary.per_category[0].percentage, 8.93);
        assert_eq!(summary.per_category[1].percentage, 26.79);
        assert_eq!(summary.remaining_percentage, 64.29);

        let labels: Vec<_> = summary.chart_slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["credit-hours", "study-hours", REMAINING_LABEL]);
        assert_eq!(summary.chart_slices[2].value, 64.29);
        assert_eq!(summary.chart_slices[2].label_color, LIGHT_TEXT);
    }

    #[test]
    fn bounds_give_zero_and_hundred() {
        let budget = budget(&[("work-hours", 0), ("sleep-hours", 168)]);
        let summary = summarize(&budget, 0, &palette());
        assert_eq!(format_percentage(summary.per_category[0].percentage), "0.00%");
        assert_eq!(format_percentage(summary.per_category[1].percentage), "100.00%");
        assert_eq!(format_percentage(summary.remaining_percentage), "0.00%");
    }

    #[test]
    fn unknown_color_key_uses_default() {
        let budget = budget(&[("commute-hours", 10)]);
        let summary = summarize(&budget, 158, &palette());
        assert_eq!(summary.chart_slices[0].color, DEFAULT_SLICE_COLOR);
        assert_eq!(summary.chart_slices[0].label_color, DARK_TEXT);
    }

    #[test]
    fn negative_remaining_is_clamped_on_the_chart_only() {
        let budget = budget(&[("work-hours", 100), ("sleep-hours", 80)]);
        let accounting = accumulate(&budget.entries, budget.total_capacity);
        let summary = summarize(&budget, accounting.remaining_hours, &palette());
        assert_eq!(summary.remaining_percentage, -7.14);
        assert_eq!(summary.chart_slices.last().map(|s| s.value), Some(0.0));
    }

    #[test]
    fn zero_capacity_yields_zero_percentages() {
        assert_eq!(percentage_of(10, 0), 0.0);
    }

    proptest! {
        #[test]
        fn percentages_sum_to_hundred(values in proptest::collection::vec(0i64..30, 1..6)) {
            let pairs: Vec<(String, i64)> = values
                .iter()
                .enumerate()
                .map(|(idx, value)| (format!("c{idx}"), *value))
                .collect();
            let refs: Vec<(&str, i64)> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
            let budget = budget(&refs);
            let accounting = accumulate(&budget.entries, budget.total_capacity);
            prop_assume!(!accounting.over_budget);

            let summary = summarize(&budget, accounting.remaining_hours, &palette());
            let total: f64 = summary.chart_slices.iter().map(|s| s.value).sum();
            let epsilon = 0.02 * summary.chart_slices.len() as f64;
            prop_assert!((total - 100.0).abs() <= epsilon, "total {total}");
        }
    }
}
