//! Reads raw form fields into a [`Budget`] and runs the three-stage pipeline:
//! normalize, then accumulate, then summarize.

use crate::accountant::{accumulate, OverBudgetPolicy};
use crate::errors::BudgetError;
use crate::models::{
    Budget, BudgetLayout, CategoryEntry, CategoryTemplate, EditSource, RecalculateResponse,
};
use crate::normalize::{normalize, normalize_value};
use crate::summary::summarize;
use std::collections::BTreeMap;
use tracing::debug;

pub type Recalculation = RecalculateResponse;

pub fn read_form(layout: &BudgetLayout, raw: &BTreeMap<String, String>) -> Budget {
    for key in raw.keys() {
        if !layout.categories.iter().any(|category| &category.key == key) {
            debug!("ignoring unknown form field {key:?}");
        }
    }

    let entries = layout
        .categories
        .iter()
        .map(|category| {
            let value = raw
                .get(&category.key)
                .map(|value| normalize(value, category.min, category.max))
                .unwrap_or(category.min);
            entry_from(category, value)
        })
        .collect();

    Budget {
        total_capacity: layout.total_capacity,
        entries,
    }
}

pub fn recalculate(
    layout: &BudgetLayout,
    policy: OverBudgetPolicy,
    raw: &BTreeMap<String, String>,
    source: EditSource,
) -> Result<Recalculation, BudgetError> {
    let mut budget = read_form(layout, raw);
    if source == EditSource::Slider {
        apply_slider(layout, &mut budget);
    }
    run_pipeline(layout, policy, budget)
}

/// Restores every category to its declared default and recomputes.
pub fn reset(layout: &BudgetLayout, policy: OverBudgetPolicy) -> Result<Recalculation, BudgetError> {
    let entries = layout
        .categories
        .iter()
        .map(|category| entry_from(category, category.default))
        .collect();
    let budget = Budget {
        total_capacity: layout.total_capacity,
        entries,
    };
    run_pipeline(layout, policy, budget)
}

/// Slider edits rewrite the derived category as `slider value * factor`.
fn apply_slider(layout: &BudgetLayout, budget: &mut Budget) {
    let Some(slider) = &layout.slider else {
        return;
    };
    let Some(derived_key) = &slider.derived_key else {
        return;
    };
    let Some(credits) = budget.value_of(&slider.key) else {
        return;
    };

    let suggested = credits.saturating_mul(slider.factor);
    if let Some(entry) = budget.entries.iter_mut().find(|entry| &entry.key == derived_key) {
        entry.value = normalize_value(suggested, entry.min, entry.max);
        debug!(credits, study = entry.value, "derived hours from slider");
    }
}

fn run_pipeline(
    layout: &BudgetLayout,
    policy: OverBudgetPolicy,
    budget: Budget,
) -> Result<Recalculation, BudgetError> {
    let accounting = accumulate(&budget.entries, budget.total_capacity);
    policy.enforce(&accounting, budget.total_capacity)?;

    let summary = if accounting.is_valid {
        Some(summarize(&budget, accounting.remaining_hours, &layout.palette))
    } else {
        debug!("suppressing summary for invalid accounting");
        None
    };

    let slider_value = layout.slider.as_ref().and_then(|slider| {
        budget
            .value_of(&slider.key)
            .map(|value| normalize_value(value, slider.min, Some(slider.max)))
    });

    Ok(Recalculation {
        budget,
        accounting,
        summary,
        slider_value,
    })
}

fn entry_from(category: &CategoryTemplate, value: i64) -> CategoryEntry {
    CategoryEntry {
        key: category.key.clone(),
        label: category.label.clone(),
        value,
        min: category.min,
        max: category.max,
        color_key: category.color_key.clone(),
    }
}
