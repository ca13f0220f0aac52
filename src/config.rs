use crate::accountant::OverBudgetPolicy;
use crate::errors::BudgetError;
use crate::models::{BudgetLayout, CategoryTemplate, Palette, SliderLink};
use crate::summary::REMAINING_COLOR_KEY;
use std::collections::BTreeSet;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const WEEK_HOURS: i64 = 168;

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080)
}

pub fn resolve_layout_path() -> Option<PathBuf> {
    env::var("TIME_BUDGET_LAYOUT").ok().map(PathBuf::from)
}

pub fn resolve_policy() -> OverBudgetPolicy {
    match env::var("TIME_BUDGET_OVER_BUDGET") {
        Ok(value) => OverBudgetPolicy::parse(&value).unwrap_or_else(|| {
            warn!("unknown over-budget policy {value:?}, using flag");
            OverBudgetPolicy::Flag
        }),
        Err(_) => OverBudgetPolicy::Flag,
    }
}

pub async fn load_layout(path: Option<&Path>) -> BudgetLayout {
    let Some(path) = path else {
        return default_layout();
    };

    let layout = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<BudgetLayout>(&bytes) {
            Ok(layout) => layout,
            Err(err) => {
                error!("failed to parse layout file: {err}");
                return default_layout();
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no layout at {}, using built-in categories", path.display());
            return default_layout();
        }
        Err(err) => {
            error!("failed to read layout file: {err}");
            return default_layout();
        }
    };

    match validate_layout(&layout) {
        Ok(()) => layout,
        Err(err) => {
            error!("{err}");
            default_layout()
        }
    }
}

pub fn validate_layout(layout: &BudgetLayout) -> Result<(), BudgetError> {
    if layout.total_capacity <= 0 {
        return Err(BudgetError::InvalidLayout(
            "total_capacity must be positive".into(),
        ));
    }

    let mut seen = BTreeSet::new();
    for category in &layout.categories {
        let key = category.key.as_str();
        if key.trim().is_empty() {
            return Err(BudgetError::InvalidLayout("category key is empty".into()));
        }
        if !seen.insert(key) {
            return Err(BudgetError::InvalidLayout(format!("duplicate category {key:?}")));
        }
        if category.min < 0 {
            return Err(BudgetError::InvalidLayout(format!("{key}: min is negative")));
        }
        if category.max.is_some_and(|max| max < category.min) {
            return Err(BudgetError::InvalidLayout(format!("{key}: max is below min")));
        }
        if category.default < category.min || category.max.is_some_and(|max| category.default > max) {
            return Err(BudgetError::InvalidLayout(format!("{key}: default is out of bounds")));
        }
    }

    let defaults = layout
        .categories
        .iter()
        .try_fold(0i64, |sum, category| sum.checked_add(category.default));
    match defaults {
        Some(sum) if sum <= layout.total_capacity => {}
        Some(sum) => {
            return Err(BudgetError::InvalidLayout(format!(
                "defaults sum to {sum} hours, over the {} hour capacity",
                layout.total_capacity
            )));
        }
        None => {
            return Err(BudgetError::InvalidLayout("defaults overflow".into()));
        }
    }

    if let Some(slider) = &layout.slider {
        if !seen.contains(slider.key.as_str()) {
            return Err(BudgetError::InvalidLayout(format!(
                "slider targets unknown category {:?}",
                slider.key
            )));
        }
        if slider.max < slider.min {
            return Err(BudgetError::InvalidLayout("slider max is below min".into()));
        }
        if let Some(derived) = &slider.derived_key {
            if !seen.contains(derived.as_str()) {
                return Err(BudgetError::InvalidLayout(format!(
                    "slider derives unknown category {derived:?}"
                )));
            }
        }
    }

    Ok(())
}

pub fn default_layout() -> BudgetLayout {
    let category = |key: &str, label: &str, max: i64, default: i64| CategoryTemplate {
        key: key.to_string(),
        label: label.to_string(),
        min: 0,
        max: Some(max),
        default,
        color_key: key.to_string(),
    };

    let categories = vec![
        category("credit-hours", "Attending class", 24, 15),
        category("study-hours", "Studying", WEEK_HOURS, 45),
        category("work-hours", "Working", WEEK_HOURS, 0),
        category("commute-hours", "Commuting", WEEK_HOURS, 0),
        category("sleep-hours", "Sleeping", WEEK_HOURS, 56),
        category("personal-hours", "Meals & personal care", WEEK_HOURS, 14),
        category("leisure-hours", "Leisure", WEEK_HOURS, 0),
    ];

    let colors = [
        ("credit-hours", "#FF6384"),
        ("study-hours", "#36A2EB"),
        ("work-hours", "#FFCE56"),
        ("commute-hours", "#4BC0C0"),
        ("sleep-hours", "#9966FF"),
        ("personal-hours", "#FF9F40"),
        ("leisure-hours", "#2F4858"),
        (REMAINING_COLOR_KEY, "#E7E9ED"),
    ]
    .into_iter()
    .map(|(key, color)| (key.to_string(), color.to_string()))
    .collect();

    BudgetLayout {
        total_capacity: WEEK_HOURS,
        categories,
        slider: Some(SliderLink {
            key: "credit-hours".into(),
            min: 0,
            max: 24,
            derived_key: Some("study-hours".into()),
            factor: 3,
        }),
        palette: Palette { colors },
    }
}
