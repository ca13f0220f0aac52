use crate::errors::BudgetError;
use crate::models::{Accounting, CategoryEntry};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What the pipeline does once allocations exceed the total capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverBudgetPolicy {
    /// Keep going and report a negative remaining count.
    #[default]
    Flag,
    /// Refuse the recalculation so the previous display stays in place.
    Reject,
}

impl OverBudgetPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flag" => Some(Self::Flag),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn enforce(self, accounting: &Accounting, total_capacity: i64) -> Result<(), BudgetError> {
        if self == Self::Reject && accounting.over_budget {
            warn!(
                used = accounting.used_hours,
                total = total_capacity,
                "rejecting over-budget allocation"
            );
            return Err(BudgetError::OverBudget {
                used: accounting.used_hours,
                total: total_capacity,
            });
        }
        Ok(())
    }
}

pub fn accumulate(entries: &[CategoryEntry], total_capacity: i64) -> Accounting {
    let used = entries.iter().try_fold(0i64, |sum, entry| {
        if entry.value < 0 {
            return None;
        }
        sum.checked_add(entry.value)
    });

    let Some(used_hours) = used else {
        return Accounting {
            used_hours: 0,
            remaining_hours: total_capacity,
            is_valid: false,
            over_budget: false,
        };
    };

    match total_capacity.checked_sub(used_hours) {
        Some(remaining_hours) => Accounting {
            used_hours,
            remaining_hours,
            is_valid: true,
            over_budget: used_hours > total_capacity,
        },
        None => Accounting {
            used_hours: 0,
            remaining_hours: total_capacity,
            is_valid: false,
            over_budget: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(key: &str, value: i64) -> CategoryEntry {
        CategoryEntry {
            key: key.to_string(),
            label: key.to_string(),
            value,
            min: 0,
            max: None,
            color_key: key.to_string(),
        }
    }

    #[test]
    fn sums_used_and_remaining() {
        let entries = vec![entry("credit-hours", 15), entry("study-hours", 45)];
        let accounting = accumulate(&entries, 168);
        assert_eq!(accounting.used_hours, 60);
        assert_eq!(accounting.remaining_hours, 108);
        assert!(accounting.is_valid);
        assert!(!accounting.over_budget);
    }

    #[test]
    fn over_budget_is_flagged_with_negative_remaining() {
        let entries = vec![entry("sleep-hours", 100), entry("work-hours", 80)];
        let accounting = accumulate(&entries, 168);
        assert_eq!(accounting.remaining_hours, -12);
        assert!(accounting.is_valid);
        assert!(accounting.over_budget);
    }

    #[test]
    fn negative_or_overflowing_values_are_invalid() {
        let negative = accumulate(&[entry("a", -1)], 168);
        assert!(!negative.is_valid);

        let overflow = accumulate(&[entry("a", i64::MAX), entry("b", 1)], 168);
        assert!(!overflow.is_valid);
        assert_eq!(overflow.used_hours + overflow.remaining_hours, 168);
    }

    #[test]
    fn empty_entries_leave_full_capacity() {
        let accounting = accumulate(&[], 168);
        assert_eq!(accounting.used_hours, 0);
        assert_eq!(accounting.remaining_hours, 168);
        assert!(accounting.is_valid);
    }

    #[test]
    fn reject_policy_refuses_over_budget() {
        let accounting = accumulate(&[entry("a", 200)], 168);
        assert_eq!(OverBudgetPolicy::Flag.enforce(&accounting, 168), Ok(()));
        assert_eq!(
            OverBudgetPolicy::Reject.enforce(&accounting, 168),
            Err(BudgetError::OverBudget { used: 200, total: 168 })
        );
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(OverBudgetPolicy::parse("Reject"), Some(OverBudgetPolicy::Reject));
        assert_eq!(OverBudgetPolicy::parse(" flag "), Some(OverBudgetPolicy::Flag));
        assert_eq!(OverBudgetPolicy::parse("freeze"), None);
    }

    proptest! {
        #[test]
        fn used_plus_remaining_is_total(values in proptest::collection::vec(0i64..200, 0..10)) {
            let entries: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(idx, value)| entry(&format!("c{idx}"), *value))
                .collect();
            let accounting = accumulate(&entries, 168);
            prop_assert!(accounting.is_valid);
            prop_assert_eq!(accounting.used_hours + accounting.remaining_hours, 168);
        }
    }
}
