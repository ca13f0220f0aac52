use crate::accountant::OverBudgetPolicy;
use crate::models::BudgetLayout;
use std::sync::Arc;

/// Read-only configuration shared by every request; no per-user state.
#[derive(Clone)]
pub struct AppState {
    pub layout: Arc<BudgetLayout>,
    pub policy: OverBudgetPolicy,
}

impl AppState {
    pub fn new(layout: BudgetLayout, policy: OverBudgetPolicy) -> Self {
        Self {
            layout: Arc::new(layout),
            policy,
        }
    }
}
