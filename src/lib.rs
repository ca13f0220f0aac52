pub mod accountant;
pub mod app;
pub mod config;
pub mod contrast;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod state;
pub mod summary;
pub mod ui;

pub use accountant::{accumulate, OverBudgetPolicy};
pub use app::router;
pub use config::{default_layout, load_layout, resolve_layout_path, resolve_policy, resolve_port};
pub use contrast::contrast_color_for;
pub use errors::{AppError, BudgetError};
pub use form::{read_form, recalculate, reset};
pub use normalize::normalize;
pub use state::AppState;
pub use summary::summarize;
