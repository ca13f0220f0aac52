use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised by the calculation pipeline and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },

    #[error("allocation of {used} hours exceeds the {total} hour budget")]
    OverBudget { used: i64, total: i64 },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl BudgetError {
    pub fn invalid_color(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::InvalidColor { .. } => Self::bad_request(err.to_string()),
            BudgetError::OverBudget { .. } => Self::unprocessable(err.to_string()),
            BudgetError::InvalidLayout(_) => Self::internal(err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
