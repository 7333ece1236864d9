use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate question: {0}")]
    Duplicate(String),

    #[error("Value too long: {0}")]
    ValueTooLong(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Constraint violations reported by a store after a write was attempted
    pub fn is_constraint(&self) -> bool {
        matches!(self, AppError::Duplicate(_) | AppError::ValueTooLong(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    EmptyList {
        item_type: String,
    },
    Cancelled(String),
    Success(String),
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Validation(msg) => {
            println!("✋ {}", OutputStyle::error(msg));
        }
        AppError::Duplicate(_) => {
            println!("⚠️  {}", OutputStyle::warning("Question already registered (unique constraint)."));
        }
        AppError::ValueTooLong(_) => {
            println!("⚠️  {}", OutputStyle::warning("Value exceeds the size allowed for the column."));
        }
        AppError::Sync(msg) => {
            println!("⚠️  {}", OutputStyle::warning(&format!("Sync: {}", msg)));
        }
        AppError::Connection(msg) => {
            eprintln!("❌ {}", OutputStyle::error(&format!("Could not reach the database: {}", msg)));
        }
        AppError::Store(msg) | AppError::Io(msg) | AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}

/// Report a failed result and hand back the value of a successful one
pub fn report_on_err<T>(result: AppResult<T>) -> Option<T> {
    result.inspect_err(report_error).ok()
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::EmptyList { item_type } => {
            let msg = format!("No {} found", item_type);
            println!("{}", OutputStyle::muted(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_classification() {
        assert!(AppError::Duplicate("q".into()).is_constraint());
        assert!(AppError::ValueTooLong("question".into()).is_constraint());
        assert!(!AppError::Validation("active".into()).is_constraint());
        assert!(!AppError::Store("disk I/O error".into()).is_constraint());
    }

    #[test]
    fn test_report_on_err_passes_values_through() {
        assert_eq!(report_on_err(Ok::<_, AppError>(7)), Some(7));
        assert_eq!(report_on_err::<i64>(Err(AppError::Store("locked".into()))), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(ref msg) if msg.contains("denied")));
    }
}
