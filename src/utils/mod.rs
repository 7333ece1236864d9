pub mod document;
pub mod error;
pub mod format;
pub mod interactive;
pub mod logging;
pub mod output;

pub use error::{handle_flow, report_error, report_on_err, AppError, AppResult, FlowResult};
pub use interactive::*;
pub use output::{print_success, print_warning, DisplayFormatter, OutputStyle};
