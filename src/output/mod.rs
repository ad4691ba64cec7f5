//! Output rendering for prediction results

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::PredictionReport;
