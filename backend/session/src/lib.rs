pub mod history;
pub mod report;

pub use history::HistoryStore;
pub use report::{format_report, report_filename};
