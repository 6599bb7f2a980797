pub mod report_handler;

pub use report_handler::{list_flood_reports, submit_report, ReportState};
