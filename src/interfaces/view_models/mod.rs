pub mod report_view_model;

pub use report_view_model::{ChartView, ReportView, ReportViewModel, Severity, StatusMessage};
