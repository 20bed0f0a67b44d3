use crate::domain::errors::PipelineError;
use crate::domain::forecast::{PipelineReport, Prediction};
use crate::domain::market::ObservationSeries;
use crate::interfaces::components::charts::{ChartSummary, render_sparkline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// User-facing status for a halted run.
    pub fn for_error(error: &PipelineError) -> Self {
        match error {
            PipelineError::InputIncomplete => Self::new(
                Severity::Info,
                "Please select a ticker and a date range to display the charts and the estimate.",
            ),
            PipelineError::NoDataForRange { .. } => {
                Self::new(Severity::Warning, "No data available for the selected period.")
            }
            PipelineError::InsufficientHistory {
                observations,
                required,
                ..
            } => Self::new(
                Severity::Warning,
                format!(
                    "Not enough history for an estimate: {} observations, at least {} needed.",
                    observations, required
                ),
            ),
            PipelineError::ArtifactNotFound { path } => Self::new(
                Severity::Error,
                format!(
                    "The saved model file was not found. Make sure '{}' is in the expected location.",
                    path.display()
                ),
            ),
            PipelineError::ArtifactCorrupt { path, reason } => Self::new(
                Severity::Error,
                format!(
                    "The saved model file '{}' could not be loaded: {}",
                    path.display(),
                    reason
                ),
            ),
            PipelineError::ProviderFailure { ticker, reason } => Self::new(
                Severity::Error,
                format!("Could not fetch market data for {}: {}", ticker, reason),
            ),
            PipelineError::PredictionFailed { reason } => Self::new(
                Severity::Error,
                format!("The model could not produce an estimate: {}", reason),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: &'static str,
    pub sparkline: String,
    pub summary: ChartSummary,
    pub points: usize,
}

/// Display-ready rendition of a `PipelineReport`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub ticker: Option<String>,
    pub charts: Vec<ChartView>,
    pub model_status: Option<StatusMessage>,
    pub prediction_line: Option<String>,
    pub status: Option<StatusMessage>,
}

pub struct ReportViewModel;

impl ReportViewModel {
    pub fn build(report: &PipelineReport, currency_label: &str, chart_width: usize) -> ReportView {
        let charts = report
            .series
            .as_ref()
            .map(|series| Self::charts(series, chart_width))
            .unwrap_or_default();

        let (model_status, prediction_line, status) = match &report.outcome {
            Ok(prediction) => (
                Some(StatusMessage::new(
                    Severity::Info,
                    format!("Model loaded successfully ({}).", prediction.model_name),
                )),
                Some(Self::prediction_line(prediction, currency_label)),
                None,
            ),
            Err(error) => (None, None, Some(StatusMessage::for_error(error))),
        };

        ReportView {
            ticker: report.ticker.clone(),
            charts,
            model_status,
            prediction_line,
            status,
        }
    }

    pub fn prediction_line(prediction: &Prediction, currency_label: &str) -> String {
        format!(
            "Predicted close for {}: {} {:.2}",
            prediction.label_date, currency_label, prediction.value
        )
    }

    fn charts(series: &ObservationSeries, width: usize) -> Vec<ChartView> {
        let columns: [(&'static str, Vec<f64>); 2] = [
            ("Close", series.closes().into_iter().map(|(_, v)| v).collect()),
            ("Volume", series.volumes().into_iter().map(|(_, v)| v).collect()),
        ];

        columns
            .into_iter()
            .filter_map(|(title, values)| {
                let summary = ChartSummary::from_values(&values)?;
                Some(ChartView {
                    title,
                    sparkline: render_sparkline(&values, width),
                    summary,
                    points: values.len(),
                })
            })
            .collect()
    }
}
