use crate::domain::errors::PipelineError;
use crate::domain::market::ObservationSeries;
use chrono::NaiveDate;
use uuid::Uuid;

/// Raw selections forwarded by the presentation layer for one interaction.
/// Any of them may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineInput {
    pub ticker: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub future_date: Option<NaiveDate>,
}

impl PipelineInput {
    /// Turns the selections into a request, or `InputIncomplete` when the
    /// ticker or either bound of the range is missing. A missing future date
    /// falls back to the end of the range; it only labels the estimate.
    pub fn into_request(self) -> Result<PipelineRequest, PipelineError> {
        let ticker = self
            .ticker
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty());

        match (ticker, self.start, self.end) {
            (Some(ticker), Some(start), Some(end)) => Ok(PipelineRequest {
                ticker,
                start,
                end,
                future_date: self.future_date.unwrap_or(end),
            }),
            _ => Err(PipelineError::InputIncomplete),
        }
    }
}

/// Immutable, complete input of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Label attached to the estimate. Not a model input.
    pub future_date: NaiveDate,
}

/// One-step-ahead closing price estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub label_date: NaiveDate,
    pub model_name: String,
}

/// Everything the presentation layer needs after one run.
#[derive(Debug)]
pub struct PipelineReport {
    pub request_id: Uuid,
    pub ticker: Option<String>,
    /// Present whenever the fetch returned data, even if a later stage halted.
    pub series: Option<ObservationSeries>,
    pub outcome: Result<Prediction, PipelineError>,
}

impl PipelineReport {
    pub fn prediction(&self) -> Option<&Prediction> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&PipelineError> {
        self.outcome.as_ref().err()
    }

    pub fn outcome_code(&self) -> &'static str {
        match &self.outcome {
            Ok(_) => "predicted",
            Err(e) => e.code(),
        }
    }
}
