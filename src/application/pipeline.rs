//! One forward pass: fetch → features → scale → load model → predict.
//!
//! Each call to [`ForecastPipeline::run`] is one user interaction. Every halt
//! is turned into a terminal status on the returned report; nothing is retried
//! and nothing is cached between runs.

use crate::application::market_data::{MIN_HISTORY, build_features, scale};
use crate::application::ml::ModelLoader;
use crate::domain::errors::PipelineError;
use crate::domain::forecast::{PipelineInput, PipelineReport, PipelineRequest, Prediction};
use crate::domain::market::ObservationSeries;
use crate::domain::ports::MarketDataService;
use crate::infrastructure::observability::{Metrics, StageTimer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

pub struct ForecastPipeline {
    market_data: Arc<dyn MarketDataService>,
    model_loader: Arc<dyn ModelLoader>,
    model_path: PathBuf,
    metrics: Metrics,
}

impl ForecastPipeline {
    pub fn new(
        market_data: Arc<dyn MarketDataService>,
        model_loader: Arc<dyn ModelLoader>,
        model_path: PathBuf,
        metrics: Metrics,
    ) -> Self {
        Self {
            market_data,
            model_loader,
            model_path,
            metrics,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub async fn run(&self, input: PipelineInput) -> PipelineReport {
        let request_id = Uuid::new_v4();
        let span = info_span!("pipeline", %request_id);

        async move {
            let report = match input.into_request() {
                Ok(request) => self.execute(request_id, request).await,
                Err(e) => {
                    info!("Pipeline: waiting for ticker and date range");
                    PipelineReport {
                        request_id,
                        ticker: None,
                        series: None,
                        outcome: Err(e),
                    }
                }
            };

            self.metrics.inc_runs(report.outcome_code());
            report
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request_id: Uuid, request: PipelineRequest) -> PipelineReport {
        info!(
            "Pipeline: {} from {} to {} via {} (label {})",
            request.ticker,
            request.start,
            request.end,
            self.market_data.provider_name(),
            request.future_date
        );

        let halt = |series: Option<ObservationSeries>, err: PipelineError| PipelineReport {
            request_id,
            ticker: Some(request.ticker.clone()),
            series,
            outcome: Err(err),
        };

        // 1. Fetch
        let fetched = {
            let _timer = StageTimer::start(&self.metrics, "fetch");
            self.market_data
                .get_daily_history(&request.ticker, request.start, request.end)
                .await
        };
        let series = match fetched {
            Ok(series) => series,
            Err(e) => {
                error!("Pipeline: fetch failed for {}: {}", request.ticker, e);
                return halt(
                    None,
                    PipelineError::ProviderFailure {
                        ticker: request.ticker.clone(),
                        reason: e.to_string(),
                    },
                );
            }
        };

        self.metrics.set_observations(&request.ticker, series.len());
        if series.is_empty() {
            warn!(
                "Pipeline: no data for {} between {} and {}",
                request.ticker, request.start, request.end
            );
            return halt(
                None,
                PipelineError::NoDataForRange {
                    ticker: request.ticker.clone(),
                },
            );
        }
        debug!(
            "Pipeline: fetched {} observations ({:?}..{:?})",
            series.len(),
            series.first_date(),
            series.last_date()
        );

        // 2. Features
        let rows = {
            let _timer = StageTimer::start(&self.metrics, "features");
            build_features(&series)
        };
        if rows.is_empty() {
            warn!(
                "Pipeline: {} has only {} observations, need {}",
                request.ticker,
                series.len(),
                MIN_HISTORY
            );
            let observations = series.len();
            return halt(
                Some(series),
                PipelineError::InsufficientHistory {
                    ticker: request.ticker.clone(),
                    observations,
                    required: MIN_HISTORY,
                },
            );
        }

        // 3. Scale, refit on this window
        let matrix = {
            let _timer = StageTimer::start(&self.metrics, "scale");
            scale(&rows)
        };
        let Some(latest) = matrix.last_row().copied() else {
            let observations = series.len();
            return halt(
                Some(series),
                PipelineError::InsufficientHistory {
                    ticker: request.ticker.clone(),
                    observations,
                    required: MIN_HISTORY,
                },
            );
        };

        // 4. Load model
        let loaded = {
            let _timer = StageTimer::start(&self.metrics, "load");
            self.model_loader.load(&self.model_path)
        };
        let model = match loaded {
            Ok(model) => model,
            Err(e) => {
                error!("Pipeline: {}", e);
                return halt(Some(series), e.into());
            }
        };

        // 5. Predict on the most recent row only
        let predicted = {
            let _timer = StageTimer::start(&self.metrics, "predict");
            model.predict(&latest)
        };
        match predicted {
            Ok(value) => {
                info!(
                    "Pipeline: {} predicted close {:.2} for {} ({} {})",
                    request.ticker,
                    value,
                    request.future_date,
                    model.name(),
                    model.version()
                );
                self.metrics.set_last_prediction(&request.ticker, value);
                PipelineReport {
                    request_id,
                    ticker: Some(request.ticker.clone()),
                    series: Some(series),
                    outcome: Ok(Prediction {
                        value,
                        label_date: request.future_date,
                        model_name: model.name().to_string(),
                    }),
                }
            }
            Err(e) => {
                error!("Pipeline: {}", e);
                halt(Some(series), e.into())
            }
        }
    }
}
