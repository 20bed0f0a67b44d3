use crate::domain::forecast::PipelineReport;
use crate::interfaces::view_models::{ReportView, ReportViewModel, StatusMessage};
use std::io::{self, Write};

const RULE: &str = "---";

/// Writes pipeline reports as plain text.
pub struct TerminalPresenter {
    currency_label: String,
    chart_width: usize,
}

impl TerminalPresenter {
    pub fn new(currency_label: impl Into<String>, chart_width: usize) -> Self {
        Self {
            currency_label: currency_label.into(),
            chart_width,
        }
    }

    pub fn view(&self, report: &PipelineReport) -> ReportView {
        ReportViewModel::build(report, &self.currency_label, self.chart_width)
    }

    pub fn render<W: Write>(&self, out: &mut W, report: &PipelineReport) -> io::Result<()> {
        let view = self.view(report);

        writeln!(out, "{}", RULE)?;
        match &view.ticker {
            Some(ticker) => writeln!(out, "Asset price: {}", ticker)?,
            None => writeln!(out, "Asset price")?,
        }
        writeln!(out, "{}", RULE)?;

        for chart in &view.charts {
            writeln!(out, "{} ({} points)", chart.title, chart.points)?;
            writeln!(out, "  {}", chart.sparkline)?;
            writeln!(
                out,
                "  first {:.2}  last {:.2}  min {:.2}  max {:.2}",
                chart.summary.first, chart.summary.last, chart.summary.min, chart.summary.max
            )?;
        }

        if view.model_status.is_some() || view.prediction_line.is_some() {
            writeln!(out, "{}", RULE)?;
            writeln!(out, "Price forecast")?;
            writeln!(out, "{}", RULE)?;
        }
        if let Some(status) = &view.model_status {
            write_status(out, status)?;
        }
        if let Some(line) = &view.prediction_line {
            writeln!(out, "{}", line)?;
        }
        if let Some(status) = &view.status {
            write_status(out, status)?;
        }
        out.flush()
    }
}

fn write_status<W: Write>(out: &mut W, status: &StatusMessage) -> io::Result<()> {
    writeln!(out, "[{}] {}", status.severity.label(), status.text)
}
