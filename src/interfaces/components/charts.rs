//! Text charts for the terminal presenter.

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// First/last/min/max of a charted column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSummary {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
}

impl ChartSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        Some(Self {
            first,
            last,
            min,
            max,
        })
    }
}

/// Renders `values` as a single-line sparkline at most `width` characters wide.
///
/// Longer series are bucketed and each bucket is drawn at its mean, so the
/// overall shape survives downsampling. A flat series renders as the lowest bar.
pub fn render_sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let points = downsample(values, width);
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    let top = (BARS.len() - 1) as f64;

    points
        .iter()
        .map(|v| {
            if span > 0.0 && span.is_finite() {
                let level = ((v - min) / span * top).round() as usize;
                BARS[level.min(BARS.len() - 1)]
            } else {
                BARS[0]
            }
        })
        .collect()
}

fn downsample(values: &[f64], width: usize) -> Vec<f64> {
    let n = values.len();
    if n <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|i| {
            let from = i * n / width;
            let to = ((i + 1) * n / width).max(from + 1);
            let bucket = &values[from..to];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}
