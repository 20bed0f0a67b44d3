use serde::Deserialize;

// ===== Chart API payloads =====

#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

#[derive(Debug, Deserialize)]
pub struct YahooChart {
    pub result: Option<Vec<YahooChartResult>>,
    pub error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl YahooApiError {
    /// Unknown symbols and empty ranges come back as errors; they mean "no rows".
    pub fn is_no_data(&self) -> bool {
        let description = self.description.to_lowercase();
        self.code.eq_ignore_ascii_case("Not Found")
            || description.contains("no data found")
            || description.contains("data doesn't exist")
            || description.contains("delisted")
    }
}

#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: Option<YahooMeta>,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooMeta {
    pub currency: Option<String>,
    pub symbol: Option<String>,
    /// Exchange offset from UTC in seconds.
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct YahooIndicators {
    #[serde(default)]
    pub quote: Vec<YahooQuote>,
    /// Split and dividend adjusted close, absent for some instruments.
    #[serde(default)]
    pub adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YahooAdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YahooQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}
