use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; tickercast/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used by market data providers.
    ///
    /// No retry middleware: a failed request ends the current pipeline run.
    pub fn create_client(timeout: Duration) -> Client {
        Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
