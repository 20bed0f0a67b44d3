use crate::config::{Config, DataProvider};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::csv_market_data::CsvMarketDataService;
use crate::infrastructure::mock::MockMarketDataService;
use crate::infrastructure::yahoo::YahooMarketDataService;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_market_data_service(config: &Config) -> Arc<dyn MarketDataService> {
        let service: Arc<dyn MarketDataService> = match config.data_provider {
            DataProvider::Yahoo => Arc::new(YahooMarketDataService::new(
                config.yahoo_base_url.clone(),
                config.provider_timeout,
            )),
            DataProvider::Csv => Arc::new(CsvMarketDataService::new(config.csv_data_dir.clone())),
            DataProvider::Mock => Arc::new(MockMarketDataService::with_demo_data(
                Local::now().date_naive(),
            )),
        };
        info!("Market data provider: {}", service.provider_name());
        service
    }
}
