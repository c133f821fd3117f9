use crate::{
    config::ClientConfig,
    error::{FetchError, FetchResult},
    models::{SortKey, StockAnalysis, StockHistory, StockSummary, TopStocks},
    utils::{Logger, Timer},
};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// The stock-data service as seen by the orchestrators
#[async_trait]
pub trait StockDataSource: Send + Sync {
    /// Top 10 stocks ranked by `sort_by`, in the service's order
    async fn top10(&self, sort_by: SortKey) -> FetchResult<Vec<StockSummary>>;

    /// Company name plus chronological closing prices
    async fn history(&self, ticker: &str) -> FetchResult<StockHistory>;

    /// Derived analysis for one ticker
    async fn analyze(&self, ticker: &str) -> FetchResult<StockAnalysis>;
}

/// HTTP client for the stock-data service
pub struct HttpStockService {
    client: reqwest::Client,
    base_url: Url,
    logger: Logger,
}

impl HttpStockService {
    pub fn new(config: &ClientConfig) -> FetchResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "cannot be used as a base".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            client,
            base_url,
            logger: Logger::new("STOCK_SERVICE"),
        })
    }

    pub fn top10_url(&self) -> Url {
        self.endpoint(&["api", "stocks", "top10"])
    }

    pub fn history_url(&self, ticker: &str) -> Url {
        self.endpoint(&["api", "stocks", ticker, "history"])
    }

    pub fn analyze_url(&self, ticker: &str) -> Url {
        self.endpoint(&["api", "stocks", ticker, "analyze"])
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so `/`, `?` and `#` inside a ticker stay within its segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a prepared request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> FetchResult<T> {
        let timer = Timer::start(url.as_str());

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            self.logger.debug(&format!("{} responded with {}", url, status));
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let decoded = serde_json::from_slice::<T>(&body).map_err(|e| FetchError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        timer.log_elapsed("STOCK_SERVICE");
        Ok(decoded)
    }
}

#[async_trait]
impl StockDataSource for HttpStockService {
    async fn top10(&self, sort_by: SortKey) -> FetchResult<Vec<StockSummary>> {
        let url = self.top10_url();
        self.logger.debug(&format!("GET {} sort_by={}", url, sort_by));

        let request = self.client.get(url.clone()).query(&[("sort_by", sort_by.as_str())]);
        let top: TopStocks = self.send_json(request, &url).await?;

        if let Some(echoed) = top.sorted_by.as_deref() {
            if echoed != sort_by.as_str() {
                self.logger.warn(&format!(
                    "Requested sort_by={} but service reported {}",
                    sort_by, echoed
                ));
            }
        }

        self.logger.debug_with_data(
            "Ranking received",
            top.stocks.iter().map(|s| s.ticker.as_str()).collect::<Vec<_>>(),
        );
        Ok(top.stocks)
    }

    async fn history(&self, ticker: &str) -> FetchResult<StockHistory> {
        let url = self.history_url(ticker);
        self.logger.debug(&format!("GET {}", url));

        self.send_json(self.client.get(url.clone()), &url).await
    }

    async fn analyze(&self, ticker: &str) -> FetchResult<StockAnalysis> {
        let url = self.analyze_url(ticker);
        self.logger.debug(&format!("POST {}", url));

        self.send_json(self.client.post(url.clone()), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        let service = HttpStockService::new(&config);
        assert!(service.is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::new("http://localhost:8000/").unwrap();
        let service = HttpStockService::new(&config).unwrap();
        assert_eq!(service.top10_url().as_str(), "http://localhost:8000/api/stocks/top10");
        assert_eq!(service.history_url("MSFT").as_str(), "http://localhost:8000/api/stocks/MSFT/history");
        assert_eq!(service.analyze_url("MSFT").as_str(), "http://localhost:8000/api/stocks/MSFT/analyze");
    }

    #[test]
    fn test_base_path_is_kept() {
        let config = ClientConfig::new("https://example.com/market/").unwrap();
        let service = HttpStockService::new(&config).unwrap();
        assert_eq!(
            service.history_url("AAPL").as_str(),
            "https://example.com/market/api/stocks/AAPL/history"
        );
    }

    #[test]
    fn test_ticker_stays_in_one_segment() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        let service = HttpStockService::new(&config).unwrap();

        let url = service.history_url("BRK/B");
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments, ["api", "stocks", "BRK%2FB", "history"]);

        let url = service.analyze_url("MSFT?");
        assert_eq!(url.path(), "/api/stocks/MSFT%3F/analyze");
        assert_eq!(url.query(), None);

        let url = service.history_url("A#B");
        assert_eq!(url.path(), "/api/stocks/A%23B/history");
        assert_eq!(url.fragment(), None);
    }
}
