//! HTTP client for a MetaTrader terminal bridge.
//!
//! The bridge is a small REST service in front of the terminal exposing
//! candles, deal history, and pending-order placement. Market-data reads are
//! retried with exponential backoff; order submission is sent exactly once,
//! since a resend could double-place the order.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::auth::{sign_request, Credentials};
use super::types::{BridgeCandle, DealCountResponse, PendingOrderRequest, PendingOrderResponse};
use crate::config::VenueConfig;
use crate::types::{Candle, OrderCandidate, OrderResult, Symbol};
use crate::venue::{MarketData, OrderGateway, TradeHistory, VenueError, VenueResult};

/// Bridge client configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:6542".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl BridgeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Terminal bridge API client
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http_client: Client,
    credentials: Option<Credentials>,
    base_url: String,
    max_retries: u32,
}

impl BridgeClient {
    /// Create a client with explicit configuration and optional credentials.
    pub fn new(config: BridgeConfig, credentials: Option<Credentials>) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            credentials,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        }
    }

    /// Create a client from the venue section of the loaded config.
    pub fn from_config(config: &VenueConfig) -> VenueResult<Self> {
        let credentials =
            Credentials::from_parts(config.api_key.as_deref(), config.api_secret.as_deref())?;
        Ok(Self::new(
            BridgeConfig::default()
                .with_base_url(&config.base_url)
                .with_timeout(Duration::from_secs(config.timeout_secs))
                .with_max_retries(config.max_retries),
            credentials,
        ))
    }

    /// Execute a read request with retry and exponential backoff.
    async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> VenueResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = VenueResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s...
                let delay = Duration::from_secs(2u64.pow(attempt - 1));
                debug!("Retrying after {}ms", delay.as_millis());
                sleep(delay).await;
            }

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    warn!(
                        "Bridge request failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.max_retries + 1,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| VenueError::Api("request failed after retries".to_string())))
    }

    async fn get_json<R>(
        http_client: Client,
        url: String,
        params: Vec<(String, String)>,
        api_key: Option<String>,
    ) -> VenueResult<R>
    where
        R: DeserializeOwned,
    {
        let mut request = http_client.get(&url).query(&params);
        if let Some(key) = api_key {
            request = request.header("X-BRIDGE-APIKEY", key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(VenueError::Api(format!("{}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| VenueError::Parse(e.to_string()))
    }

    fn api_key(&self) -> Option<String> {
        self.credentials.as_ref().map(|c| c.api_key().to_string())
    }
}

impl MarketData for BridgeClient {
    async fn get_candles(
        &self,
        symbol: &Symbol,
        timeframe: &str,
        count: usize,
    ) -> VenueResult<Vec<Candle>> {
        let url = format!("{}/candles", self.base_url);
        let params = vec![
            ("symbol".to_string(), symbol.as_str().to_string()),
            ("timeframe".to_string(), timeframe.to_string()),
            ("count".to_string(), count.to_string()),
        ];

        let raw: Vec<BridgeCandle> = self
            .execute_with_retry(|| {
                Self::get_json(
                    self.http_client.clone(),
                    url.clone(),
                    params.clone(),
                    self.api_key(),
                )
            })
            .await?;

        let mut candles = raw
            .into_iter()
            .map(|c| {
                c.into_candle()
                    .ok_or_else(|| VenueError::Parse("candle timestamp out of range".to_string()))
            })
            .collect::<VenueResult<Vec<_>>>()?;

        // Enforce the oldest-first contract regardless of bridge ordering
        candles.sort_by_key(|c| c.datetime);
        Ok(candles)
    }
}

impl TradeHistory for BridgeClient {
    async fn count_trades_today(&self, symbol: &Symbol) -> VenueResult<usize> {
        let url = format!("{}/history/deals/count", self.base_url);
        let params = vec![("symbol".to_string(), symbol.as_str().to_string())];

        let response: DealCountResponse = self
            .execute_with_retry(|| {
                Self::get_json(
                    self.http_client.clone(),
                    url.clone(),
                    params.clone(),
                    self.api_key(),
                )
            })
            .await?;

        Ok(response.count)
    }
}

impl OrderGateway for BridgeClient {
    async fn place_pending_order(
        &self,
        symbol: &Symbol,
        candidate: &OrderCandidate,
    ) -> VenueResult<OrderResult> {
        let url = format!("{}/orders", self.base_url);
        let request = PendingOrderRequest::from_candidate(symbol.as_str(), candidate);
        let body = serde_json::to_string(&request).map_err(|e| VenueError::Parse(e.to_string()))?;

        let mut http_request = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(credentials) = &self.credentials {
            let signature = sign_request(&body, credentials.api_secret());
            http_request = http_request
                .header("X-BRIDGE-APIKEY", credentials.api_key())
                .header("X-BRIDGE-SIGNATURE", signature);
        }

        let response = http_request.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(VenueError::Api(format!("{}: {}", status, text)));
        }

        let parsed: PendingOrderResponse =
            serde_json::from_str(&text).map_err(|e| VenueError::Parse(e.to_string()))?;

        if parsed.is_accepted() {
            let order_id = parsed
                .order
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Ok(OrderResult::Accepted { order_id })
        } else {
            let reason = parsed
                .comment
                .unwrap_or_else(|| format!("retcode {}", parsed.retcode));
            Ok(OrderResult::Rejected { reason })
        }
    }
}
