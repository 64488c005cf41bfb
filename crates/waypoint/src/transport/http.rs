//! Async HTTP fetcher wrapping reqwest.
//!
//! Not a browser — just GET requests. Handles redirects, timeouts,
//! retry on 5xx and backoff on 429. A timeout is reported at once, never
//! retried. Anything that is still not a success after the retries is
//! reported as a [`TransportError`].

use super::Fetcher;
use crate::error::TransportError;
use crate::locator::Locator;
use async_trait::async_trait;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// Fetches documents over plain HTTP for the static navigation strategy.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    /// HTTP/1.1-only fallback client for sites that reject HTTP/2.
    h1_client: reqwest::Client,
    timeout_ms: u64,
    max_retries: u32,
}

impl HttpFetcher {
    /// Create a fetcher with a desktop browser user-agent.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        let h1_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .http1_only()
            .build()
            .unwrap_or_default();

        Self {
            client,
            h1_client,
            timeout_ms,
            max_retries: 2,
        }
    }

    /// Number of extra attempts on 5xx, 429 and connection failures.
    /// Timeouts are not retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// GET `url` and return the body of a successful response.
    ///
    /// Falls back to HTTP/1.1 on protocol errors (some CDNs reject HTTP/2).
    pub async fn get(&self, url: &str) -> Result<String, TransportError> {
        match self.get_inner(&self.client, url).await {
            Err(TransportError::Request { message, .. })
                if message.contains("http2")
                    || message.contains("protocol")
                    || message.contains("connection closed") =>
            {
                tracing::debug!(url, "retrying over HTTP/1.1 after: {message}");
                self.get_inner(&self.h1_client, url).await
            }
            other => other,
        }
    }

    async fn get_inner(
        &self,
        client: &reqwest::Client,
        url: &str,
    ) -> Result<String, TransportError> {
        let mut retries = 0u32;

        loop {
            let resp = client
                .get(url)
                .timeout(Duration::from_millis(self.timeout_ms))
                .send()
                .await;

            match resp {
                Ok(r) => {
                    let status = r.status().as_u16();

                    // Retry on 5xx
                    if status >= 500 && retries < self.max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    // Backoff on 429
                    if status == 429 && retries < self.max_retries {
                        retries += 1;
                        let retry_after = r
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(2);
                        tokio::time::sleep(Duration::from_secs(retry_after.min(10))).await;
                        continue;
                    }

                    if !r.status().is_success() {
                        return Err(TransportError::Status {
                            url: url.to_string(),
                            status,
                        });
                    }

                    return r.text().await.map_err(|e| self.classify(url, e));
                }
                Err(e) => {
                    // timeouts go back to the caller as-is
                    if e.is_timeout() {
                        return Err(self.classify(url, e));
                    }
                    if retries < self.max_retries && !e.is_builder() {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(self.classify(url, e));
                }
            }
        }
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            TransportError::Request {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, locator: &Locator) -> Result<String, TransportError> {
        tracing::debug!(url = %locator, "fetching");
        self.get(locator.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/football"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a>World Cup</a>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(2_000);
        let body = fetcher
            .fetch(&Locator::new(format!("{}/football", server.uri())))
            .await
            .unwrap();
        assert_eq!(body, "<a>World Cup</a>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(2_000).with_max_retries(0);
        let err = fetcher
            .fetch(&Locator::new(format!("{}/gone", server.uri())))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(50).with_max_retries(0);
        let err = fetcher
            .fetch(&Locator::new(server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout { timeout_ms: 50, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_timeout_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(2_000)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(300);
        let started = std::time::Instant::now();
        let err = fetcher
            .fetch(&Locator::new(server.uri()))
            .await
            .unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, TransportError::Timeout { timeout_ms: 300, .. }));
        assert!(elapsed < Duration::from_millis(1_000), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(2_000).with_max_retries(1);
        let body = fetcher.fetch(&Locator::new(server.uri())).await.unwrap();
        assert_eq!(body, "ok");
    }
}
