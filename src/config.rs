use tokio::time::Duration;

use crate::retry::RetryPolicy;
use crate::scheduler::DEFAULT_POLL_INTERVAL;
use crate::transport::http::DEFAULT_TIMEOUT;

/// Public game service.
pub const DEFAULT_SERVER_URL: &str = "https://go-pjatk-server.fly.dev/api";

/// Runtime settings of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub poll_interval: Duration,
}

impl ClientConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_delay)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            retry_attempts: retry.max_attempts(),
            retry_delay: retry.delay(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
