use std::time::Duration;

use async_trait::async_trait;

use super::ProbeError;
use crate::application::config::EndpointConfig;
use crate::domain::entities::DependencyStatus;
use crate::domain::ports::DependencyProbe;

/// Opens a multiplexed client connection and issues `PING`.
pub struct RedisProbe {
    endpoint: EndpointConfig,
    timeout: Duration,
}

impl RedisProbe {
    #[must_use]
    pub fn new(endpoint: &EndpointConfig) -> Self {
        Self {
            endpoint: endpoint.clone(),
            timeout: Duration::from_secs(endpoint.timeout_secs),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn ping(&self) -> Result<(), ProbeError> {
        let client = redis::Client::open((self.endpoint.host.as_str(), self.endpoint.port))?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(ProbeError::UnexpectedReply(reply))
        }
    }
}

#[async_trait]
impl DependencyProbe for RedisProbe {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> DependencyStatus {
        let result = tokio::time::timeout(self.timeout, self.ping())
            .await
            .unwrap_or(Err(ProbeError::Timeout(self.timeout)));
        match result {
            Ok(()) => DependencyStatus::Connected,
            Err(e) => DependencyStatus::Failed(e.to_string()),
        }
    }
}
