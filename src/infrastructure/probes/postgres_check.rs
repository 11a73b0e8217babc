use std::time::Duration;

use async_trait::async_trait;
use tokio_postgres::config::SslMode;
use tokio_postgres::NoTls;

use super::ProbeError;
use crate::application::config::PostgresConfig;
use crate::domain::entities::DependencyStatus;
use crate::domain::ports::DependencyProbe;

/// Logs in with the configured user and database. A rejected login or an
/// unknown database fails the check.
pub struct PostgresProbe {
    config: PostgresConfig,
    timeout: Duration,
}

impl PostgresProbe {
    #[must_use]
    pub fn new(config: &PostgresConfig) -> Self {
        Self {
            config: config.clone(),
            timeout: Duration::from_secs(config.endpoint.timeout_secs),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.config.endpoint.host)
            .port(self.config.endpoint.port)
            .user(&self.config.user)
            .connect_timeout(self.timeout)
            .application_name("hostcheck")
            .ssl_mode(SslMode::Disable);
        if let Some(database) = &self.config.database {
            pg.dbname(database);
        }
        if let Some(password) = &self.config.password {
            pg.password(password);
        }
        pg
    }

    async fn login(&self) -> Result<(), ProbeError> {
        // Startup completes only after authentication and database selection.
        let (client, connection) = self.client_config().connect(NoTls).await?;
        drop(client);
        drop(connection);
        Ok(())
    }
}

#[async_trait]
impl DependencyProbe for PostgresProbe {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn check(&self) -> DependencyStatus {
        let result = tokio::time::timeout(self.timeout, self.login())
            .await
            .unwrap_or(Err(ProbeError::Timeout(self.timeout)));
        match result {
            Ok(()) => DependencyStatus::Connected,
            Err(e) => DependencyStatus::Failed(e.to_string()),
        }
    }
}
