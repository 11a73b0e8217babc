use async_trait::async_trait;

use crate::domain::entities::{DependencyCheck, DependencyStatus};

/// Reachability check for an optional external dependency.
///
/// Implementations never fail: every problem is folded into
/// [`DependencyStatus::Failed`] or [`DependencyStatus::Skipped`].
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self) -> DependencyStatus;

    async fn run(&self) -> DependencyCheck {
        DependencyCheck {
            name: self.name().to_string(),
            status: self.check().await,
        }
    }
}
