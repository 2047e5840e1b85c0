//! Artificial latency applied around store operations.
//!
//! The store never performs real I/O; the delay exists so callers exercise
//! their loading states. Strategies are injected into each repository.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::config::LatencyConfig;

/// Class of store operation, each with its own delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationClass {
    List,
    Fetch,
    Create,
    Update,
    Delete,
    Toggle,
    Progress,
}

impl OperationClass {
    pub const ALL: [OperationClass; 7] = [
        OperationClass::List,
        OperationClass::Fetch,
        OperationClass::Create,
        OperationClass::Update,
        OperationClass::Delete,
        OperationClass::Toggle,
        OperationClass::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationClass::List => "list",
            OperationClass::Fetch => "fetch",
            OperationClass::Create => "create",
            OperationClass::Update => "update",
            OperationClass::Delete => "delete",
            OperationClass::Toggle => "toggle",
            OperationClass::Progress => "progress",
        }
    }
}

/// Strategy deciding how long an operation is held before it runs
#[async_trait]
pub trait LatencyStrategy: Send + Sync + std::fmt::Debug {
    /// Delay configured for `class`
    fn delay_for(&self, class: OperationClass) -> Duration;

    /// Suspends the calling task for the configured delay
    async fn pause(&self, class: OperationClass) {
        let delay = self.delay_for(class);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Shared handle used by repositories
pub type SharedLatency = Arc<dyn LatencyStrategy>;

/// Returns immediately; the default for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl LatencyStrategy for NoLatency {
    fn delay_for(&self, _class: OperationClass) -> Duration {
        Duration::ZERO
    }
}

/// Fixed per-class delays
#[derive(Debug, Clone, Default)]
pub struct FixedLatency {
    delays: HashMap<OperationClass, Duration>,
}

impl FixedLatency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, class: OperationClass, delay: Duration) -> Self {
        self.delays.insert(class, delay);
        self
    }

    pub fn from_config(config: &LatencyConfig) -> Self {
        OperationClass::ALL
            .into_iter()
            .fold(Self::new(), |latency, class| {
                latency.with_delay(class, Duration::from_millis(config.millis_for(class)))
            })
    }
}

#[async_trait]
impl LatencyStrategy for FixedLatency {
    fn delay_for(&self, class: OperationClass) -> Duration {
        self.delays.get(&class).copied().unwrap_or(Duration::ZERO)
    }
}

/// Builds the strategy selected by configuration
pub fn from_config(config: &LatencyConfig) -> SharedLatency {
    if config.enabled {
        Arc::new(FixedLatency::from_config(config))
    } else {
        Arc::new(NoLatency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_latency_uses_configured_defaults() {
        let latency = FixedLatency::from_config(&LatencyConfig::default());
        assert_eq!(
            latency.delay_for(OperationClass::Create),
            Duration::from_millis(400)
        );
        assert_eq!(
            latency.delay_for(OperationClass::Progress),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_disabled_config_yields_no_latency() {
        let config = LatencyConfig {
            enabled: false,
            ..Default::default()
        };
        let latency = from_config(&config);
        for class in OperationClass::ALL {
            assert!(latency.delay_for(class).is_zero());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_advances_by_configured_delay() {
        let latency =
            FixedLatency::new().with_delay(OperationClass::List, Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        latency.pause(OperationClass::List).await;
        assert!(started.elapsed() >= Duration::from_millis(300));

        let started = tokio::time::Instant::now();
        latency.pause(OperationClass::Delete).await;
        assert!(started.elapsed() < Duration::from_millis(1));
    }
}
