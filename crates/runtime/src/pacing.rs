//! Injectable pacing between automatically resolved turns.
//!
//! The delay exists purely so spectators can follow AI turns; it carries no
//! correctness weight. Production sessions use [`FixedDelay`], tests and
//! headless simulation use [`NoDelay`].

use std::time::Duration;

use async_trait::async_trait;

/// Strategy deciding how long the scheduler lingers after an AI turn
/// before advancing to the next one.
#[async_trait]
pub trait DelayStrategy: Send + Sync {
    async fn pause(&self);
}

/// Real-time pacing for interactive sessions.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay {
    duration: Duration,
}

impl FixedDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl DelayStrategy for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Zero-delay pacing for tests and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait]
impl DelayStrategy for NoDelay {
    async fn pause(&self) {}
}
