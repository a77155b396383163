//! Background expiry of idle sessions.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::ConversationMemory;

impl ConversationMemory {
    /// Start the periodic eviction task.
    ///
    /// Runs [`ConversationMemory::evict_expired`] every `sweep_interval`
    /// until `shutdown` is notified.
    pub fn spawn_sweeper(self: &Arc<Self>, shutdown: Arc<Notify>) -> JoinHandle<()> {
        let memory = Arc::clone(self);
        let period = memory.config.sweep_interval;

        tokio::spawn(async move {
            info!(interval = ?period, "Session sweeper started");
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = memory.evict_expired(Utc::now());
                        if evicted > 0 {
                            debug!(evicted, "Sweeper evicted expired sessions");
                        }
                    }
                    _ = shutdown.notified() => {
                        info!("Session sweeper shutting down");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryConfig, ScoringConfig};
    use crate::knowledge::KnowledgeBase;
    use crate::recognition::EntitySet;
    use crate::symptoms::SymptomExtractor;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_and_stops() {
        let config = MemoryConfig {
            sweep_interval: Duration::from_secs(1),
            ..MemoryConfig::default()
        };
        let extractor = Arc::new(SymptomExtractor::new(
            &KnowledgeBase::default(),
            &ScoringConfig::default(),
        ));
        let memory = Arc::new(ConversationMemory::new(config, extractor));

        let long_ago = Utc::now() - chrono::Duration::hours(1);
        memory
            .update("stale", "hello", EntitySet::default(), vec![], long_ago)
            .await
            .unwrap();
        memory.commit("stale", "hi", long_ago).await.unwrap();

        let shutdown = Arc::new(Notify::new());
        let handle = memory.spawn_sweeper(Arc::clone(&shutdown));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(memory.get_session("stale", Utc::now()).await.is_err());
        assert_eq!(memory.stats().await.evicted_total, 1);

        shutdown.notify_one();
        handle.await.unwrap();
    }
}
