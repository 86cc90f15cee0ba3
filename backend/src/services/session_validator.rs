//! Periodic session validation.
//!
//! Sessions are checked on every request by the session provider; this task
//! additionally sweeps expired sessions out of the store on a fixed interval.

use std::{sync::Arc, time::Duration};

use larder_adapters::SessionStore;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

/// Removes expired sessions once, returning how many were dropped.
pub async fn sweep_once(store: &dyn SessionStore) -> usize {
    match store.purge_expired().await {
        Ok(0) => 0,
        Ok(removed) => {
            info!("Purged {removed} expired sessions");
            removed
        }
        Err(e) => {
            warn!("Session sweep failed: {e}");
            0
        }
    }
}

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Sweeps every `every`, but never more often than once a second.
pub fn spawn(store: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    let every = every.max(MIN_SWEEP_INTERVAL);

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!("session validator running every {every:?}");
        loop {
            ticker.tick().await;
            sweep_once(store.as_ref()).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use larder_adapters::{MemorySessionStore, Session, SessionUser};

    use super::*;

    fn expired(token: &str) -> Session {
        Session::new(
            token.to_string(),
            SessionUser {
                id: token.to_string(),
                name: None,
                email: None,
            },
            Utc::now() - chrono::Duration::minutes(1),
        )
    }

    #[tokio::test]
    async fn sweep_reports_removed_sessions() {
        let store = MemorySessionStore::new();
        store.insert(expired("a")).await;
        store.insert(expired("b")).await;

        assert_eq!(sweep_once(&store).await, 2);
        assert_eq!(sweep_once(&store).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_validator_sweeps_on_interval() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = spawn(store.clone(), Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(1)).await;
        store.insert(expired("late")).await;
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(store.is_empty().await);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped_instead_of_panicking() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = spawn(store.clone(), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(50)).await;
        store.insert(expired("late")).await;
        assert!(!handle.is_finished());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(store.is_empty().await);
        assert!(!handle.is_finished());

        handle.abort();
    }
}
