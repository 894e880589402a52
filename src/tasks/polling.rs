//! Update Polling Task
//!
//! Background task that long-polls the transport for updates and feeds them
//! to the observer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bot::{BotProvider, Observer};

/// Pause before polling again after a transport error.
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Spawns a background task that polls for updates until aborted.
///
/// Each batch is processed in order and the offset is moved past the highest
/// `update_id` seen, so an update is acknowledged even if handling it failed.
/// Transport and handling errors are logged; polling resumes after
/// `RETRY_DELAY` on a transport error.
///
/// # Arguments
/// * `provider` - Transport to poll
/// * `observer` - Handles each update
/// * `timeout_secs` - Long-poll timeout passed to the transport
///
/// # Returns
/// A JoinHandle for the spawned task, to be aborted during shutdown.
pub fn spawn_polling_task(
    provider: Arc<dyn BotProvider>,
    mut observer: Observer,
    timeout_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(timeout_secs, "starting update polling");

        let mut offset: i64 = 0;

        loop {
            let updates = match provider.get_updates(offset, timeout_secs).await {
                Ok(updates) => updates,
                Err(err) => {
                    warn!(error = %err, "failed to fetch updates, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            if !updates.is_empty() {
                debug!(count = updates.len(), offset, "received updates");
            }

            for update in updates {
                offset = offset.max(update.update_id + 1);

                if let Err(err) = observer.process_update(&update).await {
                    warn!(update_id = update.update_id, error = %err, "failed to process update");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::testing::{admin, message, update, user, MockProvider};
    use crate::cache::{CacheOptions, SharedTtlCache};
    use crate::error::BotError;
    use chrono::Duration as ChronoDuration;

    fn observer(provider: &Arc<MockProvider>) -> Observer {
        let cache = SharedTtlCache::new(1, ChronoDuration::hours(24), CacheOptions::new()).unwrap();
        Observer::new(provider.clone(), Box::new(cache))
    }

    async fn wait_for_sent(provider: &MockProvider, count: usize) {
        for _ in 0..200 {
            if provider.sent().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_polling_replies_and_advances_offset() {
        let provider = Arc::new(MockProvider::with_admins(vec![admin(7)]));
        let author = Some(user(7, "Ann", None));
        provider.push_updates(Ok(vec![
            update(10, Some(message(-1, author.clone(), "/php"))),
            update(11, Some(message(-1, author.clone(), "not a command"))),
            update(12, Some(message(-1, author, "/go"))),
        ]));

        let handle = spawn_polling_task(provider.clone(), observer(&provider), 1);
        wait_for_sent(&provider, 2).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.abort();

        let sent = provider.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].text.starts_with("@phpGeeks"));
        assert!(sent[1].text.starts_with("@golangGeeks"));

        let offsets = provider.offsets.lock().unwrap().clone();
        assert_eq!(offsets[0], 0);
        assert!(offsets[1..].iter().all(|&o| o == 13));
        assert_eq!(provider.admin_calls(), 1);
    }

    #[tokio::test]
    async fn test_processing_error_does_not_stop_polling() {
        let provider = Arc::new(MockProvider {
            fail_admins: true,
            ..MockProvider::default()
        });
        provider.push_updates(Ok(vec![update(
            1,
            Some(message(-1, Some(user(7, "Ann", None)), "/php")),
        )]));

        let handle = spawn_polling_task(provider.clone(), observer(&provider), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!handle.is_finished());
        let offsets = provider.offsets.lock().unwrap().clone();
        assert!(offsets.len() >= 2);
        assert_eq!(offsets[1], 2);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_is_retried() {
        let provider = Arc::new(MockProvider::with_admins(vec![admin(7)]));
        provider.push_updates(Err(BotError::MissingResult("getUpdates".to_string())));
        provider.push_updates(Ok(vec![update(
            5,
            Some(message(-1, Some(user(7, "Ann", None)), "/db")),
        )]));

        let handle = spawn_polling_task(provider.clone(), observer(&provider), 1);
        tokio::time::sleep(RETRY_DELAY / 2).await;
        assert_eq!(provider.offsets.lock().unwrap().len(), 1);

        tokio::time::sleep(RETRY_DELAY).await;
        wait_for_sent(&provider, 1).await;
        handle.abort();

        assert_eq!(provider.sent().len(), 1);
        assert_eq!(provider.offsets.lock().unwrap()[..2], [0, 0]);
    }

    #[tokio::test]
    async fn test_polling_task_can_be_aborted() {
        let provider = Arc::new(MockProvider::default());

        let handle = spawn_polling_task(provider.clone(), observer(&provider), 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
