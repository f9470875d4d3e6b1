use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::metrics::COALESCED_REQUESTS;
use crate::provider::ProviderError;

type Outcome = Result<String, ProviderError>;

// identical requests in flight share one provider call
#[derive(Default, Clone)]
pub struct InFlight {
    waiters: Arc<DashMap<String, Vec<oneshot::Sender<Outcome>>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    // only the first caller for `key` runs `work`, on its own task so it
    // finishes even if every caller goes away
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        let leader = match self.waiters.entry(key.to_string()) {
            Entry::Occupied(mut waiting) => {
                waiting.get_mut().push(tx);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(vec![tx]);
                true
            }
        };

        if leader {
            let flight = tokio::spawn(work());
            let waiters = Arc::clone(&self.waiters);
            let key = key.to_string();
            tokio::spawn(async move {
                let outcome = match flight.await {
                    Ok(outcome) => outcome,
                    Err(e) => Err(ProviderError::Aborted(e.to_string())),
                };
                if let Some((_, senders)) = waiters.remove(&key) {
                    for sender in senders {
                        // receiver gone means that caller disconnected
                        let _ = sender.send(outcome.clone());
                    }
                }
            });
        } else {
            COALESCED_REQUESTS.inc();
            tracing::debug!(key, "Joined in-flight request");
        }

        rx.await
            .unwrap_or_else(|_| Err(ProviderError::Aborted("in-flight request dropped".to_string())))
    }
}
