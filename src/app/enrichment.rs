//! Bounded worker pool fetching per-ticker metadata.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{EnrichmentRecord, Enrichments, Ticker};
use crate::error::Error;
use crate::port::MetadataSource;

/// Completed items between two progress lines.
const PROGRESS_EVERY: usize = 10;

/// Worker pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    pub concurrency: usize,
    /// Pause a worker takes after an item while work remains.
    pub delay: Duration,
    /// Upper bound for a single metadata call.
    pub timeout: Duration,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self {
            concurrency: 5,
            delay: Duration::from_millis(150),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Fans a ticker list out over `concurrency` cooperative workers.
pub struct Enricher {
    source: Arc<dyn MetadataSource>,
    policy: EnrichmentPolicy,
}

impl Enricher {
    pub fn new(source: Arc<dyn MetadataSource>, policy: EnrichmentPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch every ticker once. The result has an entry for each ticker;
    /// failures and timeouts become empty records.
    pub async fn enrich_all(&self, tickers: &[Ticker]) -> Enrichments {
        let mut seen = HashSet::new();
        let queue: VecDeque<Ticker> = tickers
            .iter()
            .filter(|t| seen.insert((*t).clone()))
            .cloned()
            .collect();
        let total = queue.len();
        if total == 0 {
            return Enrichments::new();
        }

        info!(
            total,
            concurrency = self.policy.concurrency,
            source = self.source.source_name(),
            "Enriching"
        );

        let queue = Mutex::new(queue);
        let results = Mutex::new(Enrichments::new());
        let done = AtomicUsize::new(0);
        let workers = self.policy.concurrency.clamp(1, total);

        join_all((0..workers).map(|_| self.worker(&queue, &results, &done, total))).await;

        let enrichments = results.into_inner();
        info!(
            total,
            informative = enrichments.informative(),
            "Enrichment finished"
        );
        enrichments
    }

    async fn worker(
        &self,
        queue: &Mutex<VecDeque<Ticker>>,
        results: &Mutex<Enrichments>,
        done: &AtomicUsize,
        total: usize,
    ) {
        loop {
            // Guard dropped before the await.
            let Some(ticker) = queue.lock().pop_front() else {
                break;
            };

            let record = self.fetch_one(&ticker).await;
            results.lock().insert(record);

            let completed = done.fetch_add(1, Ordering::SeqCst) + 1;
            if completed % PROGRESS_EVERY == 0 || completed == total {
                info!(completed, total, "Enrichment progress");
            }

            if !queue.lock().is_empty() && !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
        }
    }

    async fn fetch_one(&self, ticker: &Ticker) -> EnrichmentRecord {
        let call = self.source.fetch_metadata(ticker);
        match tokio::time::timeout(self.policy.timeout, call).await {
            Ok(Ok(record)) if record.ticker == *ticker => record.sanitized(),
            Ok(Ok(record)) => {
                debug!(
                    ticker = %ticker,
                    returned = %record.ticker,
                    "Source answered for another ticker"
                );
                EnrichmentRecord {
                    ticker: ticker.clone(),
                    ..record
                }
                .sanitized()
            }
            Ok(Err(e)) => {
                warn!(ticker = %ticker, error = %e, "Metadata fetch failed");
                EnrichmentRecord::empty(ticker.clone())
            }
            Err(_) => {
                let e = Error::Timeout(duration_ms(self.policy.timeout));
                warn!(ticker = %ticker, error = %e, "Metadata fetch timed out");
                EnrichmentRecord::empty(ticker.clone())
            }
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ScriptedMetadata;

    fn fast_policy(concurrency: usize) -> EnrichmentPolicy {
        EnrichmentPolicy {
            concurrency,
            delay: Duration::ZERO,
            timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn test_every_ticker_fetched_once() {
        let source = Arc::new(ScriptedMetadata::new());
        let enricher = Enricher::new(source.clone(), fast_policy(3));
        let tickers: Vec<Ticker> = ["AAAA11", "BBBB11", "AAAA11", "CCCC11"]
            .into_iter()
            .map(Ticker::from)
            .collect();

        let enrichments = enricher.enrich_all(&tickers).await;

        assert_eq!(enrichments.len(), 3);
        assert_eq!(source.calls(), 3);
        assert_eq!(source.calls_for(&Ticker::from("AAAA11")), 1);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let source = Arc::new(ScriptedMetadata::new());
        let enricher = Enricher::new(source.clone(), fast_policy(5));
        assert!(enricher.enrich_all(&[]).await.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_failures_become_empty_records() {
        let failing = Ticker::from("FAIL11");
        let source = Arc::new(ScriptedMetadata::new().failing(failing.clone()));
        let enricher = Enricher::new(source, fast_policy(2));

        let enrichments = enricher
            .enrich_all(&[failing.clone(), Ticker::from("GOOD11")])
            .await;

        assert!(enrichments.contains(&failing));
        assert!(enrichments.get(&failing).is_empty());
        assert_eq!(enrichments.len(), 2);
    }
}
