//! Acquisition orchestrator.
//!
//! Runs every configured adapter (feeds first, then listing pages) in a
//! bounded pool, gives each a wall-clock budget, and concatenates what they
//! return in invocation order once all of them are done. An adapter that
//! errors or overruns its budget is logged and contributes nothing.

use crate::config::AggregatorConfig;
use crate::error::AdapterError;
use crate::fetch::Fetcher;
use crate::models::ArticleRecord;
use crate::relevance::RelevanceFilter;
use crate::scrapers::{Adapter, AdapterContext};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{error, info, instrument};

pub struct Orchestrator<'a, F> {
    fetcher: F,
    config: &'a AggregatorConfig,
    relevance: RelevanceFilter,
}

impl<'a, F: Fetcher> Orchestrator<'a, F> {
    pub fn new(fetcher: F, config: &'a AggregatorConfig) -> Self {
        Self {
            fetcher,
            config,
            relevance: RelevanceFilter::from_config(config),
        }
    }

    fn context(&self) -> AdapterContext<'_> {
        AdapterContext {
            config: self.config,
            relevance: &self.relevance,
        }
    }

    /// Run one adapter under its time budget.
    pub async fn run_adapter(&self, adapter: Adapter<'_>) -> Result<Vec<ArticleRecord>, AdapterError> {
        let budget = self.config.adapter_timeout;
        match timeout(budget, adapter.fetch_candidates(&self.fetcher, self.context())).await {
            Ok(result) => result,
            Err(_) => Err(AdapterError::Timeout {
                adapter: format!("{} {}", adapter.source(), adapter.kind()),
                budget,
            }),
        }
    }

    /// Every adapter's output, feed adapters first, each in source-list order.
    /// Never fails: a broken adapter only shrinks the result.
    #[instrument(level = "info", skip_all, fields(adapters = self.config.adapter_count()))]
    pub async fn collect_all(&self) -> Vec<ArticleRecord> {
        let t0 = Instant::now();
        let workers = self.config.worker_bound();
        info!(workers, "Fetching from feeds and listing pages");

        let per_adapter: Vec<Vec<ArticleRecord>> = stream::iter(Adapter::all(self.config))
            .map(|adapter| async move {
                match self.run_adapter(adapter).await {
                    Ok(records) => {
                        info!(
                            source = %adapter.source(),
                            kind = adapter.kind(),
                            count = records.len(),
                            "Adapter finished"
                        );
                        records
                    }
                    Err(e) => {
                        error!(
                            source = %adapter.source(),
                            kind = adapter.kind(),
                            error = %e,
                            "Adapter failed; continuing without it"
                        );
                        Vec::new()
                    }
                }
            })
            .buffered(workers)
            .collect()
            .await;

        let articles: Vec<ArticleRecord> = per_adapter.into_iter().flatten().collect();
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Collected candidate articles"
        );
        articles
    }
}
