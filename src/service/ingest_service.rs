use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    config::ScraperConfig,
    domain::NoticeCandidate,
    error::Result,
    repository::NoticeRepository,
    scraper::{dedup_by_title, retain_since, NoticeExtractor, PageFetcher},
};

/// Outcome of one ingestion run: how many candidates survived filtering and
/// how many were actually new.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub processed: usize,
    pub inserted: usize,
}

/// Orchestrates the notice pipeline: fetch each source page, extract
/// candidates, dedup and drop stale ones, then insert whatever the store
/// does not already have.
pub struct IngestService {
    fetcher: Arc<dyn PageFetcher>,
    notice_repo: Arc<dyn NoticeRepository>,
    extractor: NoticeExtractor,
    config: ScraperConfig,
}

impl IngestService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        notice_repo: Arc<dyn NoticeRepository>,
        config: ScraperConfig,
    ) -> Self {
        Self {
            fetcher,
            notice_repo,
            extractor: NoticeExtractor::new(&config),
            config,
        }
    }

    pub async fn run(&self) -> Result<IngestReport> {
        let now = Utc::now();
        let mut candidates = Vec::new();

        // Sources are fetched one after another; a dead or misbehaving URL
        // contributes nothing but never aborts the run.
        for url in &self.config.source_urls {
            match self.fetcher.fetch(url).await {
                Ok(html) => {
                    let found = self.extractor.extract(&html, now);
                    tracing::info!(url = url.as_str(), count = found.len(), "Extracted notices");
                    candidates.extend(found);
                }
                Err(e) => {
                    tracing::warn!(url = url.as_str(), error = %e, "Failed to fetch source page");
                }
            }
        }

        let candidates = dedup_by_title(candidates);
        let cutoff = now - Duration::days(self.config.retention_days);
        let candidates = retain_since(candidates, cutoff);

        let mut inserted = 0usize;
        for candidate in &candidates {
            match self.store_candidate(candidate).await {
                Ok(true) => {
                    tracing::info!(title = candidate.title.as_str(), "Inserted new notice");
                    inserted += 1;
                }
                Ok(false) => {
                    tracing::debug!(title = candidate.title.as_str(), "Notice already stored");
                }
                Err(e) => {
                    tracing::error!(title = candidate.title.as_str(), error = %e, "Failed to store notice");
                }
            }
        }

        Ok(IngestReport {
            processed: candidates.len(),
            inserted,
        })
    }

    /// Returns true when the candidate was new. The existence check keeps
    /// the common path to a single cheap query; the title's unique index
    /// catches the race where two runs pass the check together, in which
    /// case the losing insert reports a conflict and we count a duplicate.
    async fn store_candidate(&self, candidate: &NoticeCandidate) -> Result<bool> {
        if self.notice_repo.exists_by_title(&candidate.title).await? {
            return Ok(false);
        }

        Ok(self.notice_repo.insert_candidate(candidate).await?.is_some())
    }
}
