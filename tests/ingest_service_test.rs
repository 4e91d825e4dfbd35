use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use studyhub::{
    config::ScraperConfig,
    domain::{Notice, NoticeCandidate},
    error::{AppError, Result},
    repository::{NoticeRepository, SqliteNoticeRepository},
    scraper::PageFetcher,
    service::IngestService,
};

/// Serves canned HTML for known URLs and fails for everything else.
struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    fn new(pages: Vec<(&str, &str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("connection refused: {}", url)))
    }
}

/// Wraps a real repository, recording insert calls and optionally failing
/// inserts for one specific title.
struct InstrumentedNoticeRepository {
    inner: SqliteNoticeRepository,
    insert_calls: Mutex<Vec<String>>,
    fail_on_title: Option<String>,
}

impl InstrumentedNoticeRepository {
    fn new(pool: SqlitePool, fail_on_title: Option<&str>) -> Self {
        Self {
            inner: SqliteNoticeRepository::new(pool),
            insert_calls: Mutex::new(Vec::new()),
            fail_on_title: fail_on_title.map(str::to_string),
        }
    }

    fn recorded_inserts(&self) -> Vec<String> {
        self.insert_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoticeRepository for InstrumentedNoticeRepository {
    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        self.inner.exists_by_title(title).await
    }

    async fn insert_candidate(&self, candidate: &NoticeCandidate) -> Result<Option<Notice>> {
        self.insert_calls
            .lock()
            .unwrap()
            .push(candidate.title.clone());

        if self.fail_on_title.as_deref() == Some(candidate.title.as_str()) {
            return Err(AppError::Database("disk I/O error".to_string()));
        }

        self.inner.insert_candidate(candidate).await
    }

    async fn list_active(&self) -> Result<Vec<Notice>> {
        self.inner.list_active().await
    }
}

async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

fn config_with_urls(urls: &[&str]) -> ScraperConfig {
    ScraperConfig {
        source_urls: urls.iter().map(|u| u.to_string()).collect(),
        ..ScraperConfig::default()
    }
}

fn article(title: &str) -> String {
    format!(
        r#"<article class="post"><h2><a href="/p/{}">{}</a></h2><p>Body of {}</p></article>"#,
        title.len(),
        title,
        title
    )
}

#[tokio::test]
async fn ingests_new_notices_and_skips_known_ones_on_rerun() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo: Arc<dyn NoticeRepository> = Arc::new(SqliteNoticeRepository::new(pool.clone()));

    let html = format!(
        "{}{}",
        article("Final Examination Routine Published"),
        article("Scholarship Application Deadline Extended")
    );
    let fetcher = Arc::new(StaticFetcher::new(vec![("http://source.test/notices/", &html)]));

    let service = IngestService::new(
        fetcher.clone(),
        repo.clone(),
        config_with_urls(&["http://source.test/notices/"]),
    );

    let report = service.run().await?;
    assert_eq!(report.processed, 2);
    assert_eq!(report.inserted, 2);

    let stored = repo.list_active().await?;
    assert_eq!(stored.len(), 2);

    // Same pages again: everything is already known.
    let report = service.run().await?;
    assert_eq!(report.processed, 2);
    assert_eq!(report.inserted, 0);
    assert_eq!(repo.list_active().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn one_dead_source_does_not_abort_the_others() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo: Arc<dyn NoticeRepository> = Arc::new(SqliteNoticeRepository::new(pool.clone()));

    let html = article("Admission Open For Fall Semester");
    let fetcher = Arc::new(StaticFetcher::new(vec![("http://source.test/b/", &html)]));

    // First URL always fails to fetch.
    let service = IngestService::new(
        fetcher,
        repo.clone(),
        config_with_urls(&["http://source.test/a/", "http://source.test/b/"]),
    );

    let report = service.run().await?;
    assert_eq!(report.inserted, 1);
    assert_eq!(repo.list_active().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn existing_title_short_circuits_before_insert() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = Arc::new(InstrumentedNoticeRepository::new(pool.clone(), None));

    // Pre-populate the store with one of the two scraped titles.
    SqliteNoticeRepository::new(pool.clone())
        .insert_candidate(&NoticeCandidate {
            title: "Final Examination Routine Published".to_string(),
            content: "already stored".to_string(),
            category: studyhub::domain::NoticeCategory::Examinations,
            published_at: Utc::now(),
        })
        .await?;

    let html = format!(
        "{}{}",
        article("Final Examination Routine Published"),
        article("Scholarship Application Deadline Extended")
    );
    let fetcher = Arc::new(StaticFetcher::new(vec![("http://source.test/notices/", &html)]));

    let service = IngestService::new(
        fetcher,
        repo.clone(),
        config_with_urls(&["http://source.test/notices/"]),
    );

    let report = service.run().await?;
    assert_eq!(report.processed, 2);
    assert_eq!(report.inserted, 1);

    // The known title never reached the insert path.
    assert_eq!(
        repo.recorded_inserts(),
        vec!["Scholarship Application Deadline Extended".to_string()]
    );

    Ok(())
}

#[tokio::test]
async fn insert_failure_mid_batch_does_not_stop_the_rest() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = Arc::new(InstrumentedNoticeRepository::new(
        pool.clone(),
        Some("Scholarship Application Deadline Extended"),
    ));

    let html = format!(
        "{}{}{}",
        article("Final Examination Routine Published"),
        article("Scholarship Application Deadline Extended"),
        article("Admission Open For Fall Semester")
    );
    let fetcher = Arc::new(StaticFetcher::new(vec![("http://source.test/notices/", &html)]));

    let service = IngestService::new(
        fetcher,
        repo.clone(),
        config_with_urls(&["http://source.test/notices/"]),
    );

    let report = service.run().await?;

    // All three were attempted; only the middle one failed.
    assert_eq!(repo.recorded_inserts().len(), 3);
    assert_eq!(report.processed, 3);
    assert_eq!(report.inserted, 2);

    Ok(())
}

#[tokio::test]
async fn same_notice_on_two_pages_is_stored_once() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo: Arc<dyn NoticeRepository> = Arc::new(SqliteNoticeRepository::new(pool.clone()));

    let html = article("Final Examination Routine Published");
    let fetcher = Arc::new(StaticFetcher::new(vec![
        ("http://source.test/a/", html.as_str()),
        ("http://source.test/b/", html.as_str()),
    ]));

    let service = IngestService::new(
        fetcher,
        repo.clone(),
        config_with_urls(&["http://source.test/a/", "http://source.test/b/"]),
    );

    let report = service.run().await?;
    assert_eq!(report.processed, 1);
    assert_eq!(report.inserted, 1);

    Ok(())
}
