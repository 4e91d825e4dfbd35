pub mod ingest_service;
pub mod keepalive_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ScraperConfig;
use crate::repository::*;
use crate::scraper::PageFetcher;

pub use ingest_service::{IngestReport, IngestService};
pub use keepalive_service::{KeepAliveReport, KeepAliveService};

pub struct ServiceContext {
    pub notice_repo: Arc<dyn NoticeRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub note_repo: Arc<dyn NoteRepository>,
    pub visitor_repo: Arc<dyn VisitorRepository>,
    pub ingest_service: Arc<IngestService>,
    pub keepalive_service: Arc<KeepAliveService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        scraper_config: ScraperConfig,
        db_pool: SqlitePool,
    ) -> Self {
        let notice_repo: Arc<dyn NoticeRepository> =
            Arc::new(SqliteNoticeRepository::new(db_pool.clone()));
        let catalog_repo: Arc<dyn CatalogRepository> =
            Arc::new(SqliteCatalogRepository::new(db_pool.clone()));
        let note_repo: Arc<dyn NoteRepository> =
            Arc::new(SqliteNoteRepository::new(db_pool.clone()));
        let visitor_repo: Arc<dyn VisitorRepository> =
            Arc::new(SqliteVisitorRepository::new(db_pool.clone()));
        let heartbeat_repo: Arc<dyn HeartbeatRepository> =
            Arc::new(SqliteHeartbeatRepository::new(db_pool.clone()));

        let ingest_service = Arc::new(IngestService::new(
            fetcher,
            notice_repo.clone(),
            scraper_config,
        ));
        let keepalive_service = Arc::new(KeepAliveService::new(heartbeat_repo));

        Self {
            notice_repo,
            catalog_repo,
            note_repo,
            visitor_repo,
            ingest_service,
            keepalive_service,
            db_pool,
        }
    }
}
