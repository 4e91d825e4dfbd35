use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod catalog_repository;
pub mod heartbeat_repository;
pub mod note_repository;
pub mod notice_repository;
pub mod visitor_repository;

pub use catalog_repository::SqliteCatalogRepository;
pub use heartbeat_repository::SqliteHeartbeatRepository;
pub use note_repository::SqliteNoteRepository;
pub use notice_repository::SqliteNoticeRepository;
pub use visitor_repository::SqliteVisitorRepository;

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn exists_by_title(&self, title: &str) -> Result<bool>;
    /// Inserts a scraped candidate. Returns `None` when a notice with the
    /// same title already exists (titles carry a unique index, so a lost
    /// race surfaces as a conflict here rather than a duplicate row).
    async fn insert_candidate(&self, candidate: &NoticeCandidate) -> Result<Option<Notice>>;
    async fn list_active(&self) -> Result<Vec<Notice>>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_faculty(&self, faculty: Faculty) -> Result<Faculty>;
    async fn create_program(&self, program: Program) -> Result<Program>;
    async fn create_subject(&self, subject: Subject) -> Result<Subject>;
    async fn list_faculties(&self) -> Result<Vec<Faculty>>;
    async fn list_programs(&self, faculty_id: Option<Uuid>) -> Result<Vec<Program>>;
    async fn list_subjects(&self, program_id: Uuid, semester: Option<i64>) -> Result<Vec<Subject>>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: Note) -> Result<Note>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>>;
    async fn list(&self, subject_id: Option<Uuid>) -> Result<Vec<Note>>;
    async fn increment_download_count(&self, id: Uuid) -> Result<Note>;
}

#[async_trait]
pub trait HeartbeatRepository: Send + Sync {
    async fn insert(&self, message: &str) -> Result<Heartbeat>;
    /// Removes heartbeats older than the cutoff, returning how many went.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    async fn stats(&self) -> Result<VisitorStats>;
    async fn record_visit(&self, first_visit: bool) -> Result<VisitorStats>;
}
