use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub name: String,
    pub code: String,
    pub level: ProgramLevel,
    pub total_semesters: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramLevel {
    Undergraduate,
    Graduate,
}

impl ProgramLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramLevel::Undergraduate => "Undergraduate",
            ProgramLevel::Graduate => "Graduate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub code: String,
    pub semester: i64,
    pub credits: Option<i64>,
    pub description: Option<String>,
}

/// Metadata for an uploaded study note. The file itself lives in external
/// object storage; we only track its public URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_type: String,
    pub uploader_name: Option<String>,
    pub uploader_email: Option<String>,
    pub download_count: i64,
    pub rating_sum: i64,
    pub rating_count: i64,
    pub tags: Vec<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
